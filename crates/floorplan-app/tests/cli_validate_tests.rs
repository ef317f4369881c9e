//! `floorplan validate` 端到端测试
#![allow(unused_variables)] // 临时目录需要存活到测试结束

mod fixtures;

use fixtures::*;

#[test]
fn test_validate_ok() {
    let (plan, temp_dir) = write_plan(two_rooms(), "plan.json");

    let output = run(&["validate", path_str(&plan)]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ok (2 rooms)"));
}

#[test]
fn test_validate_reports_each_invalid_file() {
    let (good, temp_dir) = write_plan(two_rooms(), "good.fplan");
    let bad = write_raw_layout(&overlapping_doors(), temp_dir.path(), "bad.json");

    let output = run(&["validate", path_str(&good), path_str(&bad)]);
    assert_ne!(output.status.code(), Some(0), "overlapping doors should fail validation");

    let text = stdout(&output);
    assert!(text.contains("good.fplan: ok (2 rooms)"));
    assert!(text.contains("bad.json: "));
    assert!(!text.contains("bad.json: ok"));
    assert!(stderr(&output).contains("1 of 2 files failed validation"));
}

#[test]
fn test_validate_requires_input() {
    let output = run(&["validate"]);
    assert_ne!(output.status.code(), Some(0));
}
