//! `floorplan new` 与 `floorplan inspect` 端到端测试
#![allow(unused_variables)] // 临时目录需要存活到测试结束

mod fixtures;

use fixtures::*;
use tempfile::TempDir;

#[test]
fn test_new_then_inspect_json() {
    let temp_dir = TempDir::new().unwrap();
    let plan = temp_dir.path().join("flat.json");

    let output = run(&[
        "new",
        path_str(&plan),
        "--rooms",
        "2",
        "--title",
        "Flat",
        "--property-type",
        "apartment",
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = run(&["inspect", path_str(&plan), "--json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should parse JSON output");
    assert_eq!(summary["title"], "Flat");
    assert_eq!(summary["property_type"], "apartment");
    assert_eq!(summary["total_width_m"], 8.0);
    assert_eq!(summary["total_height_m"], 4.0);
    assert_eq!(summary["total_area_m2"], 32.0);

    let rooms = summary["rooms"].as_array().expect("rooms should be an array");
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["room_type"], "other");
    assert_eq!(rooms[0]["doors"], 1);
    assert_eq!(rooms[1]["x_m"], 4.0);
}

#[test]
fn test_inspect_native_plain() {
    let (plan, temp_dir) = write_plan(two_rooms(), "plan.fplan");

    let output = run(&["inspect", path_str(&plan)]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("Test Plan"));
    assert!(text.contains("8.00 m x 4.00 m"));
    assert!(text.contains("- a \""));
    assert!(text.contains("- b \""));
}

#[test]
fn test_inspect_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["inspect", path_str(&temp_dir.path().join("missing.json"))]);
    assert_ne!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("failed to open"));
}
