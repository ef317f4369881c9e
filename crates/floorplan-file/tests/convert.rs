//! JSON 与原生格式之间的互相转换

use floorplan_core::model::{Layout, Wall, Window};
use floorplan_core::mutator;
use floorplan_file::{open, save, FileError, PlanDocument};
use std::path::PathBuf;

fn temp(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

fn document() -> PlanDocument {
    let layout = mutator::add_room_with_id(&Layout::default(), "kitchen");
    let layout = mutator::add_window(&layout, "kitchen", Window::new(Wall::East, 0.5, 1.2)).unwrap();
    PlanDocument::new("Kitchen", layout)
}

#[test]
fn json_to_native_and_back() {
    let json_path = temp("floorplan_convert_in.json");
    let native_path = temp("floorplan_convert.fplan");
    let back_path = temp("floorplan_convert_out.json");
    let doc = document();

    save(&doc, &json_path).unwrap();
    let from_json = open(&json_path).unwrap();
    save(&from_json, &native_path).unwrap();
    let from_native = open(&native_path).unwrap();
    save(&from_native, &back_path).unwrap();

    assert_eq!(open(&back_path).unwrap(), doc);

    for path in [json_path, native_path, back_path] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn invalid_layout_is_rejected_on_open() {
    let path = temp("floorplan_convert_invalid.json");
    let mut doc = document();
    // 绕过变更层直接写入一个与门重叠的窗
    doc.layout.rooms[0].windows.push(Window::new(Wall::South, 0.5, 1.0));
    save(&doc, &path).unwrap();

    let err = open(&path).unwrap_err();
    assert!(matches!(err, FileError::Layout(ref e) if e.is_overlap()));

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_io_error() {
    let err = open(&temp("floorplan_does_not_exist.fplan")).unwrap_err();
    assert!(matches!(err, FileError::Io(_)));
}
