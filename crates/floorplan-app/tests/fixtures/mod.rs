//! 命令行端到端测试的共享夹具
#![allow(dead_code)] // 各测试文件只用到其中一部分

use floorplan_core::model::{Door, Layout, Wall};
use floorplan_core::mutator;
use floorplan_edit::PointerEvent;
use floorplan_file::PlanDocument;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// floorplan 可执行文件路径
pub fn floorplan_bin() -> &'static str {
    env!("CARGO_BIN_EXE_floorplan")
}

/// 运行 floorplan 并收集输出
pub fn run(args: &[&str]) -> Output {
    Command::new(floorplan_bin())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// 两个 4m × 4m 房间：a 在画布 (40,40)-(240,240)，b 在 (240,40)-(440,240)
pub fn two_rooms() -> Layout {
    let layout = mutator::add_room_with_id(&Layout::default(), "a");
    mutator::add_room_with_id(&layout, "b")
}

/// 南墙上两扇重叠的门，绕过变更函数直接写入
pub fn overlapping_doors() -> Layout {
    let mut layout = two_rooms();
    layout.rooms[0].doors.push(Door::new(Wall::South, 0.55, 0.9));
    layout
}

/// 在临时目录中保存文档，格式由文件名后缀决定
pub fn write_plan(layout: Layout, file_name: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(file_name);
    let document = PlanDocument::new("Test Plan", layout);
    floorplan_file::save(&document, &path).expect("Failed to write plan");
    (path, temp_dir)
}

/// 绕过导入校验，直接写出裸布局 JSON
pub fn write_raw_layout(layout: &Layout, dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    let json = floorplan_file::layout_to_json(layout).expect("Failed to encode layout");
    std::fs::write(&path, json).expect("Failed to write layout");
    path
}

pub fn write_events(events: &[PointerEvent], dir: &Path) -> PathBuf {
    let path = dir.join("events.json");
    let json = serde_json::to_string(events).expect("Failed to encode events");
    std::fs::write(&path, json).expect("Failed to write events");
    path
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}
