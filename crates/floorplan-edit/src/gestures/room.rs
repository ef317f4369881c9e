//! 房间拖动与缩放

use crate::error::Result;
use crate::gesture::{Handle, Rect};
use floorplan_core::math::Vector2;
use floorplan_core::model::Layout;
use floorplan_core::mutator::{self, RoomPatch};

/// 拖动手柄时房间边长的下限（米）
pub const ROOM_MIN_SIZE_M: f64 = 0.5;

pub(crate) fn drag(start: &Layout, room_id: &str, origin: &Rect, delta: Vector2) -> Result<Layout> {
    let moved = origin.translated(start.transform().vector_to_meters(delta));
    Ok(mutator::move_room(start, room_id, moved.x, moved.y)?)
}

/// 房间缩放走 `update_room`，家具随之收回房间，门窗重叠时整步被拒绝
pub(crate) fn resize(start: &Layout, room_id: &str, origin: &Rect, handle: Handle, delta: Vector2) -> Result<Layout> {
    let delta_m = start.transform().vector_to_meters(delta);
    // 下限先于裁剪生效；固定边离原点不足下限时，以固定边为准
    let rect = origin.resized(handle, delta_m, ROOM_MIN_SIZE_M).clip_to_origin();
    let patch = RoomPatch {
        x_m: Some(rect.x),
        y_m: Some(rect.y),
        width_m: Some(rect.width),
        height_m: Some(rect.height),
        ..Default::default()
    };
    Ok(mutator::update_room(start, room_id, &patch)?)
}
