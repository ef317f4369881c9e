//! 家具拖动与缩放（房间局部像素）

use crate::error::{EditError, Result};
use crate::gesture::{Handle, Rect};
use floorplan_core::hit::EntityRef;
use floorplan_core::math::Vector2;
use floorplan_core::model::{Layout, FURNITURE_MIN_SIZE_PX};
use floorplan_core::mutator;

fn ids(target: &EntityRef) -> Result<(&str, &str)> {
    match target {
        EntityRef::Furniture { room_id, furniture_id } => Ok((room_id, furniture_id)),
        _ => Err(EditError::StaleTarget(target.clone())),
    }
}

pub(crate) fn drag(start: &Layout, target: &EntityRef, origin: &Rect, delta: Vector2) -> Result<Layout> {
    let (room_id, furniture_id) = ids(target)?;
    let moved = origin.translated(delta);
    Ok(mutator::move_furniture(start, room_id, furniture_id, moved.x, moved.y)?)
}

pub(crate) fn resize(
    start: &Layout,
    target: &EntityRef,
    origin: &Rect,
    handle: Handle,
    delta: Vector2,
) -> Result<Layout> {
    let (room_id, furniture_id) = ids(target)?;
    let rect = origin.resized(handle, delta, FURNITURE_MIN_SIZE_PX).clip_to_origin();
    Ok(mutator::resize_furniture(
        start,
        room_id,
        furniture_id,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
    )?)
}
