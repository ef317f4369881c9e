//! 门窗沿墙滑动与两端拉伸
//!
//! 只取位移在墙方向上的分量：南北墙取 x，东西墙取 y。
//! 位置和宽度的钳制以及重叠校验都交给 `resize_door` / `resize_window`。

use crate::error::{EditError, Result};
use crate::gesture::{Handle, Origin};
use floorplan_core::hit::EntityRef;
use floorplan_core::math::Vector2;
use floorplan_core::model::{Layout, Wall};
use floorplan_core::mutator;

/// 沿墙位移换算成墙长比例；墙长无效时不移动
fn wall_fraction(start: &Layout, wall: Wall, wall_length_m: f64, delta: Vector2) -> f64 {
    if wall_length_m.is_nan() || wall_length_m <= 0.0 {
        return 0.0;
    }
    let along_px = if wall.is_horizontal() { delta.x } else { delta.y };
    start.transform().to_meters(along_px) / wall_length_m
}

fn commit(start: &Layout, target: &EntityRef, position: f64, width_m: f64) -> Result<Layout> {
    let next = match target {
        EntityRef::Door { room_id, index } => mutator::resize_door(start, room_id, *index, position, width_m)?,
        EntityRef::Window { room_id, index } => mutator::resize_window(start, room_id, *index, position, width_m)?,
        _ => return Err(EditError::StaleTarget(target.clone())),
    };
    Ok(next)
}

pub(crate) fn slide(start: &Layout, target: &EntityRef, origin: &Origin, delta: Vector2) -> Result<Layout> {
    let Origin::Opening {
        wall,
        position,
        width_m,
        wall_length_m,
    } = *origin
    else {
        return Err(EditError::StaleTarget(target.clone()));
    };
    let shift = wall_fraction(start, wall, wall_length_m, delta);
    commit(start, target, position + shift, width_m)
}

/// 拖动一端，另一端保持不动
pub(crate) fn resize(
    start: &Layout,
    target: &EntityRef,
    origin: &Origin,
    handle: Handle,
    delta: Vector2,
) -> Result<Layout> {
    let Origin::Opening {
        wall,
        position,
        width_m,
        wall_length_m,
    } = *origin
    else {
        return Err(EditError::StaleTarget(target.clone()));
    };
    if wall_length_m.is_nan() || wall_length_m <= 0.0 {
        return commit(start, target, position, width_m);
    }

    let shift = wall_fraction(start, wall, wall_length_m, delta);
    let half = width_m / wall_length_m / 2.0;
    let (mut from, mut to) = (position - half, position + half);
    match handle {
        Handle::Start => from += shift,
        Handle::End => to += shift,
        _ => {
            return Err(EditError::UnsupportedHandle {
                kind: target.kind(),
                handle,
            })
        }
    }

    let center = (from + to) / 2.0;
    let width = (to - from).abs() * wall_length_m;
    commit(start, target, center, width)
}
