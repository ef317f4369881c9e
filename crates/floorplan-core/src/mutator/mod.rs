//! 布局变更
//!
//! 所有操作都接收不可变的 [`Layout`] 并返回新的布局值，从不就地修改输入。
//! 失败时返回 [`LayoutError`]，调用方手里的旧布局保持不变。
//!
//! 每次成功的房间操作之后都会重新计算总尺寸（所有房间 `x + width`、`y + height`
//! 的最大值，取两位小数），像素总尺寸随比例重新派生。

mod furniture;
mod opening;

pub use furniture::{add_furniture, add_furniture_with_id, move_furniture, remove_furniture, resize_furniture};
pub use opening::{
    add_door, add_window, remove_door, remove_window, resize_door, resize_window, update_door,
    update_window,
};

use crate::error::{Result, ValidationError};
use crate::model::{Door, Layout, Room, RoomShape, RoomType, Wall};
use crate::shape::ShapeData;
use crate::validator;
use serde::{Deserialize, Serialize};

/// 新房间的默认边长（米）
pub const DEFAULT_ROOM_SIZE_M: f64 = 4.0;
/// 新房间默认门宽（米）
pub const DEFAULT_DOOR_WIDTH_M: f64 = 0.9;

/// 房间的部分更新，`None` 表示不修改该字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub shape: Option<RoomShape>,
    pub shape_data: Option<ShapeData>,
    pub x_m: Option<f64>,
    pub y_m: Option<f64>,
    pub width_m: Option<f64>,
    pub height_m: Option<f64>,
}

impl RoomPatch {
    pub fn size(width_m: f64, height_m: f64) -> Self {
        Self {
            width_m: Some(width_m),
            height_m: Some(height_m),
            ..Default::default()
        }
    }

    pub fn width(width_m: f64) -> Self {
        Self {
            width_m: Some(width_m),
            ..Default::default()
        }
    }

    pub fn height(height_m: f64) -> Self {
        Self {
            height_m: Some(height_m),
            ..Default::default()
        }
    }
}

pub(crate) fn room_mut<'a>(layout: &'a mut Layout, room_id: &str) -> std::result::Result<&'a mut Room, ValidationError> {
    layout
        .rooms
        .iter_mut()
        .find(|r| r.id == room_id)
        .ok_or_else(|| ValidationError::RoomNotFound(room_id.to_string()))
}

fn check_dimension(room_id: &str, field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveDimension {
            room_id: room_id.to_string(),
            field,
            value,
        })
    }
}

fn check_coordinate(field: &'static str, value: f64) -> std::result::Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value.max(0.0))
    } else {
        Err(ValidationError::NonFiniteCoordinate { field, value })
    }
}

/// 追加一个 4m × 4m 的默认房间（南墙正中一扇 0.9m 单开门），放在现有布局的右侧
pub fn add_room(layout: &Layout) -> Layout {
    add_room_with_id(layout, uuid::Uuid::new_v4().to_string())
}

/// 同 [`add_room`]，使用给定的房间 ID
pub fn add_room_with_id(layout: &Layout, room_id: impl Into<String>) -> Layout {
    let mut next = layout.clone();
    let name = format!("Room {}", next.rooms.len() + 1);
    let mut room = Room::new(
        room_id,
        name,
        next.total_width_m,
        0.0,
        DEFAULT_ROOM_SIZE_M,
        DEFAULT_ROOM_SIZE_M,
        next.scale_px_per_m,
    );
    room.doors.push(Door::new(Wall::South, 0.5, DEFAULT_DOOR_WIDTH_M));
    tracing::debug!(room_id = %room.id, x_m = room.x_m, "room added");
    next.rooms.push(room);
    next.recompute_extents();
    next
}

/// 删除房间，总尺寸按剩余房间重新计算（没有房间时为 0）
pub fn remove_room(layout: &Layout, room_id: &str) -> Result<Layout> {
    let mut next = layout.clone();
    let index = next
        .room_index(room_id)
        .ok_or_else(|| ValidationError::RoomNotFound(room_id.to_string()))?;
    next.rooms.remove(index);
    next.recompute_extents();
    Ok(next)
}

/// 合并房间字段
///
/// - 尺寸变化：重新计算像素字段和面积，家具收回到新边界内；
///   新墙长导致门窗重叠时拒绝
/// - 形状变化：`shape_data` 重置为空（同一补丁里给出的 `shape_data` 除外）
pub fn update_room(layout: &Layout, room_id: &str, patch: &RoomPatch) -> Result<Layout> {
    let mut next = layout.clone();
    let scale = next.scale_px_per_m;
    let room = room_mut(&mut next, room_id)?;

    let width = patch
        .width_m
        .map(|w| check_dimension(room_id, "width_m", w))
        .transpose()?;
    let height = patch
        .height_m
        .map(|h| check_dimension(room_id, "height_m", h))
        .transpose()?;
    let x = patch.x_m.map(|x| check_coordinate("x_m", x)).transpose()?;
    let y = patch.y_m.map(|y| check_coordinate("y_m", y)).transpose()?;

    if let Some(name) = &patch.name {
        room.name = name.clone();
    }
    if let Some(room_type) = patch.room_type {
        room.room_type = room_type;
    }
    match patch.shape {
        Some(shape) if shape != room.shape => {
            room.shape = shape;
            room.shape_data = patch.shape_data.clone().unwrap_or_default();
        }
        _ => {
            if let Some(data) = &patch.shape_data {
                room.shape_data = data.clone();
            }
        }
    }
    if let Some(x) = x {
        room.x_m = x;
    }
    if let Some(y) = y {
        room.y_m = y;
    }

    let resized = width.is_some_and(|w| w != room.width_m) || height.is_some_and(|h| h != room.height_m);
    if let Some(w) = width {
        room.width_m = w;
    }
    if let Some(h) = height {
        room.height_m = h;
    }
    room.sync_derived(scale);

    if resized {
        furniture::refit_all(room);
        validator::first_conflict(room)?;
    }

    next.recompute_extents();
    Ok(next)
}

/// 移动房间，坐标不小于 0
pub fn move_room(layout: &Layout, room_id: &str, x_m: f64, y_m: f64) -> Result<Layout> {
    let x = check_coordinate("x_m", x_m)?;
    let y = check_coordinate("y_m", y_m)?;
    let mut next = layout.clone();
    let scale = next.scale_px_per_m;
    let room = room_mut(&mut next, room_id)?;
    room.x_m = x;
    room.y_m = y;
    room.sync_derived(scale);
    next.recompute_extents();
    Ok(next)
}
