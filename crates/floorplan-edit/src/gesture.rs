//! 拖拽与缩放手势
//!
//! 手势在指针按下时记录目标的起始值 ([`Origin`])，之后每次移动都把
//! 累计位移作用到起始布局快照上，而不是在上一步结果上叠加。
//! 被拒绝的一步不会破坏后续步骤的计算基准。

use crate::error::{EditError, Result};
use crate::gestures;
use floorplan_core::error::ValidationError;
use floorplan_core::hit::{EntityKind, EntityRef};
use floorplan_core::math::Vector2;
use floorplan_core::model::{Layout, OpeningKind, Wall};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 缩放手柄
///
/// 方位手柄用于房间和家具的包围盒，`Start`/`End` 用于门窗沿墙的两端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Start,
    End,
}

impl Handle {
    pub fn moves_north(&self) -> bool {
        matches!(self, Handle::North | Handle::NorthEast | Handle::NorthWest)
    }

    pub fn moves_south(&self) -> bool {
        matches!(self, Handle::South | Handle::SouthEast | Handle::SouthWest)
    }

    pub fn moves_east(&self) -> bool {
        matches!(self, Handle::East | Handle::NorthEast | Handle::SouthEast)
    }

    pub fn moves_west(&self) -> bool {
        matches!(self, Handle::West | Handle::NorthWest | Handle::SouthWest)
    }

    /// 是否是包围盒上的方位手柄
    pub fn is_box_handle(&self) -> bool {
        !self.is_opening_handle()
    }

    pub fn is_opening_handle(&self) -> bool {
        matches!(self, Handle::Start | Handle::End)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Handle::North => "north",
            Handle::South => "south",
            Handle::East => "east",
            Handle::West => "west",
            Handle::NorthEast => "north-east",
            Handle::NorthWest => "north-west",
            Handle::SouthEast => "south-east",
            Handle::SouthWest => "south-west",
            Handle::Start => "start",
            Handle::End => "end",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 手势类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "gesture", content = "handle", rename_all = "snake_case")]
pub enum GestureKind {
    /// 拖动整体（门窗为沿墙滑动）
    Drag,
    /// 拖动某个手柄
    Resize(Handle),
}

impl GestureKind {
    /// 该手势能否作用于给定种类的实体
    pub fn supports(&self, kind: EntityKind) -> bool {
        match (self, kind) {
            (GestureKind::Drag, _) => true,
            (GestureKind::Resize(handle), EntityKind::Room | EntityKind::Furniture) => handle.is_box_handle(),
            (GestureKind::Resize(handle), EntityKind::Door | EntityKind::Window) => handle.is_opening_handle(),
        }
    }

    pub fn handle(&self) -> Option<Handle> {
        match self {
            GestureKind::Drag => None,
            GestureKind::Resize(handle) => Some(*handle),
        }
    }
}

/// 轴对齐矩形（单位由使用者决定：房间为米，家具为像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn translated(&self, delta: Vector2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// 按手柄移动对应的边，对边保持不动；尺寸不小于 `min_size`
    pub fn resized(&self, handle: Handle, delta: Vector2, min_size: f64) -> Self {
        let mut out = *self;
        if handle.moves_west() {
            out.width = (self.width - delta.x).max(min_size);
            out.x = self.x + self.width - out.width;
        } else if handle.moves_east() {
            out.width = (self.width + delta.x).max(min_size);
        }
        if handle.moves_north() {
            out.height = (self.height - delta.y).max(min_size);
            out.y = self.y + self.height - out.height;
        } else if handle.moves_south() {
            out.height = (self.height + delta.y).max(min_size);
        }
        out
    }

    /// 把越过原点的左/上边收回到 0，右/下边保持不动
    pub fn clip_to_origin(&self) -> Self {
        let mut out = *self;
        if out.x < 0.0 {
            out.width += out.x;
            out.x = 0.0;
        }
        if out.y < 0.0 {
            out.height += out.y;
            out.y = 0.0;
        }
        out
    }
}

/// 手势开始时目标的几何值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// 房间位置和尺寸（米）
    Room { rect: Rect },
    /// 家具位置和尺寸（房间局部像素）
    Furniture { rect: Rect },
    /// 门窗所在墙、中心位置（墙长比例）和宽度（米）
    Opening {
        wall: Wall,
        position: f64,
        width_m: f64,
        wall_length_m: f64,
    },
}

impl Origin {
    /// 从布局中读取目标当前的几何值
    pub fn capture(layout: &Layout, target: &EntityRef) -> Result<Self> {
        let room = layout
            .room(target.room_id())
            .ok_or_else(|| ValidationError::RoomNotFound(target.room_id().to_string()))?;

        let origin = match target {
            EntityRef::Room { .. } => Origin::Room {
                rect: Rect::new(room.x_m, room.y_m, room.width_m, room.height_m),
            },
            EntityRef::Furniture { furniture_id, .. } => {
                let item = room.furniture(furniture_id).ok_or_else(|| ValidationError::FurnitureNotFound {
                    room_id: room.id.clone(),
                    furniture_id: furniture_id.clone(),
                })?;
                Origin::Furniture {
                    rect: Rect::new(item.x_px, item.y_px, item.width_px, item.height_px),
                }
            }
            EntityRef::Door { index, .. } | EntityRef::Window { index, .. } => {
                let kind = opening_kind(target);
                let span = room
                    .opening_span(kind, *index)
                    .ok_or_else(|| ValidationError::OpeningNotFound {
                        room_id: room.id.clone(),
                        kind,
                        index: *index,
                    })?;
                Origin::Opening {
                    wall: span.wall,
                    position: span.position,
                    width_m: span.width_m,
                    wall_length_m: room.wall_length(span.wall),
                }
            }
        };
        Ok(origin)
    }

    /// 起始值的种类是否与目标一致
    pub fn belongs_to(&self, target: &EntityRef) -> bool {
        matches!(
            (self, target.kind()),
            (Origin::Room { .. }, EntityKind::Room)
                | (Origin::Furniture { .. }, EntityKind::Furniture)
                | (Origin::Opening { .. }, EntityKind::Door | EntityKind::Window)
        )
    }
}

pub(crate) fn opening_kind(target: &EntityRef) -> OpeningKind {
    match target {
        EntityRef::Window { .. } => OpeningKind::Window,
        _ => OpeningKind::Door,
    }
}

/// 把累计位移（画布像素）作用到起始布局上
pub fn apply(start: &Layout, target: &EntityRef, kind: GestureKind, origin: &Origin, delta: Vector2) -> Result<Layout> {
    if !kind.supports(target.kind()) {
        return Err(unsupported(target, kind));
    }
    if !origin.belongs_to(target) {
        return Err(EditError::StaleTarget(target.clone()));
    }

    match (kind, origin) {
        (GestureKind::Drag, Origin::Room { rect }) => gestures::room::drag(start, target.room_id(), rect, delta),
        (GestureKind::Resize(handle), Origin::Room { rect }) => {
            gestures::room::resize(start, target.room_id(), rect, handle, delta)
        }
        (GestureKind::Drag, Origin::Furniture { rect }) => gestures::furniture::drag(start, target, rect, delta),
        (GestureKind::Resize(handle), Origin::Furniture { rect }) => {
            gestures::furniture::resize(start, target, rect, handle, delta)
        }
        (GestureKind::Drag, Origin::Opening { .. }) => gestures::opening::slide(start, target, origin, delta),
        (GestureKind::Resize(handle), Origin::Opening { .. }) => {
            gestures::opening::resize(start, target, origin, handle, delta)
        }
    }
}

fn unsupported(target: &EntityRef, kind: GestureKind) -> EditError {
    match kind.handle() {
        Some(handle) => EditError::UnsupportedHandle {
            kind: target.kind(),
            handle,
        },
        None => EditError::StaleTarget(target.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resize_west_keeps_east_edge() {
        let rect = Rect::new(10.0, 10.0, 50.0, 30.0).resized(Handle::West, Vector2::new(20.0, 99.0), 10.0);
        assert_relative_eq!(rect.x, 30.0);
        assert_relative_eq!(rect.width, 30.0);
        assert_relative_eq!(rect.height, 30.0);
        assert_relative_eq!(rect.x + rect.width, 60.0);
    }

    #[test]
    fn test_resize_corner_respects_minimum() {
        let rect = Rect::new(0.0, 0.0, 50.0, 30.0).resized(Handle::NorthWest, Vector2::new(100.0, 100.0), 10.0);
        assert_relative_eq!(rect.width, 10.0);
        assert_relative_eq!(rect.height, 10.0);
        assert_relative_eq!(rect.x, 40.0);
        assert_relative_eq!(rect.y, 20.0);

        let rect = Rect::new(0.0, 0.0, 50.0, 30.0).resized(Handle::SouthEast, Vector2::new(5.0, -5.0), 10.0);
        assert_relative_eq!(rect.width, 55.0);
        assert_relative_eq!(rect.height, 25.0);
    }

    #[test]
    fn test_gesture_support() {
        assert!(GestureKind::Drag.supports(EntityKind::Window));
        assert!(GestureKind::Resize(Handle::East).supports(EntityKind::Room));
        assert!(!GestureKind::Resize(Handle::East).supports(EntityKind::Door));
        assert!(GestureKind::Resize(Handle::Start).supports(EntityKind::Door));
        assert!(!GestureKind::Resize(Handle::End).supports(EntityKind::Furniture));
    }
}
