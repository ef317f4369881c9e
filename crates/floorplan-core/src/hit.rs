//! 点击测试
//!
//! 把画布坐标映射到其下方的实体。优先级：家具 > 门窗 > 房间；
//! 同类实体重叠时后绘制的（列表中靠后的）在上层。

use crate::math::{BoundingBox2, Point2};
use crate::model::{Layout, OpeningKind, OpeningSpan, Room, Wall};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 门窗命中时垂直于墙面的容差（像素）
pub const OPENING_HIT_TOLERANCE_PX: f64 = 6.0;

/// 实体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Room,
    Furniture,
    Door,
    Window,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Room => "room",
            EntityKind::Furniture => "furniture",
            EntityKind::Door => "door",
            EntityKind::Window => "window",
        };
        f.write_str(name)
    }
}

/// 对布局中某个实体的引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    Room { room_id: String },
    Furniture { room_id: String, furniture_id: String },
    Door { room_id: String, index: usize },
    Window { room_id: String, index: usize },
}

impl EntityRef {
    pub fn room(room_id: impl Into<String>) -> Self {
        EntityRef::Room {
            room_id: room_id.into(),
        }
    }

    pub fn furniture(room_id: impl Into<String>, furniture_id: impl Into<String>) -> Self {
        EntityRef::Furniture {
            room_id: room_id.into(),
            furniture_id: furniture_id.into(),
        }
    }

    pub fn door(room_id: impl Into<String>, index: usize) -> Self {
        EntityRef::Door {
            room_id: room_id.into(),
            index,
        }
    }

    pub fn window(room_id: impl Into<String>, index: usize) -> Self {
        EntityRef::Window {
            room_id: room_id.into(),
            index,
        }
    }

    pub fn opening(kind: OpeningKind, room_id: impl Into<String>, index: usize) -> Self {
        match kind {
            OpeningKind::Door => Self::door(room_id, index),
            OpeningKind::Window => Self::window(room_id, index),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Room { .. } => EntityKind::Room,
            EntityRef::Furniture { .. } => EntityKind::Furniture,
            EntityRef::Door { .. } => EntityKind::Door,
            EntityRef::Window { .. } => EntityKind::Window,
        }
    }

    pub fn room_id(&self) -> &str {
        match self {
            EntityRef::Room { room_id }
            | EntityRef::Furniture { room_id, .. }
            | EntityRef::Door { room_id, .. }
            | EntityRef::Window { room_id, .. } => room_id,
        }
    }

    /// 引用的实体在布局中是否仍然存在
    pub fn exists_in(&self, layout: &Layout) -> bool {
        let Some(room) = layout.room(self.room_id()) else {
            return false;
        };
        match self {
            EntityRef::Room { .. } => true,
            EntityRef::Furniture { furniture_id, .. } => room.furniture(furniture_id).is_some(),
            EntityRef::Door { index, .. } => *index < room.doors.len(),
            EntityRef::Window { index, .. } => *index < room.windows.len(),
        }
    }
}

/// 门窗在房间局部像素坐标下的可点击区域
pub fn opening_bounds(room: &Room, span: &OpeningSpan, scale_px_per_m: f64, tolerance: f64) -> BoundingBox2 {
    let along = span.position * room.wall_length_px(span.wall);
    let half = span.width_m * scale_px_per_m / 2.0;
    let (center, horizontal) = match span.wall {
        Wall::North => (Point2::new(along, 0.0), true),
        Wall::South => (Point2::new(along, room.height_px), true),
        Wall::West => (Point2::new(0.0, along), false),
        Wall::East => (Point2::new(room.width_px, along), false),
    };
    let (hx, hy) = if horizontal { (half, tolerance) } else { (tolerance, half) };
    BoundingBox2::new(
        Point2::new(center.x - hx, center.y - hy),
        Point2::new(center.x + hx, center.y + hy),
    )
}

/// 查找画布坐标下最上层的实体
pub fn hit_test(layout: &Layout, canvas: Point2) -> Option<EntityRef> {
    let transform = layout.transform();

    for room in layout.rooms.iter().rev() {
        let local = transform.canvas_to_room(room, canvas);
        if let Some(item) = room
            .furniture_items
            .iter()
            .rev()
            .find(|item| item.bounds().contains(&local))
        {
            return Some(EntityRef::furniture(&room.id, &item.id));
        }
    }

    for room in layout.rooms.iter().rev() {
        let local = transform.canvas_to_room(room, canvas);
        let hit = room
            .openings()
            .filter(|(_, _, span)| {
                opening_bounds(room, span, layout.scale_px_per_m, OPENING_HIT_TOLERANCE_PX).contains(&local)
            })
            .last();
        if let Some((kind, index, _)) = hit {
            return Some(EntityRef::opening(kind, &room.id, index));
        }
    }

    layout
        .rooms
        .iter()
        .rev()
        .find(|room| transform.room_bounds_canvas(room).contains(&canvas))
        .map(|room| EntityRef::room(&room.id))
}
