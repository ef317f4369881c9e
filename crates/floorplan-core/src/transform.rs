//! 坐标变换
//!
//! 物理空间（米）与设备空间（像素）之间的换算，以及房间局部坐标与画布坐标之间的换算。
//! 渲染层额外加的偏移（例如标题栏高度）不属于这里的职责。

use crate::math::{BoundingBox2, Point2, Vector2};
use crate::model::Room;
use serde::{Deserialize, Serialize};

/// 无状态的坐标变换，由比例和画布留白确定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTransform {
    pub scale_px_per_m: f64,
    pub padding_px: f64,
}

impl CoordinateTransform {
    pub fn new(scale_px_per_m: f64, padding_px: f64) -> Self {
        Self {
            scale_px_per_m,
            padding_px,
        }
    }

    /// 米 → 像素
    pub fn to_pixels(&self, meters: f64) -> f64 {
        meters * self.scale_px_per_m
    }

    /// 像素 → 米
    pub fn to_meters(&self, px: f64) -> f64 {
        px / self.scale_px_per_m
    }

    pub fn vector_to_meters(&self, v: Vector2) -> Vector2 {
        v / self.scale_px_per_m
    }

    /// 房间局部坐标 → 画布坐标
    pub fn room_to_canvas(&self, room: &Room, local: Point2) -> Point2 {
        Point2::new(
            self.padding_px + room.x_px + local.x,
            self.padding_px + room.y_px + local.y,
        )
    }

    /// 画布坐标 → 房间局部坐标（`room_to_canvas` 的逆变换）
    pub fn canvas_to_room(&self, room: &Room, canvas: Point2) -> Point2 {
        Point2::new(
            canvas.x - self.padding_px - room.x_px,
            canvas.y - self.padding_px - room.y_px,
        )
    }

    /// 房间在画布上的包围盒
    pub fn room_bounds_canvas(&self, room: &Room) -> BoundingBox2 {
        BoundingBox2::from_origin_size(
            self.room_to_canvas(room, Point2::origin()),
            room.width_px,
            room.height_px,
        )
    }
}
