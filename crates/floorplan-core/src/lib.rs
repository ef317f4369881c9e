//! 户型图核心几何引擎
//!
//! 提供户型数据模型、米/像素坐标变换、门窗重叠校验、布局变更和二维到三维的拉伸。
//!
//! # 架构设计
//!
//! 布局 (`Layout`) 是不可变值：
//! - `mutator`: 每个操作接收旧布局、返回新布局，失败时旧布局保持不变
//! - `validator`: 只回答门窗是否重叠，由 `mutator` 用作关卡
//! - `extrude`: 纯函数，把布局快照转换为三维盒体
//!
//! 核心不做任何 I/O，不持有全局状态。
//!
//! # 示例
//!
//! ```rust
//! use floorplan_core::prelude::*;
//!
//! let layout = mutator::add_room_with_id(&Layout::default(), "living");
//! assert_eq!(layout.rooms[0].area_m2, 16.0);
//!
//! // 同一位置再加一扇门会被拒绝
//! let result = mutator::add_door(&layout, "living", Door::new(Wall::South, 0.5, 0.9));
//! assert!(result.is_err());
//!
//! let model = extrude(&layout);
//! assert!(model.walls.iter().all(|w| w.is_external));
//! ```

pub mod error;
pub mod extrude;
pub mod furniture;
pub mod hit;
pub mod math;
pub mod model;
pub mod mutator;
pub mod shape;
pub mod transform;
pub mod validator;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::{LayoutError, OverlapError, ValidationError};
    pub use crate::extrude::{extrude, extrude_with, CachedExtruder, ExtrudeConfig, Layout3D, WallPart};
    pub use crate::furniture::FurnitureKind;
    pub use crate::hit::{hit_test, EntityKind, EntityRef};
    pub use crate::math::{Point2, Point3, Vector2, Vector3};
    pub use crate::model::{
        Door, DoorType, FurnitureItem, Layout, OpeningKind, OpeningSpan, Room, RoomShape, RoomType, Wall,
        Window,
    };
    pub use crate::mutator::{self, RoomPatch};
    pub use crate::shape::{Shape, ShapeData};
    pub use crate::transform::CoordinateTransform;
}
