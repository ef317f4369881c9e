//! 布局操作错误定义
//!
//! 所有错误都是可恢复的拒绝：操作不生效，调用方手里的旧布局保持不变。

use crate::model::{OpeningKind, Wall};
use thiserror::Error;

/// 布局操作的顶层错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Overlap(#[from] OverlapError),
}

impl LayoutError {
    pub fn is_overlap(&self) -> bool {
        matches!(self, LayoutError::Overlap(_))
    }
}

/// 结构性约束被破坏
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("room {room_id}: {field} must be a positive finite number, got {value}")]
    NonPositiveDimension {
        room_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },

    #[error("{kind} position {value} is out of range [{min}, {max}]")]
    PositionOutOfRange {
        kind: OpeningKind,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{kind} width {value} m is out of range [{min}, {max}]")]
    WidthOutOfRange {
        kind: OpeningKind,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("furniture {furniture_id} lies outside room {room_id}")]
    FurnitureOutOfBounds {
        room_id: String,
        furniture_id: String,
    },

    #[error("room {room_id}: stored {field} {actual} does not match derived value {expected}")]
    StaleDerivedField {
        room_id: String,
        field: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("layout {field} {actual} does not match derived value {expected}")]
    StaleExtents {
        field: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("invalid scale: {0} px/m")]
    InvalidScale(f64),

    #[error("duplicate room id: {0}")]
    DuplicateRoomId(String),

    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("{kind} #{index} not found in room {room_id}")]
    OpeningNotFound {
        room_id: String,
        kind: OpeningKind,
        index: usize,
    },

    #[error("furniture {furniture_id} not found in room {room_id}")]
    FurnitureNotFound {
        room_id: String,
        furniture_id: String,
    },
}

/// 门窗在同一面墙上发生重叠
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {position} ({width_m} m) on the {wall} wall of room {room_id} overlaps an existing opening")]
pub struct OverlapError {
    pub room_id: String,
    pub wall: Wall,
    pub kind: OpeningKind,
    pub position: f64,
    pub width_m: f64,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
