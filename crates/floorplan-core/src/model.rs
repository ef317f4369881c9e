//! 户型数据模型
//!
//! - 布局 (Layout)：总尺寸、比例、房间列表
//! - 房间 (Room)：位置和尺寸（米），派生的像素字段，门、窗、家具
//! - 门/窗 (Door / Window)：所在墙面和墙面比例位置
//! - 家具 (FurnitureItem)：房间局部像素坐标
//!
//! 像素字段都由米制字段乘以比例得到，只能通过变更层维护，不能单独编辑。
//! JSON 结构与外部持久化接口一致（`width_m`、`x_m`、`shape_data` 等）。

use crate::error::{LayoutError, ValidationError};
use crate::furniture::FurnitureKind;
use crate::math::{round2, BoundingBox2, Point2};
use crate::shape::{Shape, ShapeData};
use crate::transform::CoordinateTransform;
use crate::validator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 门窗位置下限（墙面比例），避免开口贴近墙角
pub const OPENING_POSITION_MIN: f64 = 0.15;
/// 门窗位置上限（墙面比例）
pub const OPENING_POSITION_MAX: f64 = 0.85;
/// 门宽范围（米）
pub const DOOR_WIDTH_MIN_M: f64 = 0.6;
pub const DOOR_WIDTH_MAX_M: f64 = 2.5;
/// 窗宽范围（米）
pub const WINDOW_WIDTH_MIN_M: f64 = 0.5;
pub const WINDOW_WIDTH_MAX_M: f64 = 3.0;
/// 家具最小边长（像素）
pub const FURNITURE_MIN_SIZE_PX: f64 = 10.0;

/// 缺省比例（像素/米）
pub const DEFAULT_SCALE_PX_PER_M: f64 = 50.0;
/// 缺省画布留白（像素）
pub const DEFAULT_PADDING_PX: f64 = 40.0;

/// 房间类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Living,
    Kitchen,
    Bedroom,
    MasterBedroom,
    Bathroom,
    Dining,
    Corridor,
    Entrance,
    Storage,
    Office,
    Balcony,
    #[default]
    Other,
}

/// 房间形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomShape {
    #[default]
    Rectangle,
    LShape,
    Triangle,
    Trapezoid,
    Pentagon,
    Hexagon,
    CustomPolygon,
}

/// 墙面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];

    /// 南北墙沿 x 轴延伸
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Wall::North | Wall::South)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Wall::North => "north",
            Wall::South => "south",
            Wall::East => "east",
            Wall::West => "west",
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 开口种类（门或窗，重叠判断时二者等同）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// 允许的宽度范围（米）
    pub fn width_range(&self) -> (f64, f64) {
        match self {
            OpeningKind::Door => (DOOR_WIDTH_MIN_M, DOOR_WIDTH_MAX_M),
            OpeningKind::Window => (WINDOW_WIDTH_MIN_M, WINDOW_WIDTH_MAX_M),
        }
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningKind::Door => f.write_str("door"),
            OpeningKind::Window => f.write_str("window"),
        }
    }
}

/// 门类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorType {
    #[default]
    Single,
    Double,
}

/// 门
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub wall: Wall,
    /// 墙面比例位置（开口中心）
    pub position: f64,
    pub width_m: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub door_type: Option<DoorType>,
}

impl Door {
    pub fn new(wall: Wall, position: f64, width_m: f64) -> Self {
        Self {
            wall,
            position,
            width_m,
            door_type: Some(DoorType::Single),
        }
    }

    pub fn span(&self) -> OpeningSpan {
        OpeningSpan::new(self.wall, self.position, self.width_m)
    }
}

/// 窗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub wall: Wall,
    pub position: f64,
    pub width_m: f64,
}

impl Window {
    pub fn new(wall: Wall, position: f64, width_m: f64) -> Self {
        Self {
            wall,
            position,
            width_m,
        }
    }

    pub fn span(&self) -> OpeningSpan {
        OpeningSpan::new(self.wall, self.position, self.width_m)
    }
}

/// 开口在墙面上的位置与宽度，门窗共用
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningSpan {
    pub wall: Wall,
    pub position: f64,
    pub width_m: f64,
}

impl OpeningSpan {
    pub fn new(wall: Wall, position: f64, width_m: f64) -> Self {
        Self {
            wall,
            position,
            width_m,
        }
    }

    /// 检查位置和宽度是否在该种开口的允许范围内
    pub fn check_range(&self, kind: OpeningKind) -> Result<(), ValidationError> {
        if !(OPENING_POSITION_MIN..=OPENING_POSITION_MAX).contains(&self.position) {
            return Err(ValidationError::PositionOutOfRange {
                kind,
                value: self.position,
                min: OPENING_POSITION_MIN,
                max: OPENING_POSITION_MAX,
            });
        }
        let (min, max) = kind.width_range();
        if !(min..=max).contains(&self.width_m) {
            return Err(ValidationError::WidthOutOfRange {
                kind,
                value: self.width_m,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// 家具（房间局部像素坐标）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    #[serde(rename = "x")]
    pub x_px: f64,
    #[serde(rename = "y")]
    pub y_px: f64,
    #[serde(rename = "width")]
    pub width_px: f64,
    #[serde(rename = "height")]
    pub height_px: f64,
}

impl FurnitureItem {
    pub fn bounds(&self) -> BoundingBox2 {
        BoundingBox2::from_origin_size(Point2::new(self.x_px, self.y_px), self.width_px, self.height_px)
    }

    /// 是否完全位于 `room_width × room_height` 的房间内
    pub fn fits_in(&self, room_width: f64, room_height: f64) -> bool {
        const TOLERANCE: f64 = 1e-6;
        self.x_px >= -TOLERANCE
            && self.y_px >= -TOLERANCE
            && self.x_px + self.width_px <= room_width + TOLERANCE
            && self.y_px + self.height_px <= room_height + TOLERANCE
    }
}

/// 房间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub shape: RoomShape,
    pub shape_data: ShapeData,
    pub x_m: f64,
    pub y_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    pub area_m2: f64,
    pub x_px: f64,
    pub y_px: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub doors: Vec<Door>,
    pub windows: Vec<Window>,
    pub furniture_items: Vec<FurnitureItem>,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            room_type: RoomType::Other,
            shape: RoomShape::Rectangle,
            shape_data: ShapeData::default(),
            x_m: 0.0,
            y_m: 0.0,
            width_m: 0.0,
            height_m: 0.0,
            area_m2: 0.0,
            x_px: 0.0,
            y_px: 0.0,
            width_px: 0.0,
            height_px: 0.0,
            doors: Vec::new(),
            windows: Vec::new(),
            furniture_items: Vec::new(),
        }
    }
}

impl Room {
    /// 创建矩形房间，派生字段按 `scale_px_per_m` 计算
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        x_m: f64,
        y_m: f64,
        width_m: f64,
        height_m: f64,
        scale_px_per_m: f64,
    ) -> Self {
        let mut room = Self {
            id: id.into(),
            name: name.into(),
            x_m,
            y_m,
            width_m,
            height_m,
            ..Default::default()
        };
        room.sync_derived(scale_px_per_m);
        room
    }

    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// 重新计算像素字段和面积
    pub fn sync_derived(&mut self, scale_px_per_m: f64) {
        self.x_px = self.x_m * scale_px_per_m;
        self.y_px = self.y_m * scale_px_per_m;
        self.width_px = self.width_m * scale_px_per_m;
        self.height_px = self.height_m * scale_px_per_m;
        self.area_m2 = round2(self.width_m * self.height_m);
    }

    /// 宽高是否为正的有限数
    pub fn has_valid_dimensions(&self) -> bool {
        self.width_m.is_finite() && self.width_m > 0.0 && self.height_m.is_finite() && self.height_m > 0.0
    }

    /// 墙长（米）
    pub fn wall_length(&self, wall: Wall) -> f64 {
        if wall.is_horizontal() {
            self.width_m
        } else {
            self.height_m
        }
    }

    /// 墙长（像素）
    pub fn wall_length_px(&self, wall: Wall) -> f64 {
        if wall.is_horizontal() {
            self.width_px
        } else {
            self.height_px
        }
    }

    pub fn opening_count(&self, kind: OpeningKind) -> usize {
        match kind {
            OpeningKind::Door => self.doors.len(),
            OpeningKind::Window => self.windows.len(),
        }
    }

    pub fn opening_span(&self, kind: OpeningKind, index: usize) -> Option<OpeningSpan> {
        match kind {
            OpeningKind::Door => self.doors.get(index).map(Door::span),
            OpeningKind::Window => self.windows.get(index).map(Window::span),
        }
    }

    /// 按顺序列出所有开口：先门后窗
    pub fn openings(&self) -> impl Iterator<Item = (OpeningKind, usize, OpeningSpan)> + '_ {
        let doors = self
            .doors
            .iter()
            .enumerate()
            .map(|(i, d)| (OpeningKind::Door, i, d.span()));
        let windows = self
            .windows
            .iter()
            .enumerate()
            .map(|(i, w)| (OpeningKind::Window, i, w.span()));
        doors.chain(windows)
    }

    pub fn furniture(&self, furniture_id: &str) -> Option<&FurnitureItem> {
        self.furniture_items.iter().find(|f| f.id == furniture_id)
    }

    /// 带参数的形状
    pub fn tagged_shape(&self) -> Shape {
        Shape::from_parts(self.shape, &self.shape_data)
    }

    /// 房间轮廓顶点（房间局部像素坐标）
    pub fn polygon(&self) -> Vec<Point2> {
        self.tagged_shape().vertices(self.width_px, self.height_px)
    }
}

/// 户型布局
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub total_width_m: f64,
    pub total_height_m: f64,
    pub total_width_px: f64,
    pub total_height_px: f64,
    pub scale_px_per_m: f64,
    pub padding_px: f64,
    /// 指北方向（度），仅供渲染使用
    pub north_direction: f64,
    pub rooms: Vec<Room>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_PX_PER_M, DEFAULT_PADDING_PX)
    }
}

impl Layout {
    /// 创建空布局
    pub fn new(scale_px_per_m: f64, padding_px: f64) -> Self {
        Self {
            total_width_m: 0.0,
            total_height_m: 0.0,
            total_width_px: 0.0,
            total_height_px: 0.0,
            scale_px_per_m,
            padding_px,
            north_direction: 0.0,
            rooms: Vec::new(),
        }
    }

    /// 由房间列表创建布局，派生字段全部重新计算
    pub fn with_rooms(scale_px_per_m: f64, padding_px: f64, rooms: Vec<Room>) -> Self {
        let mut layout = Self::new(scale_px_per_m, padding_px);
        layout.rooms = rooms;
        layout.normalize();
        layout
    }

    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.scale_px_per_m, self.padding_px)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn room_index(&self, room_id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == room_id)
    }

    /// 所有房间的最大外延（米，未取整）
    pub fn extents(&self) -> (f64, f64) {
        self.rooms
            .iter()
            .filter(|r| r.has_valid_dimensions() && r.x_m.is_finite() && r.y_m.is_finite())
            .fold((0.0_f64, 0.0_f64), |(w, h), r| {
                (w.max(r.x_m + r.width_m), h.max(r.y_m + r.height_m))
            })
    }

    /// 重新计算总尺寸（取两位小数）和像素总尺寸
    pub fn recompute_extents(&mut self) {
        let (width, height) = self.extents();
        self.total_width_m = round2(width);
        self.total_height_m = round2(height);
        self.total_width_px = self.total_width_m * self.scale_px_per_m;
        self.total_height_px = self.total_height_m * self.scale_px_per_m;
    }

    /// 就地重新计算所有派生字段，不改动用户输入的值
    pub(crate) fn normalize(&mut self) {
        let scale = self.scale_px_per_m;
        for room in &mut self.rooms {
            room.sync_derived(scale);
        }
        self.recompute_extents();
    }

    /// 返回派生字段全部重新计算后的副本
    pub fn normalized(&self) -> Layout {
        let mut layout = self.clone();
        layout.normalize();
        layout
    }

    /// 检查整个布局是否满足所有不变量，返回遇到的第一个违规
    pub fn validate(&self) -> Result<(), LayoutError> {
        const TOLERANCE: f64 = 1e-6;

        if !(self.scale_px_per_m.is_finite() && self.scale_px_per_m > 0.0) {
            return Err(ValidationError::InvalidScale(self.scale_px_per_m).into());
        }

        let mut ids = HashSet::new();
        for room in &self.rooms {
            if !ids.insert(room.id.as_str()) {
                return Err(ValidationError::DuplicateRoomId(room.id.clone()).into());
            }

            for (field, value) in [("width_m", room.width_m), ("height_m", room.height_m)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ValidationError::NonPositiveDimension {
                        room_id: room.id.clone(),
                        field,
                        value,
                    }
                    .into());
                }
            }

            let expected_area = round2(room.width_m * room.height_m);
            if (room.area_m2 - expected_area).abs() > TOLERANCE {
                return Err(ValidationError::StaleDerivedField {
                    room_id: room.id.clone(),
                    field: "area_m2",
                    expected: expected_area,
                    actual: room.area_m2,
                }
                .into());
            }

            let scale = self.scale_px_per_m;
            for (field, meters, pixels) in [
                ("x_px", room.x_m, room.x_px),
                ("y_px", room.y_m, room.y_px),
                ("width_px", room.width_m, room.width_px),
                ("height_px", room.height_m, room.height_px),
            ] {
                if (meters * scale - pixels).abs() > TOLERANCE {
                    return Err(ValidationError::StaleDerivedField {
                        room_id: room.id.clone(),
                        field,
                        expected: meters * scale,
                        actual: pixels,
                    }
                    .into());
                }
            }

            for (kind, _, span) in room.openings() {
                span.check_range(kind)?;
            }
            validator::first_conflict(room)?;

            for item in &room.furniture_items {
                if !item.fits_in(room.width_px, room.height_px) {
                    return Err(ValidationError::FurnitureOutOfBounds {
                        room_id: room.id.clone(),
                        furniture_id: item.id.clone(),
                    }
                    .into());
                }
            }
        }

        let (width, height) = self.extents();
        for (field, expected, actual) in [
            ("total_width_m", round2(width), self.total_width_m),
            ("total_height_m", round2(height), self.total_height_m),
        ] {
            if (expected - actual).abs() > TOLERANCE {
                return Err(ValidationError::StaleExtents {
                    field,
                    expected,
                    actual,
                }
                .into());
            }
        }

        Ok(())
    }
}
