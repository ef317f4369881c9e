//! 二维 → 三维拉伸
//!
//! 把平面布局转换为三维渲染器使用的盒体：楼板、墙段、门窗洞口和家具。
//!
//! 坐标系（米）：x 向东，y 向上，z 向南；布局平面的 `(x, y)` 对应三维的 `(x, z)`。
//!
//! 拉伸是纯函数：相同的输入总是得到结构相同的输出，调用方可以按输入身份缓存结果
//! （见 [`CachedExtruder`]）。几何字段非法的房间会被跳过，不会中断整个转换。

use crate::furniture::FurnitureKind;
use crate::math::{Point2, Point3, Vector3, EPSILON};
use crate::model::{Layout, OpeningKind, Room, RoomType, Wall};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 判断墙段是否位于外轮廓上的容差（米）
const PERIMETER_TOLERANCE_M: f64 = 0.01;

/// 拉伸参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeConfig {
    pub wall_height_m: f64,
    pub wall_thickness_m: f64,
    pub floor_thickness_m: f64,
    pub door_height_m: f64,
    pub window_sill_m: f64,
    pub window_height_m: f64,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            wall_height_m: 2.7,
            wall_thickness_m: 0.12,
            floor_thickness_m: 0.05,
            door_height_m: 2.1,
            window_sill_m: 0.9,
            window_height_m: 1.2,
        }
    }
}

/// 轴对齐盒体
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub center: Point3,
    pub size: Vector3,
}

impl Box3 {
    pub fn new(center: Point3, size: Vector3) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Point3 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Point3 {
        self.center + self.size / 2.0
    }
}

/// 楼板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSlab {
    pub room_id: String,
    pub room_type: RoomType,
    pub bounds: Box3,
    /// 房间轮廓（世界坐标 x/z，米）
    pub outline: Vec<Point2>,
}

/// 墙段在竖直方向上的部位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallPart {
    /// 落地到顶的整段墙
    Full,
    /// 门窗上方的过梁
    Lintel,
    /// 窗下的窗台墙
    Sill,
}

/// 墙段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub room_id: String,
    pub wall: Wall,
    pub part: WallPart,
    pub bounds: Box3,
    /// 沿墙方向的长度（米）
    pub length_m: f64,
    pub is_external: bool,
}

/// 门窗洞口（供渲染器做布尔减运算或放置门窗模型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningCutout {
    pub room_id: String,
    pub kind: OpeningKind,
    pub index: usize,
    pub wall: Wall,
    pub bounds: Box3,
}

/// 家具摆放
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurniturePlacement {
    pub room_id: String,
    pub furniture_id: String,
    pub kind: FurnitureKind,
    pub bounds: Box3,
}

/// 拉伸结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout3D {
    pub width_m: f64,
    pub depth_m: f64,
    pub wall_height_m: f64,
    pub floors: Vec<FloorSlab>,
    pub walls: Vec<WallSegment>,
    pub openings: Vec<OpeningCutout>,
    pub furniture: Vec<FurniturePlacement>,
}

/// 使用默认参数拉伸
pub fn extrude(layout: &Layout) -> Layout3D {
    extrude_with(layout, &ExtrudeConfig::default())
}

/// 按给定参数拉伸
pub fn extrude_with(layout: &Layout, config: &ExtrudeConfig) -> Layout3D {
    let (width, depth) = layout.extents();
    let mut out = Layout3D {
        width_m: width,
        depth_m: depth,
        wall_height_m: config.wall_height_m,
        ..Default::default()
    };

    for room in &layout.rooms {
        if !is_extrudable(room) {
            tracing::debug!(room_id = %room.id, "skipping room with invalid geometry");
            continue;
        }
        out.floors.push(floor(room, layout.scale_px_per_m, config));
        for wall in Wall::ALL {
            walls(room, wall, (width, depth), config, &mut out);
        }
        furniture(room, layout.scale_px_per_m, &mut out);
    }

    out
}

fn is_extrudable(room: &Room) -> bool {
    room.has_valid_dimensions() && room.x_m.is_finite() && room.y_m.is_finite()
}

fn floor(room: &Room, scale: f64, config: &ExtrudeConfig) -> FloorSlab {
    let t = config.floor_thickness_m;
    let bounds = Box3::new(
        Point3::new(room.x_m + room.width_m / 2.0, -t / 2.0, room.y_m + room.height_m / 2.0),
        Vector3::new(room.width_m, t, room.height_m),
    );
    // 与平面渲染共用同一组像素顶点，再换算成米
    let outline = if scale.is_finite() && scale > 0.0 {
        room.polygon()
            .into_iter()
            .map(|p| Point2::new(room.x_m + p.x / scale, room.y_m + p.y / scale))
            .collect()
    } else {
        tracing::debug!(room_id = %room.id, scale, "skipping floor outline: invalid scale");
        Vec::new()
    };
    FloorSlab {
        room_id: room.id.clone(),
        room_type: room.room_type,
        bounds,
        outline,
    }
}

/// 墙线：起点（世界 x/z）和沿墙方向
struct WallLine {
    origin: Point2,
    horizontal: bool,
    length: f64,
}

impl WallLine {
    fn of(room: &Room, wall: Wall) -> Self {
        let (x, z, w, h) = (room.x_m, room.y_m, room.width_m, room.height_m);
        let origin = match wall {
            Wall::North => Point2::new(x, z),
            Wall::South => Point2::new(x, z + h),
            Wall::West => Point2::new(x, z),
            Wall::East => Point2::new(x + w, z),
        };
        Self {
            origin,
            horizontal: wall.is_horizontal(),
            length: room.wall_length(wall),
        }
    }

    /// 沿墙区间 `[a, b]`、竖直区间 `[y0, y1]` 对应的盒体
    fn slab(&self, a: f64, b: f64, y0: f64, y1: f64, thickness: f64) -> Box3 {
        let mid = (a + b) / 2.0;
        let (cx, cz, sx, sz) = if self.horizontal {
            (self.origin.x + mid, self.origin.y, b - a, thickness)
        } else {
            (self.origin.x, self.origin.y + mid, thickness, b - a)
        };
        Box3::new(
            Point3::new(cx, (y0 + y1) / 2.0, cz),
            Vector3::new(sx, y1 - y0, sz),
        )
    }

    /// 是否位于布局外轮廓上
    fn is_external(&self, (width, depth): (f64, f64)) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= PERIMETER_TOLERANCE_M;
        if self.horizontal {
            near(self.origin.y, 0.0) || near(self.origin.y, depth)
        } else {
            near(self.origin.x, 0.0) || near(self.origin.x, width)
        }
    }
}

/// 门窗在墙上占据的区间及竖直范围
struct Gap {
    kind: OpeningKind,
    index: usize,
    start: f64,
    end: f64,
    bottom: f64,
    top: f64,
}

fn walls(room: &Room, wall: Wall, extents: (f64, f64), config: &ExtrudeConfig, out: &mut Layout3D) {
    let line = WallLine::of(room, wall);
    let is_external = line.is_external(extents);
    let height = config.wall_height_m;
    let thickness = config.wall_thickness_m;

    let mut gaps: Vec<Gap> = room
        .openings()
        .filter(|(_, _, span)| span.wall == wall)
        .filter(|(_, _, span)| span.position.is_finite() && span.width_m.is_finite() && span.width_m > 0.0)
        .map(|(kind, index, span)| {
            let center = span.position * line.length;
            let half = span.width_m.min(line.length) / 2.0;
            let (bottom, top) = match kind {
                OpeningKind::Door => (0.0, config.door_height_m.min(height)),
                OpeningKind::Window => {
                    let sill = config.window_sill_m.min(height);
                    (sill, (sill + config.window_height_m).min(height))
                }
            };
            Gap {
                kind,
                index,
                start: (center - half).max(0.0),
                end: (center + half).min(line.length),
                bottom,
                top,
            }
        })
        .filter(|gap| gap.end - gap.start > EPSILON)
        .collect();
    gaps.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut push = |part: WallPart, a: f64, b: f64, y0: f64, y1: f64| {
        if b - a > EPSILON && y1 - y0 > EPSILON {
            out.walls.push(WallSegment {
                room_id: room.id.clone(),
                wall,
                part,
                bounds: line.slab(a, b, y0, y1, thickness),
                length_m: b - a,
                is_external,
            });
        }
    };

    // 整段墙：洞口之间的空隙
    let mut cursor = 0.0_f64;
    for gap in &gaps {
        push(WallPart::Full, cursor, gap.start, 0.0, height);
        cursor = cursor.max(gap.end);
    }
    push(WallPart::Full, cursor, line.length, 0.0, height);

    // 洞口上下的过梁和窗台
    for gap in &gaps {
        push(WallPart::Sill, gap.start, gap.end, 0.0, gap.bottom);
        push(WallPart::Lintel, gap.start, gap.end, gap.top, height);
    }

    for gap in gaps {
        out.openings.push(OpeningCutout {
            room_id: room.id.clone(),
            kind: gap.kind,
            index: gap.index,
            wall,
            bounds: line.slab(gap.start, gap.end, gap.bottom, gap.top, thickness),
        });
    }
}

fn furniture(room: &Room, scale: f64, out: &mut Layout3D) {
    if !(scale.is_finite() && scale > 0.0) {
        tracing::debug!(room_id = %room.id, scale, "skipping furniture: invalid scale");
        return;
    }
    let to_m = |px: f64| px / scale;
    for item in &room.furniture_items {
        let values = [item.x_px, item.y_px, item.width_px, item.height_px];
        if values.iter().any(|v| !v.is_finite()) {
            tracing::debug!(furniture_id = %item.id, "skipping furniture with invalid geometry");
            continue;
        }
        let height = item.kind.spec().height_m;
        let center = Point3::new(
            room.x_m + to_m(item.x_px + item.width_px / 2.0),
            height / 2.0,
            room.y_m + to_m(item.y_px + item.height_px / 2.0),
        );
        out.furniture.push(FurniturePlacement {
            room_id: room.id.clone(),
            furniture_id: item.id.clone(),
            kind: item.kind,
            bounds: Box3::new(center, Vector3::new(to_m(item.width_px), height, to_m(item.height_px))),
        });
    }
}

/// 按输入身份缓存拉伸结果
///
/// 布局是不可变值，只要调用方传入的还是同一个 `Arc`，结果就一定相同。
#[derive(Debug, Default)]
pub struct CachedExtruder {
    config: ExtrudeConfig,
    last: Option<(Arc<Layout>, Arc<Layout3D>)>,
}

impl CachedExtruder {
    pub fn new(config: ExtrudeConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &ExtrudeConfig {
        &self.config
    }

    pub fn extrude(&mut self, layout: &Arc<Layout>) -> Arc<Layout3D> {
        if let Some((input, output)) = &self.last {
            if Arc::ptr_eq(input, layout) {
                return Arc::clone(output);
            }
        }
        let output = Arc::new(extrude_with(layout, &self.config));
        self.last = Some((Arc::clone(layout), Arc::clone(&output)));
        output
    }
}
