//! 房间轮廓
//!
//! 房间的 `shape` 枚举加上 `shape_data` 参数组合成一个带标签的 [`Shape`]，
//! 每种形状对应一个纯函数，统一输出房间局部像素坐标下的多边形顶点。
//!
//! 所有形状函数都是全函数：参数缺失或非法时退化为默认的规则形状，从不 panic。

use crate::math::{clamp, Point2, EPSILON};
use crate::model::RoomShape;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// L 形缺角位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// 三角形顶点朝向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// 形状参数（序列化为 `shape_data`，未设置的字段不输出）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_width_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_height_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_position: Option<CutPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<TriangleDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_width_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point2>>,
}

impl ShapeData {
    pub fn is_empty(&self) -> bool {
        *self == ShapeData::default()
    }
}

/// 带参数的房间形状
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle,
    LShape {
        cut_width: Option<f64>,
        cut_height: Option<f64>,
        cut_position: CutPosition,
    },
    Triangle {
        direction: TriangleDirection,
    },
    Trapezoid {
        top_width: Option<f64>,
    },
    Pentagon {
        points: Option<Vec<Point2>>,
    },
    Hexagon {
        points: Option<Vec<Point2>>,
    },
    CustomPolygon {
        points: Option<Vec<Point2>>,
    },
}

impl Shape {
    /// 由形状枚举和参数组合
    pub fn from_parts(shape: RoomShape, data: &ShapeData) -> Self {
        match shape {
            RoomShape::Rectangle => Shape::Rectangle,
            RoomShape::LShape => Shape::LShape {
                cut_width: data.cut_width_px,
                cut_height: data.cut_height_px,
                cut_position: data.cut_position.unwrap_or_default(),
            },
            RoomShape::Triangle => Shape::Triangle {
                direction: data.direction.unwrap_or_default(),
            },
            RoomShape::Trapezoid => Shape::Trapezoid {
                top_width: data.top_width_px,
            },
            RoomShape::Pentagon => Shape::Pentagon {
                points: data.points.clone(),
            },
            RoomShape::Hexagon => Shape::Hexagon {
                points: data.points.clone(),
            },
            RoomShape::CustomPolygon => Shape::CustomPolygon {
                points: data.points.clone(),
            },
        }
    }

    /// 计算多边形顶点（房间局部像素坐标，顺时针，y 轴向下）
    pub fn vertices(&self, width: f64, height: f64) -> Vec<Point2> {
        let w = sanitize(width);
        let h = sanitize(height);
        match self {
            Shape::Rectangle => rectangle(w, h),
            Shape::LShape {
                cut_width,
                cut_height,
                cut_position,
            } => l_shape(w, h, *cut_width, *cut_height, *cut_position),
            Shape::Triangle { direction } => triangle(w, h, *direction),
            Shape::Trapezoid { top_width } => trapezoid(w, h, *top_width),
            Shape::Pentagon { points } => explicit_or(points.as_deref(), || regular_polygon(w, h, 5)),
            Shape::Hexagon { points } => explicit_or(points.as_deref(), || regular_polygon(w, h, 6)),
            Shape::CustomPolygon { points } => explicit_or(points.as_deref(), || rectangle(w, h)),
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 矩形
pub fn rectangle(w: f64, h: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
}

/// L 形：从包围盒的一个角切掉 `cut_w × cut_h`
///
/// 缺省切掉右上角的四分之一；切口不在盒内时退化为矩形。
pub fn l_shape(
    w: f64,
    h: f64,
    cut_w: Option<f64>,
    cut_h: Option<f64>,
    position: CutPosition,
) -> Vec<Point2> {
    let cw = clamp(cut_w.filter(|v| v.is_finite()).unwrap_or(w / 2.0), 0.0, w);
    let ch = clamp(cut_h.filter(|v| v.is_finite()).unwrap_or(h / 2.0), 0.0, h);
    if cw <= EPSILON || ch <= EPSILON || cw >= w - EPSILON || ch >= h - EPSILON {
        return rectangle(w, h);
    }

    let p = Point2::new;
    match position {
        CutPosition::TopRight => vec![
            p(0.0, 0.0),
            p(w - cw, 0.0),
            p(w - cw, ch),
            p(w, ch),
            p(w, h),
            p(0.0, h),
        ],
        CutPosition::TopLeft => vec![
            p(cw, 0.0),
            p(w, 0.0),
            p(w, h),
            p(0.0, h),
            p(0.0, ch),
            p(cw, ch),
        ],
        CutPosition::BottomRight => vec![
            p(0.0, 0.0),
            p(w, 0.0),
            p(w, h - ch),
            p(w - cw, h - ch),
            p(w - cw, h),
            p(0.0, h),
        ],
        CutPosition::BottomLeft => vec![
            p(0.0, 0.0),
            p(w, 0.0),
            p(w, h),
            p(cw, h),
            p(cw, h - ch),
            p(0.0, h - ch),
        ],
    }
}

/// 三角形：顶点位于 `direction` 所指那条边的中点
pub fn triangle(w: f64, h: f64, direction: TriangleDirection) -> Vec<Point2> {
    let p = Point2::new;
    match direction {
        TriangleDirection::Up => vec![p(w / 2.0, 0.0), p(w, h), p(0.0, h)],
        TriangleDirection::Down => vec![p(0.0, 0.0), p(w, 0.0), p(w / 2.0, h)],
        TriangleDirection::Left => vec![p(0.0, h / 2.0), p(w, 0.0), p(w, h)],
        TriangleDirection::Right => vec![p(0.0, 0.0), p(w, h / 2.0), p(0.0, h)],
    }
}

/// 梯形：上底居中，缺省为宽度的 60%
pub fn trapezoid(w: f64, h: f64, top_width: Option<f64>) -> Vec<Point2> {
    let top = clamp(top_width.filter(|v| v.is_finite()).unwrap_or(w * 0.6), 0.0, w);
    let inset = (w - top) / 2.0;
    vec![
        Point2::new(inset, 0.0),
        Point2::new(w - inset, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
}

/// 内接于包围盒的正多边形，第一个顶点朝上
pub fn regular_polygon(w: f64, h: f64, sides: usize) -> Vec<Point2> {
    let sides = sides.max(3);
    let (cx, cy) = (w / 2.0, h / 2.0);
    (0..sides)
        .map(|i| {
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / sides as f64;
            Point2::new(cx + cx * angle.cos(), cy + cy * angle.sin())
        })
        .collect()
}

/// 使用显式顶点（至少三个有限点），否则退回 `fallback`
fn explicit_or(points: Option<&[Point2]>, fallback: impl FnOnce() -> Vec<Point2>) -> Vec<Point2> {
    match points {
        Some(points) => {
            let finite: Vec<Point2> = points
                .iter()
                .copied()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .collect();
            if finite.len() >= 3 {
                finite
            } else {
                fallback()
            }
        }
        None => fallback(),
    }
}

/// 多边形面积（鞋带公式，取绝对值）
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}
