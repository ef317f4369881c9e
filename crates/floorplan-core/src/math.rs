//! 数学基础类型
//!
//! 基于 nalgebra 的 `f64` 点/向量别名，以及布局计算中反复用到的小工具函数。

use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;
pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-9;

/// 四舍五入到两位小数（面积、总尺寸都按这个精度保存）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 把值限制在 `[min, max]`，区间为空时取 `min`，NaN 取 `min`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let max = max.max(min);
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 由左上角和尺寸构造
    pub fn from_origin_size(origin: Point2, width: f64, height: f64) -> Self {
        Self {
            min: origin,
            max: Point2::new(origin.x + width, origin.y + height),
        }
    }

    /// 点是否在盒内（含边界）
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(16.0), 16.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.345_6), 2.35);
    }

    #[test]
    fn test_clamp_handles_empty_range_and_nan() {
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, -1.0), 0.0);
        assert_eq!(clamp(f64::NAN, 1.0, 3.0), 1.0);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox2::new(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0));
        assert_eq!(bbox, BoundingBox2::from_origin_size(Point2::new(1.0, 2.0), 2.0, 2.0));
        assert!(bbox.contains(&Point2::new(2.0, 3.0)));
        assert!(!bbox.contains(&Point2::new(0.0, 3.0)));
    }
}
