//! 家具目录
//!
//! 每种家具有默认的平面尺寸（宽 × 深，米）和三维高度（米）。
//! 平面尺寸在放置时按布局比例换算为像素，高度只在三维拉伸时使用。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 家具类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Sofa,
    Armchair,
    CoffeeTable,
    TvStand,
    DiningTable,
    DiningChair,
    BedSingle,
    BedDouble,
    Nightstand,
    Wardrobe,
    Dresser,
    Desk,
    OfficeChair,
    Bookshelf,
    KitchenCounter,
    Refrigerator,
    Stove,
    Sink,
    Toilet,
    Bathtub,
    Shower,
    WashingMachine,
}

/// 家具默认尺寸（米）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnitureSpec {
    pub width_m: f64,
    pub depth_m: f64,
    pub height_m: f64,
}

impl FurnitureSpec {
    const fn new(width_m: f64, depth_m: f64, height_m: f64) -> Self {
        Self {
            width_m,
            depth_m,
            height_m,
        }
    }
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 22] = [
        FurnitureKind::Sofa,
        FurnitureKind::Armchair,
        FurnitureKind::CoffeeTable,
        FurnitureKind::TvStand,
        FurnitureKind::DiningTable,
        FurnitureKind::DiningChair,
        FurnitureKind::BedSingle,
        FurnitureKind::BedDouble,
        FurnitureKind::Nightstand,
        FurnitureKind::Wardrobe,
        FurnitureKind::Dresser,
        FurnitureKind::Desk,
        FurnitureKind::OfficeChair,
        FurnitureKind::Bookshelf,
        FurnitureKind::KitchenCounter,
        FurnitureKind::Refrigerator,
        FurnitureKind::Stove,
        FurnitureKind::Sink,
        FurnitureKind::Toilet,
        FurnitureKind::Bathtub,
        FurnitureKind::Shower,
        FurnitureKind::WashingMachine,
    ];

    /// 默认尺寸
    pub fn spec(&self) -> FurnitureSpec {
        match self {
            FurnitureKind::Sofa => FurnitureSpec::new(2.0, 0.9, 0.85),
            FurnitureKind::Armchair => FurnitureSpec::new(0.8, 0.8, 0.9),
            FurnitureKind::CoffeeTable => FurnitureSpec::new(1.1, 0.6, 0.45),
            FurnitureKind::TvStand => FurnitureSpec::new(1.6, 0.45, 0.5),
            FurnitureKind::DiningTable => FurnitureSpec::new(1.6, 0.9, 0.75),
            FurnitureKind::DiningChair => FurnitureSpec::new(0.45, 0.5, 0.9),
            FurnitureKind::BedSingle => FurnitureSpec::new(1.0, 2.0, 0.5),
            FurnitureKind::BedDouble => FurnitureSpec::new(1.6, 2.0, 0.5),
            FurnitureKind::Nightstand => FurnitureSpec::new(0.5, 0.4, 0.55),
            FurnitureKind::Wardrobe => FurnitureSpec::new(1.5, 0.6, 2.1),
            FurnitureKind::Dresser => FurnitureSpec::new(1.2, 0.5, 0.8),
            FurnitureKind::Desk => FurnitureSpec::new(1.2, 0.6, 0.75),
            FurnitureKind::OfficeChair => FurnitureSpec::new(0.6, 0.6, 1.1),
            FurnitureKind::Bookshelf => FurnitureSpec::new(0.9, 0.35, 1.9),
            FurnitureKind::KitchenCounter => FurnitureSpec::new(2.4, 0.6, 0.9),
            FurnitureKind::Refrigerator => FurnitureSpec::new(0.7, 0.7, 1.8),
            FurnitureKind::Stove => FurnitureSpec::new(0.6, 0.6, 0.9),
            FurnitureKind::Sink => FurnitureSpec::new(0.6, 0.5, 0.9),
            FurnitureKind::Toilet => FurnitureSpec::new(0.4, 0.7, 0.8),
            FurnitureKind::Bathtub => FurnitureSpec::new(1.7, 0.75, 0.6),
            FurnitureKind::Shower => FurnitureSpec::new(0.9, 0.9, 2.1),
            FurnitureKind::WashingMachine => FurnitureSpec::new(0.6, 0.6, 0.85),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Armchair => "armchair",
            FurnitureKind::CoffeeTable => "coffee_table",
            FurnitureKind::TvStand => "tv_stand",
            FurnitureKind::DiningTable => "dining_table",
            FurnitureKind::DiningChair => "dining_chair",
            FurnitureKind::BedSingle => "bed_single",
            FurnitureKind::BedDouble => "bed_double",
            FurnitureKind::Nightstand => "nightstand",
            FurnitureKind::Wardrobe => "wardrobe",
            FurnitureKind::Dresser => "dresser",
            FurnitureKind::Desk => "desk",
            FurnitureKind::OfficeChair => "office_chair",
            FurnitureKind::Bookshelf => "bookshelf",
            FurnitureKind::KitchenCounter => "kitchen_counter",
            FurnitureKind::Refrigerator => "refrigerator",
            FurnitureKind::Stove => "stove",
            FurnitureKind::Sink => "sink",
            FurnitureKind::Toilet => "toilet",
            FurnitureKind::Bathtub => "bathtub",
            FurnitureKind::Shower => "shower",
            FurnitureKind::WashingMachine => "washing_machine",
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
