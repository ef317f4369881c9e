//! 家具变更
//!
//! 家具使用房间局部像素坐标，任何操作之后包围盒都必须完全落在房间内。

use super::room_mut;
use crate::error::{Result, ValidationError};
use crate::furniture::FurnitureKind;
use crate::math::clamp;
use crate::model::{FurnitureItem, Layout, Room, FURNITURE_MIN_SIZE_PX};

fn item_mut<'a>(room: &'a mut Room, furniture_id: &str) -> std::result::Result<&'a mut FurnitureItem, ValidationError> {
    let room_id = room.id.clone();
    room.furniture_items
        .iter_mut()
        .find(|f| f.id == furniture_id)
        .ok_or_else(|| ValidationError::FurnitureNotFound {
            room_id,
            furniture_id: furniture_id.to_string(),
        })
}

/// 把家具收回房间：先缩小到不超过房间，再平移进来
fn refit(item: &mut FurnitureItem, room_width: f64, room_height: f64) {
    item.width_px = item.width_px.min(room_width);
    item.height_px = item.height_px.min(room_height);
    item.x_px = clamp(item.x_px, 0.0, room_width - item.width_px);
    item.y_px = clamp(item.y_px, 0.0, room_height - item.height_px);
}

/// 房间尺寸变化后重新约束所有家具
pub(super) fn refit_all(room: &mut Room) {
    let (width, height) = (room.width_px, room.height_px);
    for item in &mut room.furniture_items {
        refit(item, width, height);
    }
}

/// 在房间中央放置一件默认尺寸的家具（尺寸超出房间时缩小）
pub fn add_furniture(layout: &Layout, room_id: &str, kind: FurnitureKind) -> Result<Layout> {
    add_furniture_with_id(layout, room_id, kind, uuid::Uuid::new_v4().to_string())
}

/// 同 [`add_furniture`]，使用给定的家具 ID
pub fn add_furniture_with_id(
    layout: &Layout,
    room_id: &str,
    kind: FurnitureKind,
    furniture_id: impl Into<String>,
) -> Result<Layout> {
    let mut next = layout.clone();
    let transform = next.transform();
    let room = room_mut(&mut next, room_id)?;

    let spec = kind.spec();
    let width = transform.to_pixels(spec.width_m).min(room.width_px);
    let height = transform.to_pixels(spec.depth_m).min(room.height_px);
    room.furniture_items.push(FurnitureItem {
        id: furniture_id.into(),
        kind,
        x_px: (room.width_px - width) / 2.0,
        y_px: (room.height_px - height) / 2.0,
        width_px: width,
        height_px: height,
    });
    Ok(next)
}

/// 按 ID 删除家具
pub fn remove_furniture(layout: &Layout, room_id: &str, furniture_id: &str) -> Result<Layout> {
    let mut next = layout.clone();
    let room = room_mut(&mut next, room_id)?;
    let before = room.furniture_items.len();
    room.furniture_items.retain(|f| f.id != furniture_id);
    if room.furniture_items.len() == before {
        return Err(ValidationError::FurnitureNotFound {
            room_id: room_id.to_string(),
            furniture_id: furniture_id.to_string(),
        }
        .into());
    }
    Ok(next)
}

/// 移动家具，位置限制在 `[0, 房间 - 家具]`
pub fn move_furniture(
    layout: &Layout,
    room_id: &str,
    furniture_id: &str,
    new_x: f64,
    new_y: f64,
) -> Result<Layout> {
    let mut next = layout.clone();
    let room = room_mut(&mut next, room_id)?;
    let (room_width, room_height) = (room.width_px, room.height_px);
    let item = item_mut(room, furniture_id)?;
    item.x_px = clamp(new_x, 0.0, room_width - item.width_px);
    item.y_px = clamp(new_y, 0.0, room_height - item.height_px);
    Ok(next)
}

/// 调整家具位置和尺寸
///
/// 尺寸不小于 10px；位置先限制在房间内，尺寸再收缩到不越过房间右/下边界，
/// 越界时缩小家具而不是把它移出房间。
pub fn resize_furniture(
    layout: &Layout,
    room_id: &str,
    furniture_id: &str,
    new_x: f64,
    new_y: f64,
    new_width: f64,
    new_height: f64,
) -> Result<Layout> {
    let mut next = layout.clone();
    let room = room_mut(&mut next, room_id)?;
    let (room_width, room_height) = (room.width_px, room.height_px);
    let item = item_mut(room, furniture_id)?;

    let width = new_width.max(FURNITURE_MIN_SIZE_PX);
    let height = new_height.max(FURNITURE_MIN_SIZE_PX);
    let x = clamp(new_x, 0.0, room_width - FURNITURE_MIN_SIZE_PX);
    let y = clamp(new_y, 0.0, room_height - FURNITURE_MIN_SIZE_PX);

    item.x_px = x;
    item.y_px = y;
    item.width_px = width.min(room_width - x);
    item.height_px = height.min(room_height - y);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::{add_room_with_id, update_room, RoomPatch};
    use approx::assert_relative_eq;

    /// 200×200 像素的房间，内有一件 50×35 的家具在 (10, 10)
    fn room_with_item() -> Layout {
        let layout = add_room_with_id(&Layout::default(), "a");
        let mut layout = add_furniture_with_id(&layout, "a", FurnitureKind::Armchair, "f").unwrap();
        let item = &mut layout.rooms[0].furniture_items[0];
        item.x_px = 10.0;
        item.y_px = 10.0;
        item.width_px = 50.0;
        item.height_px = 35.0;
        layout
    }

    #[test]
    fn test_add_furniture_is_centered() {
        let layout = add_room_with_id(&Layout::default(), "a");
        let layout = add_furniture_with_id(&layout, "a", FurnitureKind::Sofa, "sofa").unwrap();
        let room = &layout.rooms[0];
        let sofa = room.furniture("sofa").unwrap();
        // 2.0m × 0.9m @ 50px/m
        assert_relative_eq!(sofa.width_px, 100.0);
        assert_relative_eq!(sofa.height_px, 45.0);
        assert_relative_eq!(sofa.x_px, 50.0);
        assert_relative_eq!(sofa.y_px, 77.5);
    }

    #[test]
    fn test_add_furniture_shrinks_to_room() {
        let layout = add_room_with_id(&Layout::default(), "a");
        let layout = update_room(&layout, "a", &RoomPatch::size(1.0, 1.0)).unwrap();
        let layout = add_furniture_with_id(&layout, "a", FurnitureKind::KitchenCounter, "k").unwrap();
        let item = layout.rooms[0].furniture("k").unwrap();
        assert_relative_eq!(item.width_px, 50.0);
        assert_relative_eq!(item.x_px, 0.0);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_add_furniture_unknown_room() {
        let layout = add_room_with_id(&Layout::default(), "a");
        assert!(add_furniture(&layout, "nope", FurnitureKind::Desk).is_err());
    }

    #[test]
    fn test_remove_furniture() {
        let layout = remove_furniture(&room_with_item(), "a", "f").unwrap();
        assert!(layout.rooms[0].furniture_items.is_empty());
        assert!(remove_furniture(&layout, "a", "f").is_err());
    }

    #[test]
    fn test_move_furniture_stays_inside() {
        let layout = room_with_item();
        for (x, y) in [(-50.0, -1.0), (500.0, 500.0), (75.0, 20.0), (f64::NAN, 165.0)] {
            let next = move_furniture(&layout, "a", "f", x, y).unwrap();
            let room = &next.rooms[0];
            let item = room.furniture("f").unwrap();
            assert!(item.x_px >= 0.0 && item.x_px <= room.width_px - item.width_px);
            assert!(item.y_px >= 0.0 && item.y_px <= room.height_px - item.height_px);
        }
        let next = move_furniture(&layout, "a", "f", 500.0, 500.0).unwrap();
        let item = next.rooms[0].furniture("f").unwrap();
        assert_eq!((item.x_px, item.y_px), (150.0, 165.0));
    }

    #[test]
    fn test_resize_furniture_shrinks_instead_of_moving() {
        let layout = resize_furniture(&room_with_item(), "a", "f", 10.0, 10.0, 250.0, 35.0).unwrap();
        let item = layout.rooms[0].furniture("f").unwrap();
        assert_eq!(item.x_px, 10.0);
        assert_eq!(item.width_px, 190.0);
        assert_eq!(item.height_px, 35.0);
    }

    #[test]
    fn test_resize_furniture_enforces_minimum() {
        let layout = resize_furniture(&room_with_item(), "a", "f", 10.0, 10.0, 2.0, -5.0).unwrap();
        let item = layout.rooms[0].furniture("f").unwrap();
        assert_eq!((item.width_px, item.height_px), (10.0, 10.0));
    }

    #[test]
    fn test_resize_furniture_clamps_position() {
        let layout = resize_furniture(&room_with_item(), "a", "f", 300.0, -20.0, 50.0, 50.0).unwrap();
        let room = &layout.rooms[0];
        let item = room.furniture("f").unwrap();
        assert_eq!(item.x_px, 190.0);
        assert_eq!(item.width_px, 10.0);
        assert_eq!(item.y_px, 0.0);
        assert!(item.fits_in(room.width_px, room.height_px));
    }
}
