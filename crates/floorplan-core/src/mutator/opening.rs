//! 门窗变更
//!
//! 新增和修改都先检查位置/宽度范围，再交给重叠校验器把关；
//! 修改已有开口时校验器排除它自身的下标。

use super::room_mut;
use crate::error::{Result, ValidationError};
use crate::math::clamp;
use crate::model::{
    Door, Layout, OpeningKind, OpeningSpan, Room, Window, OPENING_POSITION_MAX, OPENING_POSITION_MIN,
};
use crate::validator;

/// 范围检查 + 重叠检查，通过后由 `write` 写入房间
fn commit(
    layout: &Layout,
    room_id: &str,
    kind: OpeningKind,
    span: OpeningSpan,
    index: Option<usize>,
    write: impl FnOnce(&mut Room),
) -> Result<Layout> {
    let mut next = layout.clone();
    let room = room_mut(&mut next, room_id)?;

    if let Some(index) = index {
        if index >= room.opening_count(kind) {
            return Err(ValidationError::OpeningNotFound {
                room_id: room_id.to_string(),
                kind,
                index,
            }
            .into());
        }
    }

    span.check_range(kind)?;
    if let Err(err) = validator::check(room, &span, kind, index) {
        tracing::debug!("{}", err);
        return Err(err.into());
    }

    write(room);
    Ok(next)
}

fn existing(layout: &Layout, room_id: &str, kind: OpeningKind, index: usize) -> Result<OpeningSpan> {
    let room = layout
        .room(room_id)
        .ok_or_else(|| ValidationError::RoomNotFound(room_id.to_string()))?;
    room.opening_span(kind, index).ok_or_else(|| {
        ValidationError::OpeningNotFound {
            room_id: room_id.to_string(),
            kind,
            index,
        }
        .into()
    })
}

/// 新增门
pub fn add_door(layout: &Layout, room_id: &str, door: Door) -> Result<Layout> {
    commit(layout, room_id, OpeningKind::Door, door.span(), None, |room| {
        room.doors.push(door)
    })
}

/// 新增窗
pub fn add_window(layout: &Layout, room_id: &str, window: Window) -> Result<Layout> {
    commit(layout, room_id, OpeningKind::Window, window.span(), None, |room| {
        room.windows.push(window)
    })
}

/// 替换第 `index` 扇门（可以换墙）
pub fn update_door(layout: &Layout, room_id: &str, index: usize, door: Door) -> Result<Layout> {
    commit(layout, room_id, OpeningKind::Door, door.span(), Some(index), |room| {
        room.doors[index] = door
    })
}

/// 替换第 `index` 扇窗（可以换墙）
pub fn update_window(layout: &Layout, room_id: &str, index: usize, window: Window) -> Result<Layout> {
    commit(layout, room_id, OpeningKind::Window, window.span(), Some(index), |room| {
        room.windows[index] = window
    })
}

fn remove(layout: &Layout, room_id: &str, kind: OpeningKind, index: usize) -> Result<Layout> {
    let mut next = layout.clone();
    let room = room_mut(&mut next, room_id)?;
    if index >= room.opening_count(kind) {
        return Err(ValidationError::OpeningNotFound {
            room_id: room_id.to_string(),
            kind,
            index,
        }
        .into());
    }
    match kind {
        OpeningKind::Door => {
            room.doors.remove(index);
        }
        OpeningKind::Window => {
            room.windows.remove(index);
        }
    }
    Ok(next)
}

/// 删除第 `index` 扇门
pub fn remove_door(layout: &Layout, room_id: &str, index: usize) -> Result<Layout> {
    remove(layout, room_id, OpeningKind::Door, index)
}

/// 删除第 `index` 扇窗
pub fn remove_window(layout: &Layout, room_id: &str, index: usize) -> Result<Layout> {
    remove(layout, room_id, OpeningKind::Window, index)
}

/// 把位置和宽度限制到该种开口的允许范围
fn clamp_span(kind: OpeningKind, wall_span: OpeningSpan, position: f64, width_m: f64) -> OpeningSpan {
    let (min, max) = kind.width_range();
    OpeningSpan::new(
        wall_span.wall,
        clamp(position, OPENING_POSITION_MIN, OPENING_POSITION_MAX),
        clamp(width_m, min, max),
    )
}

/// 调整门的位置和宽度：宽度限制在 [0.6, 2.5] 米，位置限制在 [0.15, 0.85]，再做重叠校验
pub fn resize_door(
    layout: &Layout,
    room_id: &str,
    index: usize,
    new_position: f64,
    new_width_m: f64,
) -> Result<Layout> {
    let current = existing(layout, room_id, OpeningKind::Door, index)?;
    let span = clamp_span(OpeningKind::Door, current, new_position, new_width_m);
    commit(layout, room_id, OpeningKind::Door, span, Some(index), |room| {
        let door = &mut room.doors[index];
        door.position = span.position;
        door.width_m = span.width_m;
    })
}

/// 调整窗的位置和宽度：宽度限制在 [0.5, 3.0] 米
pub fn resize_window(
    layout: &Layout,
    room_id: &str,
    index: usize,
    new_position: f64,
    new_width_m: f64,
) -> Result<Layout> {
    let current = existing(layout, room_id, OpeningKind::Window, index)?;
    let span = clamp_span(OpeningKind::Window, current, new_position, new_width_m);
    commit(layout, room_id, OpeningKind::Window, span, Some(index), |room| {
        let window = &mut room.windows[index];
        window.position = span.position;
        window.width_m = span.width_m;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::model::{DoorType, Wall};
    use crate::mutator::add_room_with_id;

    fn room_a() -> Layout {
        add_room_with_id(&Layout::default(), "a")
    }

    #[test]
    fn test_duplicate_door_is_rejected() {
        let layout = room_a();
        let err = add_door(&layout, "a", Door::new(Wall::South, 0.5, 0.9)).unwrap_err();
        assert!(err.is_overlap());
        assert_eq!(layout.rooms[0].doors.len(), 1);
    }

    #[test]
    fn test_add_window_on_free_wall() {
        let layout = add_window(&room_a(), "a", Window::new(Wall::North, 0.5, 1.2)).unwrap();
        assert_eq!(layout.rooms[0].windows.len(), 1);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_window_overlapping_door_is_rejected() {
        let err = add_window(&room_a(), "a", Window::new(Wall::South, 0.6, 1.0)).unwrap_err();
        assert!(matches!(err, LayoutError::Overlap(ref e) if e.kind == OpeningKind::Window));
    }

    #[test]
    fn test_add_rejects_out_of_range() {
        let err = add_door(&room_a(), "a", Door::new(Wall::North, 0.9, 0.9)).unwrap_err();
        assert!(matches!(err, LayoutError::Validation(ValidationError::PositionOutOfRange { .. })));
        let err = add_window(&room_a(), "a", Window::new(Wall::North, 0.5, 3.5)).unwrap_err();
        assert!(matches!(err, LayoutError::Validation(ValidationError::WidthOutOfRange { .. })));
    }

    #[test]
    fn test_update_door_excludes_itself() {
        let mut door = Door::new(Wall::South, 0.55, 1.0);
        door.door_type = Some(DoorType::Double);
        let layout = update_door(&room_a(), "a", 0, door.clone()).unwrap();
        assert_eq!(layout.rooms[0].doors, vec![door]);
    }

    #[test]
    fn test_update_door_to_other_wall() {
        let layout = add_window(&room_a(), "a", Window::new(Wall::East, 0.5, 1.0)).unwrap();
        let err = update_door(&layout, "a", 0, Door::new(Wall::East, 0.5, 0.9)).unwrap_err();
        assert!(err.is_overlap());
        let moved = update_door(&layout, "a", 0, Door::new(Wall::West, 0.5, 0.9)).unwrap();
        assert_eq!(moved.rooms[0].doors[0].wall, Wall::West);
    }

    #[test]
    fn test_update_missing_index() {
        let err = update_window(&room_a(), "a", 0, Window::new(Wall::North, 0.5, 1.0)).unwrap_err();
        assert!(matches!(err, LayoutError::Validation(ValidationError::OpeningNotFound { index: 0, .. })));
    }

    #[test]
    fn test_remove_opening() {
        let layout = remove_door(&room_a(), "a", 0).unwrap();
        assert!(layout.rooms[0].doors.is_empty());
        assert!(remove_window(&layout, "a", 0).is_err());
    }

    #[test]
    fn test_resize_door_clamps() {
        let layout = resize_door(&room_a(), "a", 0, 0.99, 9.0).unwrap();
        let door = &layout.rooms[0].doors[0];
        assert_eq!(door.position, OPENING_POSITION_MAX);
        assert_eq!(door.width_m, 2.5);
        assert_eq!(door.wall, Wall::South);

        let layout = resize_door(&layout, "a", 0, -1.0, 0.1).unwrap();
        let door = &layout.rooms[0].doors[0];
        assert_eq!((door.position, door.width_m), (OPENING_POSITION_MIN, 0.6));
    }

    #[test]
    fn test_resize_window_rejects_overlap() {
        let layout = add_window(&room_a(), "a", Window::new(Wall::South, 0.8, 0.5)).unwrap();
        let err = resize_window(&layout, "a", 0, 0.6, 1.0).unwrap_err();
        assert!(err.is_overlap());
        let ok = resize_window(&layout, "a", 0, 0.85, 0.6).unwrap();
        assert_eq!(ok.rooms[0].windows[0].width_m, 0.6);
    }

    #[test]
    fn test_sequence_keeps_openings_separated() {
        let mut layout = room_a();
        let attempts = [
            (Wall::South, 0.2, 0.8),
            (Wall::South, 0.8, 0.8),
            (Wall::South, 0.3, 0.6),
            (Wall::North, 0.3, 1.5),
            (Wall::North, 0.7, 1.5),
            (Wall::North, 0.8, 0.5),
            (Wall::East, 0.5, 3.0),
        ];
        for (wall, position, width) in attempts {
            if let Ok(next) = add_window(&layout, "a", Window::new(wall, position, width)) {
                layout = next;
            }
        }
        assert!(layout.validate().is_ok());
        assert!(validator::first_conflict(&layout.rooms[0]).is_ok());
    }
}
