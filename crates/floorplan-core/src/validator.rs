//! 墙面开口重叠校验
//!
//! 同一房间同一面墙上的门窗按墙面比例区间做一维重叠判断，
//! 区间之间至少保留 [`OPENING_GAP`] 的间隔。校验器只回答是否重叠，从不修改布局。

use crate::error::OverlapError;
use crate::model::{OpeningKind, OpeningSpan, Room};

/// 开口之间的最小间隔（墙面比例单位），与墙的实际长度无关
pub const OPENING_GAP: f64 = 0.05;

/// 开口在墙面上占据的比例区间 `[start, end]`
fn interval(span: &OpeningSpan, wall_length: f64) -> (f64, f64) {
    let half = span.width_m / wall_length / 2.0;
    (span.position - half, span.position + half)
}

/// 判断候选开口是否与同墙上已有的门窗重叠
///
/// `exclude_index` 用于编辑已有开口：跳过同种类中该下标的那一项。
/// 墙长不为正时无法归一化，按不重叠处理。
pub fn has_overlap(
    room: &Room,
    candidate: &OpeningSpan,
    kind: OpeningKind,
    exclude_index: Option<usize>,
) -> bool {
    let wall_length = room.wall_length(candidate.wall);
    if wall_length.is_nan() || wall_length <= 0.0 {
        return false;
    }

    let (new_start, new_end) = interval(candidate, wall_length);

    room.openings()
        .filter(|(other_kind, index, _)| !(*other_kind == kind && Some(*index) == exclude_index))
        .filter(|(_, _, span)| span.wall == candidate.wall)
        .any(|(_, _, span)| {
            let (start, end) = interval(&span, wall_length);
            let separated = new_end < start - OPENING_GAP || new_start > end + OPENING_GAP;
            !separated
        })
}

/// 与 [`has_overlap`] 相同，重叠时返回带上下文的错误
pub fn check(
    room: &Room,
    candidate: &OpeningSpan,
    kind: OpeningKind,
    exclude_index: Option<usize>,
) -> Result<(), OverlapError> {
    if has_overlap(room, candidate, kind, exclude_index) {
        Err(OverlapError {
            room_id: room.id.clone(),
            wall: candidate.wall,
            kind,
            position: candidate.position,
            width_m: candidate.width_m,
        })
    } else {
        Ok(())
    }
}

/// 扫描整个房间，返回第一对冲突开口中靠后的那一个
pub fn first_conflict(room: &Room) -> Result<(), OverlapError> {
    for (kind, index, span) in room.openings() {
        check(room, &span, kind, Some(index))?;
    }
    Ok(())
}
