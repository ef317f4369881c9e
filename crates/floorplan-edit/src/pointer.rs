//! 指针事件源
//!
//! 把鼠标/触摸的按下、移动、抬起抽象成与界面框架无关的事件流，
//! 拖拽和缩放逻辑因此可以不依赖真实界面进行测试。

use floorplan_core::math::Point2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 画布坐标下的指针事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point2 },
    Move { position: Point2 },
    Up { position: Point2 },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point2::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point2::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point2::new(x, y),
        }
    }

    pub fn position(&self) -> Point2 {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } | PointerEvent::Up { position } => {
                *position
            }
        }
    }
}

/// 指针事件来源
///
/// 监听范围必须是整个输入区域，而不是被操作的实体：
/// 拖拽途中指针离开房间，移动和抬起事件仍然要送达。
pub trait PointerEventSource {
    /// 取下一个事件，没有更多事件时返回 `None`
    fn next_event(&mut self) -> Option<PointerEvent>;
}

/// 预先录好的事件队列
#[derive(Debug, Clone, Default)]
pub struct RecordedEvents {
    events: VecDeque<PointerEvent>,
}

impl RecordedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<PointerEvent>> for RecordedEvents {
    fn from(events: Vec<PointerEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl PointerEventSource for RecordedEvents {
    fn next_event(&mut self) -> Option<PointerEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_events_in_order() {
        let mut source = RecordedEvents::from(vec![PointerEvent::down(1.0, 2.0), PointerEvent::up(3.0, 4.0)]);
        source.push(PointerEvent::moved(5.0, 6.0));
        assert_eq!(source.len(), 3);
        assert_eq!(source.next_event(), Some(PointerEvent::down(1.0, 2.0)));
        assert_eq!(source.next_event().map(|e| e.position()), Some(Point2::new(3.0, 4.0)));
        assert_eq!(source.next_event(), Some(PointerEvent::moved(5.0, 6.0)));
        assert_eq!(source.next_event(), None);
        assert!(source.is_empty());
    }

    #[test]
    fn test_event_json_tag() {
        let json = serde_json::to_value(PointerEvent::down(1.0, 2.0)).unwrap();
        assert_eq!(json["type"], "down");
    }
}
