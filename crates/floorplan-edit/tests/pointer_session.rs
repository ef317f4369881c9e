//! 用录制的指针事件驱动编辑会话

use floorplan_core::furniture::FurnitureKind;
use floorplan_core::hit::EntityRef;
use floorplan_core::model::Layout;
use floorplan_core::mutator;
use floorplan_edit::{EditSession, PointerEvent, RecordedEvents, SessionConfig, SessionState};

/// 两个并排的房间：a 在画布 (40,40)-(240,240)，b 在 (240,40)-(440,240)
fn two_rooms() -> Layout {
    let layout = mutator::add_room_with_id(&Layout::default(), "a");
    let layout = mutator::add_room_with_id(&layout, "b");
    mutator::add_furniture_with_id(&layout, "b", FurnitureKind::BedDouble, "bed").unwrap()
}

#[test]
fn click_within_threshold_selects_without_moving() {
    let layout = two_rooms();
    let mut session = EditSession::new(layout.clone());
    let mut events = RecordedEvents::from(vec![
        PointerEvent::down(60.0, 60.0),
        PointerEvent::moved(63.0, 60.0),
        PointerEvent::up(63.0, 60.0),
    ]);

    assert_eq!(session.pump(&mut events), 3);
    assert_eq!(
        session.state(),
        &SessionState::Selected {
            target: EntityRef::room("a")
        }
    );
    assert_eq!(session.layout(), &layout);
}

#[test]
fn drag_moves_room_and_extents_follow() {
    let mut session = EditSession::new(two_rooms());
    let mut events = RecordedEvents::from(vec![
        PointerEvent::down(260.0, 60.0),
        PointerEvent::moved(270.0, 60.0),
        PointerEvent::moved(310.0, 110.0),
        PointerEvent::up(310.0, 110.0),
    ]);
    session.pump(&mut events);

    let room = session.layout().room("b").unwrap();
    assert_eq!((room.x_m, room.y_m), (5.0, 1.0));
    assert_eq!(session.layout().total_width_m, 9.0);
    assert_eq!(session.layout().total_height_m, 5.0);
    assert!(session.layout().validate().is_ok());
}

#[test]
fn furniture_drag_ending_in_other_room_stays_in_its_own_room() {
    let mut session = EditSession::new(two_rooms());
    let bed = session.layout().room("b").unwrap().furniture("bed").unwrap().clone();
    let start = (240.0 + bed.x_px + 5.0, 40.0 + bed.y_px + 5.0);

    let mut events = RecordedEvents::from(vec![
        PointerEvent::down(start.0, start.1),
        PointerEvent::moved(start.0 - 100.0, start.1),
        PointerEvent::up(100.0, start.1),
    ]);
    session.pump(&mut events);

    let moved = session.layout().room("b").unwrap().furniture("bed").unwrap();
    assert_eq!(moved.x_px, 0.0);
    assert_eq!(moved.y_px, bed.y_px);
    assert!(session.layout().room("a").unwrap().furniture_items.is_empty());
    assert_eq!(session.selection(), Some(&EntityRef::furniture("b", "bed")));
}

#[test]
fn background_click_returns_to_idle() {
    let mut session = EditSession::new(two_rooms());
    let mut events = RecordedEvents::from(vec![
        PointerEvent::down(60.0, 60.0),
        PointerEvent::up(60.0, 60.0),
        PointerEvent::down(600.0, 600.0),
        PointerEvent::up(600.0, 600.0),
    ]);
    session.pump(&mut events);
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn custom_threshold_is_honored() {
    let config = SessionConfig {
        drag_threshold_px: 20.0,
        ..Default::default()
    };
    let layout = two_rooms();
    let mut session = EditSession::with_config(layout.clone(), config);
    let mut events = RecordedEvents::from(vec![PointerEvent::down(60.0, 60.0), PointerEvent::up(75.0, 70.0)]);
    session.pump(&mut events);
    assert_eq!(session.layout(), &layout);
    assert_eq!(session.state().name(), "selected");
}
