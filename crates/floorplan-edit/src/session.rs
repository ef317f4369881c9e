//! 编辑会话状态机
//!
//! 状态转换：
//! - 指针在实体上按下 → `Pressed`，记录起始指针和目标起始值，尚不修改布局
//! - 按下后移动：两个轴的位移都小于阈值时保持 `Pressed`；
//!   任一轴达到阈值后进入 `Dragging` / `Resizing`，此后每次移动都把累计位移
//!   作用到按下时的布局快照上
//! - 抬起：从未越过阈值视为点击 → `Selected`；否则提交当前布局 → `Selected`
//! - 点击空白处 → `Idle`
//!
//! 移动和抬起事件来自整个输入区域，手势在哪里结束都会正常提交。

use crate::error::{EditError, Result};
use crate::gesture::{self, GestureKind, Handle, Origin};
use crate::history::LayoutHistory;
use crate::pointer::{PointerEvent, PointerEventSource};
use floorplan_core::error::LayoutError;
use floorplan_core::hit::{hit_test, EntityKind, EntityRef};
use floorplan_core::math::{Point2, Vector2};
use floorplan_core::model::Layout;
use floorplan_core::mutator;
use serde::{Deserialize, Serialize};

/// 区分点击和拖拽的位移阈值（像素）
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// 默认保留的撤销步数
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// 会话配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub drag_threshold_px: f64,
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// 会话状态
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// 空闲
    #[default]
    Idle,
    /// 选中某个实体
    Selected { target: EntityRef },
    /// 指针已按下，尚未越过拖拽阈值
    Pressed {
        target: EntityRef,
        gesture: GestureKind,
        start_pointer: Point2,
        origin: Origin,
    },
    /// 拖动中
    Dragging {
        target: EntityRef,
        start_pointer: Point2,
        origin: Origin,
    },
    /// 拖动手柄缩放中
    Resizing {
        target: EntityRef,
        handle: Handle,
        start_pointer: Point2,
        origin: Origin,
    },
}

impl SessionState {
    /// 当前状态关联的实体
    pub fn target(&self) -> Option<&EntityRef> {
        match self {
            SessionState::Idle => None,
            SessionState::Selected { target }
            | SessionState::Pressed { target, .. }
            | SessionState::Dragging { target, .. }
            | SessionState::Resizing { target, .. } => Some(target),
        }
    }

    /// 指针是否处于按下状态
    pub fn is_pointer_down(&self) -> bool {
        matches!(
            self,
            SessionState::Pressed { .. } | SessionState::Dragging { .. } | SessionState::Resizing { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Selected { .. } => "selected",
            SessionState::Pressed { .. } => "pressed",
            SessionState::Dragging { .. } => "dragging",
            SessionState::Resizing { .. } => "resizing",
        }
    }
}

/// 交互编辑会话
///
/// 一个布局在同一时间只由一个会话负责交互编辑。
#[derive(Debug, Clone)]
pub struct EditSession {
    layout: Layout,
    state: SessionState,
    /// 手势开始时的布局
    snapshot: Option<Layout>,
    history: LayoutHistory,
    config: SessionConfig,
    last_error: Option<EditError>,
}

impl EditSession {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, SessionConfig::default())
    }

    pub fn with_config(layout: Layout, config: SessionConfig) -> Self {
        Self {
            layout,
            state: SessionState::Idle,
            snapshot: None,
            history: LayoutHistory::new(config.history_limit),
            config,
            last_error: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 当前选中（或正在操作）的实体
    pub fn selection(&self) -> Option<&EntityRef> {
        self.state.target()
    }

    pub fn selected_kind(&self) -> Option<EntityKind> {
        self.selection().map(EntityRef::kind)
    }

    /// 最近一次被拒绝的操作
    pub fn last_error(&self) -> Option<&EditError> {
        self.last_error.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// 整体替换布局（例如打开文件），清空历史和选择
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.state = SessionState::Idle;
        self.snapshot = None;
        self.history.clear();
        self.last_error = None;
    }

    // ========== 实体钩子 ==========

    pub fn on_room_pointer_down(&mut self, room_id: &str, pointer: Point2) -> Result<()> {
        self.press(EntityRef::room(room_id), GestureKind::Drag, pointer)
    }

    pub fn on_furniture_pointer_down(&mut self, room_id: &str, furniture_id: &str, pointer: Point2) -> Result<()> {
        self.press(EntityRef::furniture(room_id, furniture_id), GestureKind::Drag, pointer)
    }

    pub fn on_door_pointer_down(&mut self, room_id: &str, index: usize, pointer: Point2) -> Result<()> {
        self.press(EntityRef::door(room_id, index), GestureKind::Drag, pointer)
    }

    pub fn on_window_pointer_down(&mut self, room_id: &str, index: usize, pointer: Point2) -> Result<()> {
        self.press(EntityRef::window(room_id, index), GestureKind::Drag, pointer)
    }

    pub fn on_room_resize_start(&mut self, room_id: &str, handle: Handle, pointer: Point2) -> Result<()> {
        self.press(EntityRef::room(room_id), GestureKind::Resize(handle), pointer)
    }

    pub fn on_furniture_resize_start(
        &mut self,
        room_id: &str,
        furniture_id: &str,
        handle: Handle,
        pointer: Point2,
    ) -> Result<()> {
        self.press(
            EntityRef::furniture(room_id, furniture_id),
            GestureKind::Resize(handle),
            pointer,
        )
    }

    pub fn on_door_resize_start(&mut self, room_id: &str, index: usize, handle: Handle, pointer: Point2) -> Result<()> {
        self.press(EntityRef::door(room_id, index), GestureKind::Resize(handle), pointer)
    }

    pub fn on_window_resize_start(
        &mut self,
        room_id: &str,
        index: usize,
        handle: Handle,
        pointer: Point2,
    ) -> Result<()> {
        self.press(EntityRef::window(room_id, index), GestureKind::Resize(handle), pointer)
    }

    /// 点击空白处：取消选择
    pub fn on_background_click(&mut self) {
        if self.state.is_pointer_down() {
            self.finish_gesture();
        }
        self.state = SessionState::Idle;
    }

    /// 指针移动（来自整个输入区域）
    pub fn on_pointer_move(&mut self, pointer: Point2) {
        let (target, kind, start_pointer, origin) = match &self.state {
            SessionState::Pressed {
                target,
                gesture,
                start_pointer,
                origin,
            } => {
                let delta = pointer - *start_pointer;
                let threshold = self.config.drag_threshold_px;
                if delta.x.abs() < threshold && delta.y.abs() < threshold {
                    return;
                }
                let (target, gesture, start_pointer, origin) = (target.clone(), *gesture, *start_pointer, *origin);
                self.state = match gesture {
                    GestureKind::Drag => SessionState::Dragging {
                        target: target.clone(),
                        start_pointer,
                        origin,
                    },
                    GestureKind::Resize(handle) => SessionState::Resizing {
                        target: target.clone(),
                        handle,
                        start_pointer,
                        origin,
                    },
                };
                tracing::debug!("{} {:?}", self.state.name(), target);
                (target, gesture, start_pointer, origin)
            }
            SessionState::Dragging {
                target,
                start_pointer,
                origin,
            } => (target.clone(), GestureKind::Drag, *start_pointer, *origin),
            SessionState::Resizing {
                target,
                handle,
                start_pointer,
                origin,
            } => (target.clone(), GestureKind::Resize(*handle), *start_pointer, *origin),
            SessionState::Idle | SessionState::Selected { .. } => return,
        };

        self.step(&target, kind, &origin, pointer - start_pointer);
    }

    /// 指针抬起（来自整个输入区域）
    ///
    /// 抬起位置本身也算一次移动，所以按下后直接在远处抬起同样是拖拽。
    pub fn on_pointer_up(&mut self, pointer: Point2) {
        if !self.state.is_pointer_down() {
            return;
        }
        self.on_pointer_move(pointer);
        if let SessionState::Pressed { target, .. } = &self.state {
            self.state = SessionState::Selected { target: target.clone() };
            self.snapshot = None;
        } else {
            self.finish_gesture();
        }
    }

    // ========== 原始指针事件 ==========

    /// 用点击测试把画布上的按下事件分派到实体钩子；没有命中时视为点击空白处
    pub fn pointer_down_at(&mut self, pointer: Point2) -> Result<Option<EntityRef>> {
        match hit_test(&self.layout, pointer) {
            Some(target) => {
                self.press(target.clone(), GestureKind::Drag, pointer)?;
                Ok(Some(target))
            }
            None => {
                self.on_background_click();
                Ok(None)
            }
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Down { position } => self.pointer_down_at(position).map(|_| ()),
            PointerEvent::Move { position } => {
                self.on_pointer_move(position);
                Ok(())
            }
            PointerEvent::Up { position } => {
                self.on_pointer_up(position);
                Ok(())
            }
        }
    }

    /// 取尽事件源中的事件，返回处理的事件数
    pub fn pump(&mut self, source: &mut impl PointerEventSource) -> usize {
        let mut count = 0;
        while let Some(event) = source.next_event() {
            if let Err(err) = self.handle_event(event) {
                tracing::debug!("pointer event ignored: {}", err);
            }
            count += 1;
        }
        count
    }

    // ========== 程序化操作 ==========

    /// 选中一个存在的实体
    pub fn select(&mut self, target: EntityRef) -> Result<()> {
        self.ensure_idle_pointer()?;
        if !target.exists_in(&self.layout) {
            return Err(self.fail(EditError::StaleTarget(target)));
        }
        self.state = SessionState::Selected { target };
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if !self.state.is_pointer_down() {
            self.state = SessionState::Idle;
        }
    }

    /// 删除选中的实体，返回被删除的引用
    pub fn delete_selected(&mut self) -> Result<EntityRef> {
        self.ensure_idle_pointer()?;
        let SessionState::Selected { target } = &self.state else {
            return Err(EditError::NothingSelected);
        };
        let target = target.clone();
        let removed = match &target {
            EntityRef::Room { room_id } => mutator::remove_room(&self.layout, room_id),
            EntityRef::Furniture { room_id, furniture_id } => {
                mutator::remove_furniture(&self.layout, room_id, furniture_id)
            }
            EntityRef::Door { room_id, index } => mutator::remove_door(&self.layout, room_id, *index),
            EntityRef::Window { room_id, index } => mutator::remove_window(&self.layout, room_id, *index),
        };
        let next = removed.map_err(|err| self.fail(err.into()))?;
        self.commit(next);
        self.state = SessionState::Idle;
        Ok(target)
    }

    /// 应用任意布局变更并记入历史，例如 `|l| mutator::add_door(l, "a", door)`
    pub fn apply(&mut self, mutation: impl FnOnce(&Layout) -> std::result::Result<Layout, LayoutError>) -> Result<()> {
        self.ensure_idle_pointer()?;
        let next = mutation(&self.layout).map_err(|err| self.fail(err.into()))?;
        self.commit(next);
        self.drop_stale_selection();
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        if self.state.is_pointer_down() {
            return false;
        }
        match self.history.undo(&self.layout) {
            Some(previous) => {
                self.layout = previous;
                self.drop_stale_selection();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.state.is_pointer_down() {
            return false;
        }
        match self.history.redo(&self.layout) {
            Some(next) => {
                self.layout = next;
                self.drop_stale_selection();
                true
            }
            None => false,
        }
    }

    // ========== 内部 ==========

    fn press(&mut self, target: EntityRef, gesture: GestureKind, pointer: Point2) -> Result<()> {
        if self.state.is_pointer_down() {
            // 丢失了抬起事件：按最后接受的布局提交上一个手势
            self.finish_gesture();
        }
        if !gesture.supports(target.kind()) {
            let handle = gesture.handle().unwrap_or(Handle::Start);
            return Err(self.fail(EditError::UnsupportedHandle {
                kind: target.kind(),
                handle,
            }));
        }
        let origin = Origin::capture(&self.layout, &target).map_err(|err| self.fail(err))?;

        self.snapshot = Some(self.layout.clone());
        self.state = SessionState::Pressed {
            target,
            gesture,
            start_pointer: pointer,
            origin,
        };
        Ok(())
    }

    /// 以快照为基准执行一步；被拒绝时保留上一次被接受的布局
    fn step(&mut self, target: &EntityRef, kind: GestureKind, origin: &Origin, delta: Vector2) {
        let Some(start) = &self.snapshot else {
            return;
        };
        match gesture::apply(start, target, kind, origin, delta) {
            Ok(next) => {
                self.layout = next;
                self.last_error = None;
            }
            Err(err) => {
                tracing::debug!("gesture step rejected: {}", err);
                self.last_error = Some(err);
            }
        }
    }

    fn finish_gesture(&mut self) {
        if let Some(before) = self.snapshot.take() {
            if before != self.layout {
                self.history.record(before);
            }
        }
        if let Some(target) = self.state.target().cloned() {
            self.state = SessionState::Selected { target };
        }
        self.drop_stale_selection();
    }

    fn commit(&mut self, next: Layout) {
        if next != self.layout {
            let before = std::mem::replace(&mut self.layout, next);
            self.history.record(before);
        }
        self.last_error = None;
    }

    fn drop_stale_selection(&mut self) {
        if let SessionState::Selected { target } = &self.state {
            if !target.exists_in(&self.layout) {
                self.state = SessionState::Idle;
            }
        }
    }

    fn ensure_idle_pointer(&self) -> Result<()> {
        if self.state.is_pointer_down() {
            Err(EditError::GestureInProgress)
        } else {
            Ok(())
        }
    }

    fn fail(&mut self, err: EditError) -> EditError {
        self.last_error = Some(err.clone());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use floorplan_core::furniture::FurnitureKind;
    use floorplan_core::model::{Wall, Window};
    use floorplan_core::mutator::{add_furniture_with_id, add_room_with_id};

    /// 房间 a 位于画布 (40,40)-(240,240)，沙发在画布 (90,117.5)-(190,162.5)
    fn session() -> EditSession {
        let layout = add_room_with_id(&Layout::default(), "a");
        let layout = add_furniture_with_id(&layout, "a", FurnitureKind::Sofa, "sofa").unwrap();
        EditSession::new(layout)
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_small_motion_is_a_click() {
        let mut s = session();
        let before = s.layout().clone();
        s.on_room_pointer_down("a", p(100.0, 60.0)).unwrap();
        s.on_pointer_move(p(103.0, 62.0));
        assert_eq!(s.state().name(), "pressed");
        s.on_pointer_up(p(103.0, 62.0));

        assert_eq!(s.state(), &SessionState::Selected { target: EntityRef::room("a") });
        assert_eq!(s.layout(), &before);
        assert!(!s.can_undo());
    }

    #[test]
    fn test_drag_past_threshold_moves_room() {
        let mut s = session();
        s.on_room_pointer_down("a", p(100.0, 60.0)).unwrap();
        s.on_pointer_move(p(110.0, 60.0));
        assert_eq!(s.state().name(), "dragging");
        assert_relative_eq!(s.layout().rooms[0].x_m, 0.2);

        s.on_pointer_up(p(150.0, 60.0));
        assert_relative_eq!(s.layout().rooms[0].x_m, 1.0);
        assert_eq!(s.selection(), Some(&EntityRef::room("a")));
        assert!(s.can_undo());
    }

    #[test]
    fn test_threshold_on_one_axis_is_enough() {
        let mut s = session();
        s.on_room_pointer_down("a", p(100.0, 60.0)).unwrap();
        s.on_pointer_move(p(101.0, 65.0));
        assert_eq!(s.state().name(), "dragging");
    }

    #[test]
    fn test_background_click_deselects() {
        let mut s = session();
        s.select(EntityRef::furniture("a", "sofa")).unwrap();
        assert_eq!(s.selected_kind(), Some(EntityKind::Furniture));
        assert_eq!(s.pointer_down_at(p(5.0, 5.0)).unwrap(), None);
        assert_eq!(s.state(), &SessionState::Idle);
    }

    #[test]
    fn test_drag_finished_outside_room_commits() {
        let mut s = session();
        let hit = s.pointer_down_at(p(140.0, 140.0)).unwrap();
        assert_eq!(hit, Some(EntityRef::furniture("a", "sofa")));
        s.on_pointer_move(p(400.0, 400.0));
        s.on_pointer_up(p(900.0, 900.0));

        let item = s.layout().rooms[0].furniture("sofa").unwrap();
        assert_eq!((item.x_px, item.y_px), (100.0, 155.0));
        assert_eq!(s.selection(), Some(&EntityRef::furniture("a", "sofa")));
    }

    #[test]
    fn test_rejected_step_keeps_last_accepted_layout() {
        let mut s = session();
        s.apply(|l| mutator::add_window(l, "a", Window::new(Wall::South, 0.8, 0.5))).unwrap();

        s.on_door_pointer_down("a", 0, p(140.0, 240.0)).unwrap();
        s.on_pointer_move(p(150.0, 240.0));
        assert_relative_eq!(s.layout().rooms[0].doors[0].position, 0.55, epsilon = 1e-9);

        s.on_pointer_move(p(160.0, 240.0));
        assert_relative_eq!(s.layout().rooms[0].doors[0].position, 0.55, epsilon = 1e-9);
        assert!(matches!(s.last_error(), Some(EditError::Layout(e)) if e.is_overlap()));

        // 回到合法位置后继续被接受
        s.on_pointer_up(p(135.0, 240.0));
        assert_relative_eq!(s.layout().rooms[0].doors[0].position, 0.475, epsilon = 1e-9);
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_resize_room_with_handle() {
        let mut s = session();
        s.on_room_resize_start("a", Handle::East, p(240.0, 140.0)).unwrap();
        s.on_pointer_move(p(290.0, 141.0));
        s.on_pointer_up(p(290.0, 141.0));
        let room = &s.layout().rooms[0];
        assert_relative_eq!(room.width_m, 5.0);
        assert_relative_eq!(s.layout().total_width_m, 5.0);
        assert_eq!(s.state().name(), "selected");
    }

    #[test]
    fn test_unsupported_handle() {
        let mut s = session();
        let err = s.on_door_resize_start("a", 0, Handle::North, p(140.0, 240.0)).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedHandle { .. }));
        assert_eq!(s.state(), &SessionState::Idle);
    }

    #[test]
    fn test_undo_redo_drag() {
        let mut s = session();
        s.on_room_pointer_down("a", p(100.0, 60.0)).unwrap();
        s.on_pointer_up(p(200.0, 60.0));
        assert_relative_eq!(s.layout().rooms[0].x_m, 2.0);

        assert!(s.undo());
        assert_relative_eq!(s.layout().rooms[0].x_m, 0.0);
        assert!(s.redo());
        assert_relative_eq!(s.layout().rooms[0].x_m, 2.0);
        assert!(!s.redo());
    }

    #[test]
    fn test_delete_selected() {
        let mut s = session();
        assert_eq!(s.delete_selected().unwrap_err(), EditError::NothingSelected);

        s.select(EntityRef::furniture("a", "sofa")).unwrap();
        let removed = s.delete_selected().unwrap();
        assert_eq!(removed, EntityRef::furniture("a", "sofa"));
        assert!(s.layout().rooms[0].furniture_items.is_empty());
        assert_eq!(s.state(), &SessionState::Idle);

        assert!(s.undo());
        assert!(s.layout().rooms[0].furniture("sofa").is_some());
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut s = session();
        s.apply(|l| mutator::add_window(l, "a", Window::new(Wall::North, 0.5, 1.0))).unwrap();
        s.select(EntityRef::window("a", 0)).unwrap();
        assert!(s.undo());
        assert_eq!(s.state(), &SessionState::Idle);
    }

    #[test]
    fn test_select_missing_entity() {
        let mut s = session();
        let err = s.select(EntityRef::door("a", 3)).unwrap_err();
        assert!(matches!(err, EditError::StaleTarget(_)));
        assert!(s.last_error().is_some());
    }

    #[test]
    fn test_undo_is_blocked_mid_gesture() {
        let mut s = session();
        s.apply(|l| mutator::move_room(l, "a", 1.0, 0.0)).unwrap();
        s.on_room_pointer_down("a", p(100.0, 60.0)).unwrap();
        assert!(!s.undo());
        assert_eq!(s.apply(|l| Ok(l.clone())).unwrap_err(), EditError::GestureInProgress);
    }

    #[test]
    fn test_state_serializes() {
        let mut s = session();
        s.select(EntityRef::room("a")).unwrap();
        let json = serde_json::to_value(s.state()).unwrap();
        assert_eq!(json["state"], "selected");
        assert_eq!(json["target"]["kind"], "room");
        let back: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(&back, s.state());
    }

    #[test]
    fn test_config_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"history_limit": 3}"#).unwrap();
        assert_eq!(config.drag_threshold_px, DRAG_THRESHOLD_PX);
        assert_eq!(config.history_limit, 3);
    }
}
