//! 布局快照历史
//!
//! 每次提交记录提交前的布局。新的提交会截断重做栈，超出上限时丢弃最旧的快照。

use floorplan_core::model::Layout;
use std::collections::VecDeque;

/// 撤销/重做管理器
#[derive(Debug, Clone)]
pub struct LayoutHistory {
    undo: VecDeque<Layout>,
    redo: Vec<Layout>,
    limit: usize,
}

impl LayoutHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// 记录一次提交，`before` 是提交前的布局
    pub fn record(&mut self, before: Layout) {
        self.redo.clear();
        if self.limit == 0 {
            return;
        }
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(before);
    }

    /// 撤销：返回上一个布局，`current` 进入重做栈
    pub fn undo(&mut self, current: &Layout) -> Option<Layout> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(previous)
    }

    /// 重做：返回下一个布局，`current` 回到撤销栈
    pub fn redo(&mut self, current: &Layout) -> Option<Layout> {
        let next = self.redo.pop()?;
        self.undo.push_back(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scale: f64) -> Layout {
        Layout::new(scale, 40.0)
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = LayoutHistory::new(10);
        history.record(layout(10.0));
        history.record(layout(20.0));
        let current = layout(30.0);

        let back = history.undo(&current).unwrap();
        assert_eq!(back.scale_px_per_m, 20.0);
        let back = history.undo(&back).unwrap();
        assert_eq!(back.scale_px_per_m, 10.0);
        assert!(!history.can_undo());

        let forward = history.redo(&back).unwrap();
        assert_eq!(forward.scale_px_per_m, 20.0);
        assert!(history.can_redo());
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut history = LayoutHistory::new(10);
        history.record(layout(10.0));
        let back = history.undo(&layout(20.0)).unwrap();
        assert!(history.can_redo());
        history.record(back);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = LayoutHistory::new(2);
        for scale in [10.0, 20.0, 30.0] {
            history.record(layout(scale));
        }
        assert_eq!(history.undo_len(), 2);
        let current = layout(40.0);
        let a = history.undo(&current).unwrap();
        let b = history.undo(&a).unwrap();
        assert_eq!(b.scale_px_per_m, 20.0);
        assert!(history.undo(&b).is_none());
    }
}
