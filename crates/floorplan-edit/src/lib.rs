//! 户型图交互编辑
//!
//! 把指针事件翻译成布局变更：按下、越过拖拽阈值、移动、抬起。
//! 不依赖任何界面框架，渲染层只需要把画布坐标下的事件送进 [`EditSession`]。

pub mod error;
pub mod gesture;
mod gestures;
pub mod history;
pub mod pointer;
pub mod session;

pub use error::EditError;
pub use gesture::{GestureKind, Handle, Origin, Rect};
pub use gestures::room::ROOM_MIN_SIZE_M;
pub use history::LayoutHistory;
pub use pointer::{PointerEvent, PointerEventSource, RecordedEvents};
pub use session::{EditSession, SessionConfig, SessionState, DRAG_THRESHOLD_PX};
