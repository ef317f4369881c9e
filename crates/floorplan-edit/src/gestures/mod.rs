//! 各类实体的手势实现
//!
//! 每个函数接收起始布局和累计位移，调用对应的布局变更操作。

pub(crate) mod furniture;
pub(crate) mod opening;
pub(crate) mod room;
