//! 编辑会话错误

use crate::gesture::Handle;
use floorplan_core::error::{LayoutError, ValidationError};
use floorplan_core::hit::{EntityKind, EntityRef};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("{handle} handle cannot resize a {kind}")]
    UnsupportedHandle { kind: EntityKind, handle: Handle },

    #[error("entity no longer exists: {0:?}")]
    StaleTarget(EntityRef),

    #[error("nothing is selected")]
    NothingSelected,

    #[error("a gesture is in progress")]
    GestureInProgress,
}

impl From<ValidationError> for EditError {
    fn from(err: ValidationError) -> Self {
        EditError::Layout(err.into())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
