//! 户型文档
//!
//! 在布局之外携带标题、房产类型和时间戳。房产类型原样透传，不做解释。

use chrono::{DateTime, Utc};
use floorplan_core::model::Layout;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 户型文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub layout: Layout,
}

impl PlanDocument {
    pub fn new(title: impl Into<String>, layout: Layout) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            property_type: None,
            created: now,
            modified: now,
            layout,
        }
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// 替换布局并更新修改时间
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self::new("Untitled", Layout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = PlanDocument::new("Flat 3B", Layout::default()).with_property_type("apartment");
        assert_eq!(doc.title, "Flat 3B");
        assert_eq!(doc.property_type.as_deref(), Some("apartment"));
        assert_eq!(doc.created, doc.modified);
        assert_ne!(doc.id, PlanDocument::default().id);
    }

    #[test]
    fn test_set_layout_touches() {
        let mut doc = PlanDocument::default();
        let created = doc.created;
        doc.set_layout(Layout::new(80.0, 20.0));
        assert_eq!(doc.layout.scale_px_per_m, 80.0);
        assert!(doc.modified >= created);
    }
}
