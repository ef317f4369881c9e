//! 命令行配置文件
//!
//! JSON 格式，所有字段都可省略：
//!
//! ```json
//! { "extrude": { "wall_height_m": 3.0 }, "session": { "drag_threshold_px": 8 } }
//! ```

use anyhow::{Context, Result};
use floorplan_core::extrude::ExtrudeConfig;
use floorplan_edit::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extrude: ExtrudeConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// 读取配置；未指定路径时使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
