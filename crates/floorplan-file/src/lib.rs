//! 户型文件格式处理
//!
//! 支持：
//! - `.json` 交换格式（裸布局或带元数据的文档）
//! - `.fplan` 原生格式（MessagePack + Zstd）
//!
//! 所有导入路径都会重新计算派生字段并校验布局不变量。

pub mod document;
pub mod error;
pub mod json;
pub mod native;

pub use document::PlanDocument;
pub use error::{FileError, Result};
pub use json::{layout_from_json, layout_to_json};

use std::path::Path;

/// 按扩展名区分的文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Native,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(FileFormat::Json),
            "fplan" => Ok(FileFormat::Native),
            _ => Err(FileError::InvalidFormat(format!(
                "unknown file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Native => "fplan",
        }
    }
}

/// 按扩展名打开文档
pub fn open(path: &Path) -> Result<PlanDocument> {
    match FileFormat::from_path(path)? {
        FileFormat::Json => json::load(path),
        FileFormat::Native => native::load(path),
    }
}

/// 按扩展名保存文档
pub fn save(document: &PlanDocument, path: &Path) -> Result<()> {
    match FileFormat::from_path(path)? {
        FileFormat::Json => json::save(document, path),
        FileFormat::Native => native::save(document, path),
    }
}
