//! JSON 交换格式
//!
//! 裸布局的键名与外部持久化接口一致 (`width_m`, `x_m`, `scale_px_per_m`,
//! `doors`, `windows`, `furniture_items` ...)。导入时先重新计算派生字段，
//! 再检查全部不变量，外部生成器只需要给出米制字段。

use crate::document::PlanDocument;
use crate::error::Result;
use floorplan_core::model::Layout;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// 解析并校验布局
pub fn layout_from_json(json: &str) -> Result<Layout> {
    let layout: Layout = serde_json::from_str(json)?;
    checked(layout)
}

pub fn layout_to_json(layout: &Layout) -> Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

pub fn document_from_json(json: &str) -> Result<PlanDocument> {
    let mut document: PlanDocument = serde_json::from_str(json)?;
    document.layout = checked(document.layout)?;
    Ok(document)
}

pub fn document_to_json(document: &PlanDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

fn checked(layout: Layout) -> Result<Layout> {
    let layout = layout.normalized();
    layout.validate()?;
    Ok(layout)
}

/// 从 JSON 文件加载文档；裸布局会被包装成以文件名为标题的新文档
pub fn load(path: &Path) -> Result<PlanDocument> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;

    let document = if value.get("layout").is_some() {
        let mut document: PlanDocument = serde_json::from_value(value)?;
        document.layout = checked(document.layout)?;
        document
    } else {
        let layout: Layout = serde_json::from_value(value)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        PlanDocument::new(title, checked(layout)?)
    };

    tracing::info!(
        "Loaded {} rooms from {}",
        document.layout.rooms.len(),
        path.display()
    );
    Ok(document)
}

/// 以文档形式保存
pub fn save(document: &PlanDocument, path: &Path) -> Result<()> {
    fs::write(path, document_to_json(document)?)?;
    tracing::info!("Saved {} to {}", document.title, path.display());
    Ok(())
}

/// 只保存裸布局
pub fn save_layout(layout: &Layout, path: &Path) -> Result<()> {
    fs::write(path, layout_to_json(layout)?)?;
    tracing::info!("Saved layout with {} rooms to {}", layout.rooms.len(), path.display());
    Ok(())
}
