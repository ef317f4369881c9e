//! 子命令实现

use crate::config::AppConfig;
use anyhow::{bail, Context, Result};
use clap::Args;
use floorplan_core::extrude::extrude_with;
use floorplan_core::model::Layout;
use floorplan_core::mutator;
use floorplan_edit::{EditSession, PointerEvent, RecordedEvents};
use floorplan_file::{json, FileFormat, PlanDocument};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn open(path: &Path) -> Result<PlanDocument> {
    floorplan_file::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn save(document: &PlanDocument, path: &Path) -> Result<()> {
    floorplan_file::save(document, path).with_context(|| format!("failed to save {}", path.display()))
}

/// 输出 JSON 到文件或标准输出
fn emit_json(value: &impl Serialize, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

/// Print a summary of a floor plan
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Floor plan file (.json or .fplan)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct RoomSummary {
    id: String,
    name: String,
    room_type: String,
    x_m: f64,
    y_m: f64,
    width_m: f64,
    height_m: f64,
    area_m2: f64,
    doors: usize,
    windows: usize,
    furniture: usize,
}

#[derive(Serialize, Debug)]
struct PlanSummary {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_type: Option<String>,
    total_width_m: f64,
    total_height_m: f64,
    total_area_m2: f64,
    scale_px_per_m: f64,
    rooms: Vec<RoomSummary>,
}

impl PlanSummary {
    fn new(document: &PlanDocument) -> Self {
        let layout = &document.layout;
        let rooms: Vec<RoomSummary> = layout
            .rooms
            .iter()
            .map(|room| RoomSummary {
                id: room.id.clone(),
                name: room.name.clone(),
                room_type: serde_json::to_value(room.room_type)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default(),
                x_m: room.x_m,
                y_m: room.y_m,
                width_m: room.width_m,
                height_m: room.height_m,
                area_m2: room.area_m2,
                doors: room.doors.len(),
                windows: room.windows.len(),
                furniture: room.furniture_items.len(),
            })
            .collect();
        Self {
            title: document.title.clone(),
            property_type: document.property_type.clone(),
            total_width_m: layout.total_width_m,
            total_height_m: layout.total_height_m,
            total_area_m2: rooms.iter().map(|r| r.area_m2).sum(),
            scale_px_per_m: layout.scale_px_per_m,
            rooms,
        }
    }
}

impl InspectArgs {
    pub fn execute(&self, _config: &AppConfig) -> Result<()> {
        let document = open(&self.input)?;
        let summary = PlanSummary::new(&document);
        if self.json {
            return emit_json(&summary, None);
        }

        match &summary.property_type {
            Some(property_type) => println!("{} ({})", summary.title, property_type),
            None => println!("{}", summary.title),
        }
        println!(
            "  extents: {:.2} m x {:.2} m, {:.2} m2 in {} rooms, scale {} px/m",
            summary.total_width_m,
            summary.total_height_m,
            summary.total_area_m2,
            summary.rooms.len(),
            summary.scale_px_per_m
        );
        for room in &summary.rooms {
            println!(
                "  - {} \"{}\" [{}] {:.2} x {:.2} m at ({:.2}, {:.2}), {:.2} m2, {} doors, {} windows, {} furniture",
                room.id,
                room.name,
                room.room_type,
                room.width_m,
                room.height_m,
                room.x_m,
                room.y_m,
                room.area_m2,
                room.doors,
                room.windows,
                room.furniture
            );
        }
        Ok(())
    }
}

/// Check a floor plan against all layout invariants
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Floor plan files (.json or .fplan)
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,
}

impl ValidateArgs {
    pub fn execute(&self, _config: &AppConfig) -> Result<()> {
        let mut failed = 0;
        for path in &self.inputs {
            match floorplan_file::open(path) {
                Ok(document) => println!("{}: ok ({} rooms)", path.display(), document.layout.rooms.len()),
                Err(err) => {
                    println!("{}: {}", path.display(), err);
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            bail!("{} of {} files failed validation", failed, self.inputs.len());
        }
        Ok(())
    }
}

/// Convert a floor plan into 3D boxes for a renderer
#[derive(Args, Debug)]
pub struct ExtrudeArgs {
    /// Floor plan file (.json or .fplan)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl ExtrudeArgs {
    pub fn execute(&self, config: &AppConfig) -> Result<()> {
        let document = open(&self.input)?;
        let model = extrude_with(&document.layout, &config.extrude);
        tracing::info!(
            "Extruded {} floors, {} walls, {} openings, {} furniture",
            model.floors.len(),
            model.walls.len(),
            model.openings.len(),
            model.furniture.len()
        );
        emit_json(&model, self.output.as_deref())
    }
}

/// Convert between .json and .fplan
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination file; the format follows the extension
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Write only the bare layout (JSON output only)
    #[arg(long)]
    layout_only: bool,
}

impl ConvertArgs {
    pub fn execute(&self, _config: &AppConfig) -> Result<()> {
        let document = open(&self.input)?;
        if self.layout_only {
            if FileFormat::from_path(&self.output)? != FileFormat::Json {
                bail!("--layout-only requires a .json output");
            }
            json::save_layout(&document.layout, &self.output)?;
        } else {
            save(&document, &self.output)?;
        }
        println!("{} -> {}", self.input.display(), self.output.display());
        Ok(())
    }
}

/// Create a floor plan with default rooms placed side by side
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Destination file (.json or .fplan)
    #[arg(value_name = "FILE")]
    output: PathBuf,

    /// Number of rooms
    #[arg(long, default_value_t = 1)]
    rooms: usize,

    /// Document title
    #[arg(long, default_value = "Untitled")]
    title: String,

    /// Property type, stored as given
    #[arg(long, value_name = "TYPE")]
    property_type: Option<String>,
}

impl NewArgs {
    pub fn execute(&self, _config: &AppConfig) -> Result<()> {
        let layout = (0..self.rooms).fold(Layout::default(), |layout, _| mutator::add_room(&layout));
        let mut document = PlanDocument::new(self.title.clone(), layout);
        document.property_type = self.property_type.clone();
        save(&document, &self.output)?;
        println!("{}: {} rooms", self.output.display(), self.rooms);
        Ok(())
    }
}

/// Replay recorded pointer events against a floor plan
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Floor plan file (.json or .fplan)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// JSON array of pointer events in canvas pixels
    #[arg(value_name = "EVENTS")]
    events: PathBuf,

    /// Where to save the edited plan (defaults to the input file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl ReplayArgs {
    pub fn execute(&self, config: &AppConfig) -> Result<()> {
        let mut document = open(&self.input)?;
        let text = std::fs::read_to_string(&self.events)
            .with_context(|| format!("failed to read {}", self.events.display()))?;
        let events: Vec<PointerEvent> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.events.display()))?;

        let mut session = EditSession::with_config(document.layout.clone(), config.session.clone());
        let count = session.pump(&mut RecordedEvents::from(events));
        println!("{} events, final state: {}", count, session.state().name());
        if let Some(err) = session.last_error() {
            println!("last rejected step: {}", err);
        }

        document.set_layout(session.into_layout());
        save(&document, self.output.as_deref().unwrap_or(self.input.as_path()))
    }
}
