//! 户型图命令行工具
//!
//! 查看、校验、拉伸和转换户型文件，也可以回放指针事件进行编辑。

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ConvertArgs, ExtrudeArgs, InspectArgs, NewArgs, ReplayArgs, ValidateArgs};
use config::AppConfig;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Floor plan layout and extrusion tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file with `extrude` and `session` sections
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a floor plan
    Inspect(InspectArgs),
    /// Check floor plans against all layout invariants
    Validate(ValidateArgs),
    /// Convert a floor plan into 3D boxes for a renderer
    Extrude(ExtrudeArgs),
    /// Convert between .json and .fplan
    Convert(ConvertArgs),
    /// Create a floor plan with default rooms
    New(NewArgs),
    /// Replay recorded pointer events against a floor plan
    Replay(ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 日志写到 stderr，stdout 留给 JSON 输出
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let config = AppConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Inspect(args) => args.execute(&config),
        Command::Validate(args) => args.execute(&config),
        Command::Extrude(args) => args.execute(&config),
        Command::Convert(args) => args.execute(&config),
        Command::New(args) => args.execute(&config),
        Command::Replay(args) => args.execute(&config),
    }
}
