mod cli;
mod config;
mod errors;
mod images;
mod index;
mod layout;
mod models;
mod render;
mod sheet;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::images::DirImageProvider;
use crate::index::IndexFile;
use crate::layout::GridComposer;
use crate::render::FontLabelPainter;
use crate::sheet::{DirSheetWriter, SheetAssembler};

fn main() -> Result<()> {
    // .env values feed clap's env fallbacks, so load them before parsing.
    dotenvy::dotenv().ok();
    let config = Config::from_cli(Cli::parse())?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.log_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting countersheet v{}", env!("CARGO_PKG_VERSION"));
    info!(
        columns = config.columns,
        images = %config.image_dir.display(),
        index = %config.index_path.display(),
        resample = ?config.resample,
        "Configuration loaded"
    );

    let labels = build_label_painter(&config)?;
    let assembler = SheetAssembler::new(
        config.columns,
        GridComposer::new(config.resample),
        config.reference_width,
        &labels,
    )?;

    let source = IndexFile::new(&config.index_path);
    let provider = DirImageProvider::new(&config.image_dir);
    let mut writer = DirSheetWriter::create(&config.output_dir)
        .with_context(|| format!("Cannot prepare output directory {}", config.output_dir.display()))?;

    let summary = assembler
        .run(&source, &provider, &mut writer)
        .inspect_err(|e| error!(code = e.code(), "Run failed: {e}"))?;

    info!(
        counters = summary.entries,
        sheets = summary.artifacts.len(),
        output = %writer.output_dir().display(),
        "Done"
    );
    Ok(())
}

/// Uses `--font` when given, else the built-in face.
fn build_label_painter(config: &Config) -> Result<FontLabelPainter> {
    match &config.font_path {
        Some(path) => FontLabelPainter::from_file(path)
            .with_context(|| format!("Failed to load label font {}", path.display())),
        None => Ok(FontLabelPainter::embedded()?),
    }
}
