use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use crate::errors::validate_columns;
use crate::layout::Resample;

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub columns: usize,
    pub image_dir: PathBuf,
    pub index_path: PathBuf,
    pub output_dir: PathBuf,
    pub resample: Resample,
    pub reference_width: u32,
    pub font_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let columns =
            validate_columns(cli.columns).context("COUNTERSHEET_COLUMNS / --columns is invalid")?;

        if !cli.image_dir.is_dir() {
            bail!(
                "Image directory '{}' does not exist",
                cli.image_dir.display()
            );
        }
        if !cli.index_path.is_file() {
            bail!("Index file '{}' does not exist", cli.index_path.display());
        }
        if cli.reference_width == 0 {
            bail!("Reference sheet width must be positive");
        }

        Ok(Config {
            columns,
            image_dir: cli.image_dir,
            index_path: cli.index_path,
            output_dir: cli.output_dir,
            resample: cli.resample,
            reference_width: cli.reference_width,
            font_path: cli.font_path,
            log_level: cli.log_level,
        })
    }
}
