use std::path::PathBuf;

use clap::Parser;

use crate::layout::Resample;

/// Command-line arguments. Every flag falls back to a `COUNTERSHEET_*` environment
/// variable, which may also come from a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "countersheet", version)]
#[command(about = "Compose duplex-aligned counter sheets from tile images", long_about = None)]
pub struct Cli {
    /// Counters per sheet row
    #[arg(short, long, env = "COUNTERSHEET_COLUMNS", allow_negative_numbers = true)]
    pub columns: i64,

    /// Directory that image names in the index are relative to
    #[arg(long = "images", env = "COUNTERSHEET_IMAGE_DIR", default_value = "images")]
    pub image_dir: PathBuf,

    /// Counter index file (`front` or `front:back` per line)
    #[arg(long = "index", env = "COUNTERSHEET_INDEX", default_value = "idx")]
    pub index_path: PathBuf,

    /// Directory the sheets are written to
    #[arg(short, long = "output", env = "COUNTERSHEET_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Filter used to stretch tiles into cells (nearest, triangle, catmull-rom, lanczos3)
    #[arg(long, env = "COUNTERSHEET_RESAMPLE", default_value = "triangle")]
    pub resample: Resample,

    /// Pixel width of the single-sided reference sheet
    #[arg(long, env = "COUNTERSHEET_REFERENCE_WIDTH", default_value_t = 600)]
    pub reference_width: u32,

    /// TTF/OTF font for reference-sheet labels (defaults to a system font)
    #[arg(long = "font", env = "COUNTERSHEET_FONT")]
    pub font_path: Option<PathBuf>,

    /// Log level for this crate when RUST_LOG is unset
    #[arg(long, env = "COUNTERSHEET_LOG", default_value = "info")]
    pub log_level: String,
}
