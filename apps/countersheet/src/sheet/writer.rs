//! Sheet Writer: persists the finished artifacts of a run.
//!
//! `DirSheetWriter` stages every PNG in a hidden temporary directory inside the
//! output directory and only moves them into place in `finish`. If the run fails
//! (or the writer is dropped) before `finish`, the staging directory is removed
//! and the output directory is left as it was.
//!
//! Publishing is all-or-nothing. Files a previous run left under the same names
//! are set aside first (and artifacts this run did not produce are retired with
//! them), so a failed rename restores the directory to its earlier state.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use serde::Serialize;
use tempfile::TempDir;
use tracing::{info, warn};

use crate::errors::SheetError;
use crate::models::RunSummary;

pub const MANIFEST_FILE: &str = "manifest.json";

// ────────────────────────────────────────────────────────────────────────────
// Artifact names
// ────────────────────────────────────────────────────────────────────────────

/// The fixed set of sheets a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// Back sheet mirrored about its vertical axis; should read in front order.
    BackFlipCheck,
    Front,
    /// Backs in front order, before the duplex reorder.
    BackUnreordered,
    Back,
    SingleSidedReference,
}

impl SheetKind {
    pub const ALL: [SheetKind; 5] = [
        SheetKind::BackFlipCheck,
        SheetKind::Front,
        SheetKind::BackUnreordered,
        SheetKind::Back,
        SheetKind::SingleSidedReference,
    ];

    pub fn logical_name(self) -> &'static str {
        match self {
            SheetKind::BackFlipCheck => "back-flip-check",
            SheetKind::Front => "front",
            SheetKind::BackUnreordered => "back-unreordered",
            SheetKind::Back => "back",
            SheetKind::SingleSidedReference => "single-sided-reference",
        }
    }

    /// Numeric file prefix; sorts the files in the order they are usually checked.
    fn sequence(self) -> u8 {
        match self {
            SheetKind::BackFlipCheck => 0,
            SheetKind::Front => 1,
            SheetKind::BackUnreordered => 2,
            SheetKind::Back => 3,
            SheetKind::SingleSidedReference => 5,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}-{}.png", self.sequence(), self.logical_name())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Writer trait
// ────────────────────────────────────────────────────────────────────────────

pub trait SheetWriter {
    fn write_sheet(&mut self, kind: SheetKind, sheet: &RgbImage) -> Result<(), SheetError>;

    /// Called once after every sheet of the run has been written.
    fn finish(&mut self, summary: &RunSummary) -> Result<(), SheetError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Directory writer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Manifest<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// One step of a publish, undone in reverse order on failure.
struct Published {
    target: PathBuf,
    /// Where the file previously at `target` was moved.
    previous: Option<PathBuf>,
}

pub struct DirSheetWriter {
    output_dir: PathBuf,
    staging: TempDir,
    staged: Vec<String>,
}

impl DirSheetWriter {
    /// Creates `output_dir` if needed and opens a staging directory inside it.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self, SheetError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        let staging = tempfile::Builder::new()
            .prefix(".countersheet-")
            .tempdir_in(&output_dir)?;
        Ok(DirSheetWriter {
            output_dir,
            staging,
            staged: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Moves `staged` into the output directory and retires stale artifacts.
    fn publish(&self, staged: &[String]) -> Result<(), SheetError> {
        let previous_dir = self.staging.path().join("previous");
        std::fs::create_dir(&previous_dir)?;

        let stale = SheetKind::ALL
            .iter()
            .map(|kind| kind.file_name())
            .filter(|name| !staged.contains(name));

        let mut done = Vec::new();
        for file_name in stale {
            if let Err(e) = self.set_aside(&file_name, &previous_dir, &mut done) {
                self.roll_back(done);
                return Err(e);
            }
        }
        for file_name in staged {
            let result = self.set_aside(file_name, &previous_dir, &mut done).and_then(|()| {
                std::fs::rename(
                    self.staging.path().join(file_name),
                    self.output_dir.join(file_name),
                )
                .map_err(SheetError::from)
            });
            if let Err(e) = result {
                self.roll_back(done);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Moves an existing output file into `previous_dir` and records the step.
    fn set_aside(
        &self,
        file_name: &str,
        previous_dir: &Path,
        done: &mut Vec<Published>,
    ) -> Result<(), SheetError> {
        let target = self.output_dir.join(file_name);
        let previous = if target.is_file() {
            let kept = previous_dir.join(file_name);
            std::fs::rename(&target, &kept)?;
            Some(kept)
        } else {
            None
        };
        done.push(Published { target, previous });
        Ok(())
    }

    fn roll_back(&self, done: Vec<Published>) {
        for step in done.into_iter().rev() {
            if step.target.is_file() {
                if let Err(e) = std::fs::remove_file(&step.target) {
                    warn!(file = %step.target.display(), "Rollback could not remove file: {e}");
                }
            }
            if let Some(previous) = step.previous {
                if let Err(e) = std::fs::rename(&previous, &step.target) {
                    warn!(file = %step.target.display(), "Rollback could not restore file: {e}");
                }
            }
        }
    }
}

impl SheetWriter for DirSheetWriter {
    fn write_sheet(&mut self, kind: SheetKind, sheet: &RgbImage) -> Result<(), SheetError> {
        let file_name = kind.file_name();
        sheet
            .save_with_format(self.staging.path().join(&file_name), ImageFormat::Png)
            .map_err(|source| SheetError::Encode {
                name: kind.logical_name(),
                source,
            })?;
        self.staged.push(file_name);
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SheetError> {
        let manifest = Manifest {
            generated_at: Utc::now(),
            summary,
        };
        let json = serde_json::to_vec_pretty(&manifest)?;
        std::fs::write(self.staging.path().join(MANIFEST_FILE), json)?;
        self.staged.push(MANIFEST_FILE.to_string());

        let staged = std::mem::take(&mut self.staged);
        self.publish(&staged)?;

        info!(output_dir = %self.output_dir.display(), "Sheets written");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
