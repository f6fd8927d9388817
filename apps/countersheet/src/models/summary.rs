use serde::{Deserialize, Serialize};

use crate::layout::CellDimension;

/// Pixel size of one produced artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub name: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Record of a completed run. Written to `manifest.json` by the directory writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub columns: usize,
    pub cell: CellDimension,
    pub entries: usize,
    pub double_sided: usize,
    pub single_sided: usize,
    /// Back slots dropped by the partial-row mirror rule.
    pub dropped_back_slots: usize,
    pub artifacts: Vec<ArtifactSummary>,
}
