//! Sheet Assembler: one complete run from index to written artifacts.
//!
//! # Run order
//! 1. Validate the column count (no I/O yet).
//! 2. Read entries, load every image. Any failure aborts the run.
//! 3. Size the cell over fronts, backs and single-sided images.
//! 4. Build every sheet in memory.
//! 5. Hand the sheets to the writer, then `finish`.
//!
//! Nothing reaches the writer unless steps 1–4 all succeed.

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::errors::SheetError;
use crate::images::{ImageHandle, ImageProvider};
use crate::index::EntrySource;
use crate::layout::{
    cell_dimension, dropped_slots, mirror_horizontal, reorder_for_duplex, CellDimension,
    GridComposer,
};
use crate::models::{ArtifactSummary, CounterEntry, RunSummary};
use crate::render::{draw_reference_sheet, LabelPainter, ReferenceRow};
use crate::sheet::writer::{SheetKind, SheetWriter};

// ────────────────────────────────────────────────────────────────────────────
// Loaded counters
// ────────────────────────────────────────────────────────────────────────────

/// An index entry together with its decoded images.
#[derive(Debug, Clone)]
pub struct LoadedCounter {
    pub entry: CounterEntry,
    pub front: ImageHandle,
    pub back: Option<ImageHandle>,
}

/// Every counter of a run, in index order.
#[derive(Debug, Clone)]
pub struct CounterSet {
    counters: Vec<LoadedCounter>,
}

impl CounterSet {
    /// Loads front (then back) for each entry in order. Stops at the first failure.
    pub fn load(entries: Vec<CounterEntry>, provider: &dyn ImageProvider) -> Result<Self, SheetError> {
        let counters = entries
            .into_iter()
            .map(|entry| -> Result<LoadedCounter, SheetError> {
                let front = provider.load(&entry.front)?;
                let back = entry.back().map(|name| provider.load(name)).transpose()?;
                Ok(LoadedCounter { entry, front, back })
            })
            .collect::<Result<Vec<_>, SheetError>>()?;
        Ok(CounterSet { counters })
    }

    pub fn entry_count(&self) -> usize {
        self.counters.len()
    }

    fn double_sided(&self) -> impl Iterator<Item = &LoadedCounter> {
        self.counters.iter().filter(|c| c.entry.is_double_sided())
    }

    fn single_sided(&self) -> impl Iterator<Item = &LoadedCounter> {
        self.counters.iter().filter(|c| !c.entry.is_double_sided())
    }

    /// Front side order: double-sided fronts, then single-sided images.
    fn front_side(&self) -> Vec<ImageHandle> {
        self.double_sided()
            .chain(self.single_sided())
            .map(|c| c.front.clone())
            .collect()
    }

    /// Backs in the order of their fronts.
    fn backs(&self) -> Vec<ImageHandle> {
        self.double_sided()
            .filter_map(|c| c.back.clone())
            .collect()
    }

    fn images(&self) -> impl Iterator<Item = &ImageHandle> {
        self.counters
            .iter()
            .flat_map(|c| std::iter::once(&c.front).chain(c.back.as_ref()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembler
// ────────────────────────────────────────────────────────────────────────────

/// Sheets built for one run, in write order, plus the run summary.
pub struct SheetSet {
    pub sheets: Vec<(SheetKind, RgbImage)>,
    pub summary: RunSummary,
}

pub struct SheetAssembler<'a> {
    columns: usize,
    composer: GridComposer,
    reference_width: u32,
    labels: &'a dyn LabelPainter,
}

impl<'a> SheetAssembler<'a> {
    pub fn new(
        columns: usize,
        composer: GridComposer,
        reference_width: u32,
        labels: &'a dyn LabelPainter,
    ) -> Result<Self, SheetError> {
        if columns == 0 {
            return Err(SheetError::InvalidColumns(0));
        }
        Ok(SheetAssembler {
            columns,
            composer,
            reference_width,
            labels,
        })
    }

    /// Runs the whole batch. On error, no sheet has been handed to `writer`.
    pub fn run(
        &self,
        source: &dyn EntrySource,
        provider: &dyn ImageProvider,
        writer: &mut dyn SheetWriter,
    ) -> Result<RunSummary, SheetError> {
        let entries = source.entries()?;
        info!(entries = entries.len(), columns = self.columns, "Loading counters");

        let counters = CounterSet::load(entries, provider)?;
        let set = self.build(&counters)?;

        for (kind, sheet) in &set.sheets {
            debug!(
                sheet = kind.logical_name(),
                width = sheet.width(),
                height = sheet.height(),
                "Writing sheet"
            );
            writer.write_sheet(*kind, sheet)?;
        }
        writer.finish(&set.summary)?;

        Ok(set.summary)
    }

    /// Builds every sheet in memory.
    pub fn build(&self, counters: &CounterSet) -> Result<SheetSet, SheetError> {
        let columns = self.columns;
        let cell = cell_dimension(counters.images())?;
        info!(width = cell.width, height = cell.height, "Cell size");

        let front_side = counters.front_side();
        info!(total = front_side.len(), "Total counters");
        let front = self.composer.compose(&front_side, columns, cell)?;
        let rows = front.grid.rows;

        let backs = counters.backs();
        let dropped = dropped_slots(backs.len(), columns);
        if dropped > 0 {
            warn!(
                dropped,
                backs = backs.len(),
                columns,
                "Partial final row: some double-sided counters get no back tile"
            );
        }
        let reordered = reorder_for_duplex(&backs, columns)?;
        let back = self.composer.compose_with_min_rows(&reordered, columns, cell, rows)?;
        let unreordered = self.composer.compose_with_min_rows(&backs, columns, cell, rows)?;
        let flip_check = mirror_horizontal(&back.canvas);

        let mut sheets = vec![
            (SheetKind::Front, front.canvas),
            (SheetKind::Back, back.canvas),
            (SheetKind::BackUnreordered, unreordered.canvas),
            (SheetKind::BackFlipCheck, flip_check),
        ];

        let single_count = counters.single_sided().count();
        if single_count == 0 {
            info!("No single-sided counters; reference sheet omitted");
        } else {
            sheets.push((
                SheetKind::SingleSidedReference,
                self.reference_sheet(counters, cell)?,
            ));
        }

        let summary = RunSummary {
            columns,
            cell,
            entries: counters.entry_count(),
            double_sided: backs.len(),
            single_sided: single_count,
            dropped_back_slots: dropped,
            artifacts: sheets
                .iter()
                .map(|(kind, sheet)| ArtifactSummary {
                    name: kind.logical_name().to_string(),
                    file_name: kind.file_name(),
                    width: sheet.width(),
                    height: sheet.height(),
                })
                .collect(),
        };

        Ok(SheetSet { sheets, summary })
    }

    fn reference_sheet(&self, counters: &CounterSet, cell: CellDimension) -> Result<RgbImage, SheetError> {
        let rows: Vec<ReferenceRow<'_>> = counters
            .single_sided()
            .map(|c| ReferenceRow {
                image: &c.front,
                label: &c.entry.display_name,
            })
            .collect();
        draw_reference_sheet(&rows, cell, self.reference_width, self.labels)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
