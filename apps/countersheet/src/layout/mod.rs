// Sheet layout: cell sizing, fixed-column grid composition, duplex back alignment.
// Pure computation over loaded images; no I/O.

pub mod cell;
pub mod duplex;
pub mod grid;

// Re-export the public API consumed by the assembler.
pub use cell::{cell_dimension, CellDimension};
pub use duplex::{dropped_slots, mirror_horizontal, reorder_for_duplex};
pub use grid::{GridComposer, Resample};
