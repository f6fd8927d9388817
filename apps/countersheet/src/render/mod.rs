pub mod label;
pub mod reference;

pub use label::{FontLabelPainter, LabelPainter};
#[cfg(test)]
pub use label::NoLabels;
pub use reference::{draw_reference_sheet, ReferenceRow};
