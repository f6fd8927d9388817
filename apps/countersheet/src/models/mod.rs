pub mod entry;
pub mod summary;

pub use entry::CounterEntry;
pub use summary::{ArtifactSummary, RunSummary};
