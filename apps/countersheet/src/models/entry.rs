use serde::{Deserialize, Serialize};

/// Whether a counter has one printed face or a front/back pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterKind {
    SingleSided,
    DoubleSided { back: String },
}

/// One line of the counter index.
///
/// `ordinal` is the 0-based position of the entry in the index and is the
/// identity that links a front tile to its back tile (or to its label on the
/// reference sheet). Entries are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterEntry {
    pub ordinal: usize,
    pub front: String,
    #[serde(flatten)]
    pub kind: CounterKind,
    pub display_name: String,
}

impl CounterEntry {
    pub fn single(ordinal: usize, front: impl Into<String>) -> Self {
        let front = front.into();
        CounterEntry {
            ordinal,
            display_name: front.clone(),
            front,
            kind: CounterKind::SingleSided,
        }
    }

    pub fn double(ordinal: usize, front: impl Into<String>, back: impl Into<String>) -> Self {
        let front = front.into();
        CounterEntry {
            ordinal,
            display_name: front.clone(),
            front,
            kind: CounterKind::DoubleSided { back: back.into() },
        }
    }

    pub fn back(&self) -> Option<&str> {
        match &self.kind {
            CounterKind::SingleSided => None,
            CounterKind::DoubleSided { back } => Some(back),
        }
    }

    pub fn is_double_sided(&self) -> bool {
        matches!(self.kind, CounterKind::DoubleSided { .. })
    }
}
