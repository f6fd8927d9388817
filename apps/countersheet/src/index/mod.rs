//! Counter index: the ordered list of counters to lay out.
//!
//! # Line format
//! - `front`        single-sided counter
//! - `front:back`   double-sided counter
//! - `front:`       single-sided (blank trailing field)
//!
//! Fields are trimmed. Blank lines and lines starting with `#` or `//` are
//! skipped. Anything with more than two fields, or an empty front, is malformed.

use std::path::PathBuf;

use tracing::debug;

use crate::errors::SheetError;
use crate::models::CounterEntry;

/// Supplies counter entries in index order.
pub trait EntrySource {
    fn entries(&self) -> Result<Vec<CounterEntry>, SheetError>;
}

/// An index file on disk.
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IndexFile { path: path.into() }
    }
}

impl EntrySource for IndexFile {
    fn entries(&self) -> Result<Vec<CounterEntry>, SheetError> {
        let text = std::fs::read_to_string(&self.path)?;
        let entries = parse_index(&text)?;
        debug!(path = %self.path.display(), count = entries.len(), "Parsed counter index");
        Ok(entries)
    }
}

/// Index text held in memory.
#[cfg(test)]
pub struct IndexText(pub String);

#[cfg(test)]
impl EntrySource for IndexText {
    fn entries(&self) -> Result<Vec<CounterEntry>, SheetError> {
        parse_index(&self.0)
    }
}

/// Parses index text into entries. Ordinals count entries, not lines.
pub fn parse_index(text: &str) -> Result<Vec<CounterEntry>, SheetError> {
    let mut entries = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let malformed = || SheetError::MalformedEntry {
            line: line_no + 1,
            content: raw.to_string(),
        };

        let fields: Vec<&str> = line.split(':').map(str::trim).collect();
        let ordinal = entries.len();
        let entry = match fields.as_slice() {
            [front] if !front.is_empty() => CounterEntry::single(ordinal, *front),
            [front, back] if !front.is_empty() => {
                if back.is_empty() {
                    CounterEntry::single(ordinal, *front)
                } else {
                    CounterEntry::double(ordinal, *front, *back)
                }
            }
            _ => return Err(malformed()),
        };
        entries.push(entry);
    }

    Ok(entries)
}
