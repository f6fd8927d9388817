use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building a counter sheet.
///
/// Every variant is fatal to the run: the assembler stops before any sheet is
/// handed to the writer.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("No images loaded: cannot size grid cells")]
    EmptyImageSet,

    #[error("Invalid column count {0}: columns must be a positive integer")]
    InvalidColumns(i64),

    #[error("Missing image '{name}' (looked for {})", path.display())]
    MissingImage { name: String, path: PathBuf },

    #[error("Failed to decode image '{name}': {source}")]
    ImageDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Sheet of {width}x{height} pixels exceeds the encodable size")]
    SheetTooLarge { width: u64, height: u64 },

    #[error("Malformed index entry on line {line}: {content:?}")]
    MalformedEntry { line: usize, content: String },

    #[error("Failed to encode sheet '{name}': {source}")]
    Encode {
        name: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("Font error: {0}")]
    Font(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest serialization error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl SheetError {
    /// Short machine-readable code, logged alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::EmptyImageSet => "EMPTY_IMAGE_SET",
            SheetError::InvalidColumns(_) => "INVALID_COLUMNS",
            SheetError::MissingImage { .. } => "MISSING_IMAGE",
            SheetError::ImageDecode { .. } => "IMAGE_DECODE",
            SheetError::SheetTooLarge { .. } => "SHEET_TOO_LARGE",
            SheetError::MalformedEntry { .. } => "MALFORMED_ENTRY",
            SheetError::Encode { .. } => "ENCODE_ERROR",
            SheetError::Font(_) => "FONT_ERROR",
            SheetError::Io(_) => "IO_ERROR",
            SheetError::Manifest(_) => "MANIFEST_ERROR",
        }
    }
}

/// Validates a column count and converts it to `usize`.
///
/// Zero and negative counts are rejected with `InvalidColumns`.
pub fn validate_columns(columns: i64) -> Result<usize, SheetError> {
    if columns <= 0 {
        return Err(SheetError::InvalidColumns(columns));
    }
    usize::try_from(columns).map_err(|_| SheetError::InvalidColumns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_columns_rejects_zero_and_negative() {
        assert!(matches!(
            validate_columns(0),
            Err(SheetError::InvalidColumns(0))
        ));
        assert!(matches!(
            validate_columns(-3),
            Err(SheetError::InvalidColumns(-3))
        ));
    }

    #[test]
    fn test_validate_columns_accepts_positive() {
        assert_eq!(validate_columns(11).unwrap(), 11);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(SheetError::EmptyImageSet.code(), "EMPTY_IMAGE_SET");
        let err = SheetError::MalformedEntry {
            line: 4,
            content: "a:b:c".to_string(),
        };
        assert_eq!(err.code(), "MALFORMED_ENTRY");
        assert!(err.to_string().contains("line 4"));
    }
}
