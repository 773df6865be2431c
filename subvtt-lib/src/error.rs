use serde::Serialize;
use thiserror::Error;

/// Main error type for the subtitle library
///
/// Conversion itself never fails; this only covers the inputs a caller
/// hands to the library before conversion starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A format hint that is neither SRT, ASS nor "auto"
    #[error("Unknown subtitle format: {0}")]
    UnknownFormat(String),
}

/// Why a single SRT block or ASS dialogue row produced no cue
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// SRT block with fewer than two lines
    #[error("block has fewer than two lines")]
    TooFewLines,

    /// SRT block without a `-->` line containing a comma
    #[error("no timing line found")]
    MissingTimingLine,

    /// Nothing left to display after the timing line or after tag stripping
    #[error("cue text is empty")]
    EmptyText,

    /// `Dialogue:` row seen before any `Format:` line in the section
    #[error("dialogue row precedes the Format line")]
    MissingSchema,

    /// `Dialogue:` row with fewer fields than the schema declares
    #[error("expected {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    /// Required column absent from the schema or empty in the row
    #[error("missing or empty field: {field}")]
    MissingField { field: &'static str },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubtitleError>;
