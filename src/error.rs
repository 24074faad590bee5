//! Error type shared by the songbook core. The driver and CLI wrap these in
//! `anyhow` with context; inside the core every failure stays typed so callers
//! can match on the specific kind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SongbookError {
    /// A key spelling that does not map onto the 12-key cycle.
    #[error("invalid key spelling: {0:?}")]
    InvalidKey(String),
    /// Only `name` and `key` are sortable dimensions.
    #[error("can only sort by names or keys, got {0:?}")]
    InvalidSortDimension(String),
    #[error("unknown column: {0:?}")]
    UnknownField(String),
    /// Two songbooks (or a songbook and a CSV header) disagree on columns.
    #[error("column schema mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },
    #[error("row {line} has an empty name")]
    MissingName { line: u64 },
    /// A row with more cells than the header, usually a title holding an
    /// unquoted comma.
    #[error("row {line} has {found} cells, expected at most {expected}")]
    ExtraCells {
        line: u64,
        found: usize,
        expected: usize,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = SongbookError> = std::result::Result<T, E>;
