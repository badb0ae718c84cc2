use std::path::PathBuf;

/// Errors raised while loading launch records or validating selector input.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// The launch record file could not be opened.
    #[error("failed to open launch records at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed as a launch record.
    #[error("malformed launch records: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but holds values outside the record's domain.
    #[error("invalid launch record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// The file had a header but no data rows.
    #[error("launch record table is empty")]
    EmptyStore,

    /// A payload range with inverted or non-finite bounds.
    #[error("invalid payload range [{low}, {high}]: {reason}")]
    InvalidRange {
        low: f64,
        high: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, DashError>;
