use thiserror::Error;

pub type DedupResult<T> = Result<T, DedupError>;

/// Errors raised while deduplicating a stream of read pairs.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("Malformed record at line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Unpaired record at line {line}: input ended before its mate")]
    UnpairedRecord { line: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize statistics: {0}")]
    Serialize(#[from] serde_json::Error),
}

