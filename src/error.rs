use std::fmt;

use crate::utils::validation::MAX_RECORDS;

/// Which input corpus a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusKind {
    Queries,
    References,
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queries => write!(f, "queries"),
            Self::References => write!(f, "references"),
        }
    }
}

/// Fatal conditions that abort a matching run.
///
/// An unmatched query is not an error; it is reported through
/// [`crate::matching::report::MatchResult::Unmatched`].
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// `record` is 1-based so it lines up with the input file
    #[error(
        "Record {record} of {corpus} is {len} bytes, exceeding the buffer capacity of {capacity} (increase --buffer-size)"
    )]
    BufferOverflow {
        corpus: CorpusKind,
        record: usize,
        len: usize,
        capacity: usize,
    },

    #[error("No {0} supplied")]
    EmptyCorpus(CorpusKind),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Scorer failed comparing query '{query}' against reference '{reference}': {message}")]
    ScorerFailure {
        query: String,
        reference: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
