//! Error types returned by the search server.

use thiserror::Error;

use crate::DocId;

/// Result type alias for search server operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Any failure reported by the search server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Rejected input: bad document ids, bad characters, malformed queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("negative document id {0} is not allowed")]
    NegativeId(DocId),

    #[error("document id {0} is already in use")]
    DuplicateId(DocId),

    #[error("word {0:?} contains a control character")]
    InvalidCharacter(String),

    #[error("empty minus word")]
    EmptyMinusWord,

    #[error("double minus in word {0:?}")]
    DoubleMinusWord(String),

    #[error("empty query word")]
    EmptyToken,

    #[error("page size must be positive")]
    ZeroPageSize,
}

/// Lookup of something the server does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("document index {index} is out of range for {len} documents")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown document id {0}")]
    UnknownDocumentId(DocId),
}

impl SearchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}
