//! Error types for the lupe-core crate.

use thiserror::Error;

use crate::source::DocId;

/// Errors reported by an [`IndexSource`](crate::IndexSource) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The underlying index could not be queried.
    #[error("index unavailable: {0}")]
    Unavailable(String),

    /// The field is not known to the index.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The field was indexed without position data.
    #[error("field '{field}' was indexed without positions")]
    PositionsUnavailable {
        /// Name of the field.
        field: String,
    },
}

/// Errors returned by the top-terms collector and the field reconstructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A caller-supplied argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested document is out of range or deleted.
    #[error("document {doc} not found (max doc {max_doc})")]
    DocumentNotFound {
        /// Requested document ordinal.
        doc: DocId,
        /// Exclusive upper bound of document ordinals in the index.
        max_doc: DocId,
    },

    /// The index source could not be queried.
    #[error("index unavailable: {0}")]
    IndexUnavailable(String),
}

impl From<SourceError> for AnalysisError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(message) => Self::IndexUnavailable(message),
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}
