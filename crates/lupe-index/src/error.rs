//! Error types for the lupe-index crate.

use std::{io, path::PathBuf};

use lupe_core::SourceError;
use thiserror::Error;

/// Errors that can occur when opening, reading or writing a tantivy index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to read from an open index.
    #[error("failed to read index: {0}")]
    Read(String),

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The index source reported an error.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Read` error from a Tantivy error.
    pub fn read(source: &tantivy::TantivyError) -> Self {
        Self::Read(source.to_string())
    }

    /// Creates a `Write` error from a Tantivy error.
    pub fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }
}
