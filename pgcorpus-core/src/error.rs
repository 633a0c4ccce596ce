//! Layered error types for the processing pipeline
//!
//! Errors are split into two severities: batch-fatal errors (bad
//! configuration, missing external resources) and per-book errors that the
//! batch runner recovers from by skipping the book.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while processing books
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid or missing configuration (output directory absent, etc.)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Filename does not match any recognized raw-book pattern
    #[error("unrecognized book filename: {path}")]
    BadFilename {
        /// The offending path
        path: PathBuf,
    },

    /// Raw file is not valid text in the declared encoding
    #[error("cannot decode '{path}' as UTF-8")]
    Decoding {
        /// Path of the undecodable file
        path: PathBuf,
    },

    /// Catalog id is not in `PG{n}` form
    #[error("unrecognized book id '{id}'")]
    BadBookId {
        /// The offending id string
        id: String,
    },

    /// Book id absent from the metadata table
    #[error("no metadata row for {book_id}")]
    MetadataMissing {
        /// The book id that was looked up
        book_id: String,
    },

    /// A linguistic resource required by the tokenizer is not available
    #[error("tokenizer resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// I/O failure while reading or writing an artifact
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Whether this error dooms the whole batch rather than a single book.
    ///
    /// A missing tokenizer resource fails every job identically, and a
    /// configuration error means no job can produce output, so neither is
    /// worth retrying book by book.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::Configuration(_) | PipelineError::ResourceUnavailable(_)
        )
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classes() {
        assert!(PipelineError::Configuration("no text dir".into()).is_batch_fatal());
        assert!(PipelineError::ResourceUnavailable("punkt model".into()).is_batch_fatal());
    }

    #[test]
    fn recoverable_classes() {
        assert!(!PipelineError::Decoding {
            path: PathBuf::from("PG1_raw.txt")
        }
        .is_batch_fatal());
        assert!(!PipelineError::MetadataMissing {
            book_id: "PG1".into()
        }
        .is_batch_fatal());
        assert!(!PipelineError::BadFilename {
            path: PathBuf::from("notes.txt")
        }
        .is_batch_fatal());
        assert!(!PipelineError::BadBookId { id: "7".into() }.is_batch_fatal());
    }

    #[test]
    fn display_includes_path() {
        let err = PipelineError::Decoding {
            path: PathBuf::from("data/raw/PG77_raw.txt"),
        };
        assert!(err.to_string().contains("PG77_raw.txt"));
    }
}
