//! Standardized Project Gutenberg corpus pipeline
//!
//! Turns raw Project Gutenberg e-texts into three derived artifacts per
//! book: cleaned text (boilerplate removed), a token sequence, and word
//! frequency counts. Each book's run is independent and idempotent, which
//! is what lets the CLI fan the pipeline out over a worker pool and resume
//! interrupted batches.
//!
//! # Example
//!
//! ```rust
//! use pgcorpus_core::{strip_headers, count_tokens, Tokenizer, WordTokenizer};
//!
//! let clean = strip_headers("Produced by Volunteers\nCall me Ishmael.");
//! assert_eq!(clean, "Call me Ishmael.");
//!
//! let tokens = WordTokenizer::new().tokenize(&clean, "english").unwrap();
//! assert_eq!(tokens, ["call", "me", "ishmael"]);
//!
//! let counts = count_tokens(&tokens);
//! assert_eq!(counts[0], ("call".to_string(), 1));
//! ```

pub mod book;
pub mod cleanup;
pub mod count;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod store;
pub mod tokenize;

pub use book::BookId;
pub use cleanup::strip_headers;
pub use count::count_tokens;
pub use error::{PipelineError, Result};
pub use language::{language_name, resolve_language, DEFAULT_LANGUAGE};
pub use pipeline::{BookProcessor, LogRecord, Outcome};
pub use store::{write_atomic, CorpusLayout};
pub use tokenize::{Tokenizer, WordTokenizer};
