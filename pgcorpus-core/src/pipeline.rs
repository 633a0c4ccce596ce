//! Per-book processing pipeline
//!
//! Drives one book through cleanup, tokenization, and counting, persisting
//! the three artifacts. The processor owns no shared mutable state; the log
//! record is returned to the caller, which serializes log appends (workers
//! never touch the log file themselves).

use crate::book::BookId;
use crate::count::count_tokens;
use crate::error::{PipelineError, Result};
use crate::store::{write_atomic, CorpusLayout};
use crate::tokenize::Tokenizer;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// One line of the processing log: what was processed and how big it was
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Book that was processed
    pub book_id: BookId,
    /// Tokenizer language used
    pub language: String,
    /// Newline count of the raw text
    pub raw_lines: usize,
    /// Newline count of the cleaned text
    pub clean_lines: usize,
    /// Total token count
    pub tokens: usize,
    /// Distinct token count
    pub vocabulary: usize,
}

impl LogRecord {
    /// Append this record as one TSV line to the log file at `path`.
    ///
    /// Must only be called from a single thread per log file; concurrent
    /// appenders would interleave partial lines.
    pub fn append_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        writeln!(file, "{self}").map_err(io_err)?;
        Ok(())
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.book_id,
            self.language,
            self.raw_lines,
            self.clean_lines,
            self.tokens,
            self.vocabulary
        )
    }
}

/// Result of processing one book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All three artifacts were written
    Processed(LogRecord),
    /// All three artifacts already existed; nothing was done
    Skipped(BookId),
}

/// Processes single books from raw file to counts artifact.
///
/// Cheap to clone and share across worker threads: the tokenizer capability
/// is behind an `Arc`, and the layout is a handful of paths.
#[derive(Clone)]
pub struct BookProcessor {
    layout: CorpusLayout,
    tokenizer: Arc<dyn Tokenizer>,
    overwrite_all: bool,
    check_empty: bool,
}

impl BookProcessor {
    /// Create a processor writing into `layout` with the given tokenizer
    pub fn new(layout: CorpusLayout, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            layout,
            tokenizer,
            overwrite_all: false,
            check_empty: false,
        }
    }

    /// Reprocess books even when all artifacts already exist
    pub fn overwrite_all(mut self, overwrite: bool) -> Self {
        self.overwrite_all = overwrite;
        self
    }

    /// Treat empty existing artifacts as not done.
    ///
    /// Must match the batch runner's "already done" scan, or a book the
    /// runner submitted because of a truncated artifact would be skipped
    /// right here and never repaired.
    pub fn check_empty(mut self, check_empty: bool) -> Self {
        self.check_empty = check_empty;
        self
    }

    /// Process the raw file at `raw_path` in `language`.
    ///
    /// Skips all work when the three artifacts already exist (unless
    /// overwriting); a re-run over a processed corpus touches nothing and
    /// rewrites byte-identical artifacts when forced.
    pub fn process(&self, raw_path: &Path, language: &str) -> Result<Outcome> {
        let book_id = BookId::from_filename(raw_path)?;

        let done = if self.check_empty {
            self.layout.is_done_nonempty(book_id)
        } else {
            self.layout.is_done(book_id)
        };
        if !self.overwrite_all && done {
            return Ok(Outcome::Skipped(book_id));
        }

        let raw = read_utf8(raw_path)?;
        let clean = crate::cleanup::strip_headers(&raw);
        write_atomic(&self.layout.text_path(book_id), &clean)?;

        let tokens = self.tokenizer.tokenize(&clean, language)?;
        let mut tokens_file = tokens.join("\n");
        tokens_file.push('\n');
        write_atomic(&self.layout.tokens_path(book_id), &tokens_file)?;

        let counts = count_tokens(&tokens);
        let mut counts_file = String::new();
        for (word, count) in &counts {
            counts_file.push_str(word);
            counts_file.push('\t');
            counts_file.push_str(&count.to_string());
            counts_file.push('\n');
        }
        write_atomic(&self.layout.counts_path(book_id), &counts_file)?;

        Ok(Outcome::Processed(LogRecord {
            book_id,
            language: language.to_string(),
            raw_lines: raw.matches('\n').count(),
            clean_lines: clean.matches('\n').count(),
            tokens: tokens.len(),
            vocabulary: counts.len(),
        }))
    }
}

/// Read a file that must be valid UTF-8; invalid bytes are a per-book
/// decoding error, not an I/O failure.
fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| PipelineError::Decoding {
        path: path.to_path_buf(),
    })
}
