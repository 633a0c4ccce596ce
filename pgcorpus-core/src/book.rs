//! Book identity and artifact naming
//!
//! Every book in the corpus is keyed by its numeric Project Gutenberg id.
//! Raw files arrive under a handful of historical naming schemes; artifacts
//! we produce always use the canonical `PG{id}_*` names.

use crate::error::{PipelineError, Result};
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Canonical numeric identifier of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub u32);

/// Raw-file naming schemes found in Project Gutenberg mirrors:
/// `12345-0.txt`, `pg12345.txt.utf8` (or `.utf-8`), and our own
/// `PG12345_raw.txt`.
fn filename_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"^(\d+)-0\.txt$").unwrap(),
            Regex::new(r"^pg(\d+)\.txt\.utf-?8$").unwrap(),
            Regex::new(r"^PG(\d+)_raw\.txt$").unwrap(),
        ]
    })
}

impl BookId {
    /// Extract the book id from a raw filename.
    ///
    /// Fails loudly on anything that does not match a recognized pattern;
    /// a silently skipped book would go missing from the corpus without
    /// a trace.
    pub fn from_filename(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PipelineError::BadFilename {
                path: path.to_path_buf(),
            })?;

        for pattern in filename_patterns() {
            if let Some(caps) = pattern.captures(name) {
                let id = caps[1].parse().map_err(|_| PipelineError::BadFilename {
                    path: path.to_path_buf(),
                })?;
                return Ok(BookId(id));
            }
        }

        Err(PipelineError::BadFilename {
            path: path.to_path_buf(),
        })
    }

    /// Canonical raw filename, `PG{id}_raw.txt`
    pub fn raw_filename(&self) -> String {
        format!("PG{}_raw.txt", self.0)
    }

    /// Cleaned-text artifact filename, `PG{id}_text.txt`
    pub fn text_filename(&self) -> String {
        format!("PG{}_text.txt", self.0)
    }

    /// Tokens artifact filename, `PG{id}_tokens.txt`
    pub fn tokens_filename(&self) -> String {
        format!("PG{}_tokens.txt", self.0)
    }

    /// Counts artifact filename, `PG{id}_counts.txt`
    pub fn counts_filename(&self) -> String {
        format!("PG{}_counts.txt", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PG{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = PipelineError;

    /// Parse a catalog-form id like `PG2701`
    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix("PG")
            .and_then(|digits| digits.parse().ok())
            .map(BookId)
            .ok_or_else(|| PipelineError::BadBookId { id: s.to_string() })
    }
}

/// Book ids travel in catalog form (`PG{n}`), matching both `Display` and
/// the `id` column of the metadata CSV.
impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse().map_err(de::Error::custom)
    }
}
