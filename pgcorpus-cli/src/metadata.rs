//! Metadata table
//!
//! The catalog CSV (derived from the Project Gutenberg RDF dump) carries
//! one row per book. We only need the `id` and `language` columns here;
//! `language` holds a Python-style list literal like `['en']` or
//! `['en', 'fr']`, a leftover of how the catalog was originally exported.

use anyhow::{Context, Result};
use pgcorpus_core::BookId;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The columns we read from the catalog; the rest are ignored
#[derive(Debug, Deserialize)]
struct CatalogRow {
    /// Book id in `PG{n}` form
    id: BookId,
    /// List-literal of ISO 639-1 codes, possibly empty
    #[serde(default)]
    language: Option<String>,
}

/// In-memory language metadata, keyed by book id
#[derive(Debug, Default, Clone)]
pub struct Metadata {
    languages: HashMap<BookId, Vec<String>>,
}

impl Metadata {
    /// Load the catalog CSV at `path`.
    ///
    /// Malformed rows (unparseable ids included) are skipped with a
    /// warning rather than failing the load; one bad catalog row must not
    /// block a batch.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("cannot open metadata file '{}'", path.display()))?;

        let mut languages = HashMap::new();
        for row in reader.deserialize() {
            let row: CatalogRow = match row {
                Ok(row) => row,
                Err(err) => {
                    log::warn!("skipping malformed metadata row: {err}");
                    continue;
                }
            };
            let codes = row.language.as_deref().map(parse_list_literal);
            languages.insert(row.id, codes.unwrap_or_default());
        }

        log::info!("loaded metadata for {} books", languages.len());
        Ok(Self { languages })
    }

    /// Declared language codes for `id`, if the catalog has a row for it
    pub fn language_codes(&self, id: BookId) -> Option<&[String]> {
        self.languages.get(&id).map(|codes| codes.as_slice())
    }

    /// Number of books in the table
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Parse a Python-style list literal of strings: `['en', 'fr']` → en, fr
fn parse_list_literal(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|item| item.trim().trim_matches('\'').trim_matches('"').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn loads_languages_by_id() {
        let file = write_catalog(
            "id,title,language\n\
             PG1,First Book,\"['en']\"\n\
             PG2,Deuxième Livre,\"['fr', 'en']\"\n\
             PG3,No Language,\n",
        );

        let metadata = Metadata::load(file.path()).unwrap();
        assert_eq!(metadata.len(), 3);
        assert_eq!(
            metadata.language_codes(BookId(1)),
            Some(["en".to_string()].as_slice())
        );
        assert_eq!(
            metadata.language_codes(BookId(2)),
            Some(["fr".to_string(), "en".to_string()].as_slice())
        );
        assert_eq!(metadata.language_codes(BookId(3)), Some([].as_slice()));
        assert_eq!(metadata.language_codes(BookId(4)), None);
    }

    #[test]
    fn skips_rows_with_bad_ids() {
        let file = write_catalog(
            "id,language\n\
             notanid,\"['en']\"\n\
             PG9,\"['de']\"\n",
        );

        let metadata = Metadata::load(file.path()).unwrap();
        assert_eq!(metadata.len(), 1);
        assert!(metadata.language_codes(BookId(9)).is_some());
    }

    #[test]
    fn list_literal_parsing() {
        assert_eq!(parse_list_literal("['en']"), ["en"]);
        assert_eq!(parse_list_literal("['en', 'fr']"), ["en", "fr"]);
        assert_eq!(parse_list_literal("[\"sv\"]"), ["sv"]);
        assert!(parse_list_literal("[]").is_empty());
        assert!(parse_list_literal("").is_empty());
    }
}
