//! Raw-file discovery and incremental-run bookkeeping
//!
//! Finds the raw books a batch should process and, for resumed runs, the
//! set of books whose three artifacts already exist so they can be skipped
//! without opening a single file of theirs.

use anyhow::{Context, Result};
use glob::glob;
use pgcorpus_core::{BookId, CorpusLayout};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Enumerate raw files matching `PG{pattern}_raw.txt` under `raw_dir`.
///
/// `pattern` is the glob fragment standing in for the book id (`*` for the
/// whole corpus, `1234*` for a subset). Results are sorted for stable job
/// submission order.
pub fn raw_files(raw_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = raw_dir.join(format!("PG{pattern}_raw.txt"));
    let full_pattern = full_pattern
        .to_str()
        .with_context(|| format!("raw directory path '{}' is not UTF-8", raw_dir.display()))?;

    let mut files = Vec::new();
    for entry in glob(full_pattern).with_context(|| format!("invalid pattern '{pattern}'"))? {
        let path = entry.context("error while listing raw files")?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Book ids whose three artifacts all exist already.
///
/// One directory scan per artifact store, run in parallel, then a set
/// intersection. With `check_empty`, artifacts of zero length do not count
/// as done, so books truncated by an earlier crash get reprocessed.
pub fn done_set(layout: &CorpusLayout, check_empty: bool) -> Result<BTreeSet<BookId>> {
    let scans: Vec<Result<BTreeSet<BookId>>> = [
        (&layout.text_dir, "_text.txt"),
        (&layout.tokens_dir, "_tokens.txt"),
        (&layout.counts_dir, "_counts.txt"),
    ]
    .into_par_iter()
    .map(|(dir, suffix)| ids_in_dir(dir, suffix, check_empty))
    .collect();

    let mut sets = scans.into_iter().collect::<Result<Vec<_>>>()?;
    let mut done = sets.pop().unwrap_or_default();
    for set in sets {
        done = done.intersection(&set).copied().collect();
    }
    Ok(done)
}

/// Ids of artifacts named `PG{id}{suffix}` present in `dir`
fn ids_in_dir(dir: &Path, suffix: &str, check_empty: bool) -> Result<BTreeSet<BookId>> {
    let mut ids = BTreeSet::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list artifact directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("error listing '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(id) = name
            .strip_prefix("PG")
            .and_then(|rest| rest.strip_suffix(suffix))
            .and_then(|digits| digits.parse().ok())
        else {
            continue;
        };

        if check_empty {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size == 0 {
                continue;
            }
        }
        ids.insert(BookId(id));
    }

    Ok(ids)
}
