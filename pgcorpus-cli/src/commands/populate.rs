//! Populate command: fill the raw directory from a local mirror
//!
//! A Project Gutenberg mirror keeps the same book under several layouts,
//! typically `1/2/3/4/12345/12345-0.txt` plus a duplicate at
//! `cache/epub/12345/pg12345.txt.utf8`. This command walks the mirror,
//! prefers the `-0.txt` copy when both exist, and hard-links each book into
//! the raw directory under its canonical `PG{id}_raw.txt` name (falling
//! back to a copy when linking across filesystems fails).

use crate::commands::init_logging;
use anyhow::{bail, Context, Result};
use clap::Args;
use glob::glob;
use pgcorpus_core::BookId;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the populate command
#[derive(Debug, Args)]
pub struct PopulateArgs {
    /// Local mirror directory to read from
    #[arg(short, long, value_name = "DIR", default_value = "data/.mirror")]
    pub mirror: PathBuf,

    /// Raw directory to populate
    #[arg(short, long, value_name = "DIR", default_value = "data/raw")]
    pub raw: PathBuf,

    /// Replace raw files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Suppress the summary and duplicate warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Accounting of one populate run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PopulateSummary {
    /// Candidate files seen in the mirror
    pub found: usize,
    /// Books linked or copied into the raw directory
    pub populated: usize,
    /// Cache copies skipped because a `-0.txt` copy exists
    pub duplicates: usize,
    /// Books left alone because the raw file already exists
    pub existing: usize,
}

impl fmt::Display for PopulateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mirror files found: {}", self.found)?;
        writeln!(f, "Populated:          {}", self.populated)?;
        writeln!(f, "Duplicates skipped: {}", self.duplicates)?;
        write!(f, "Already present:    {}", self.existing)
    }
}

impl PopulateArgs {
    /// Execute the populate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        let summary = self.run()?;
        if !self.quiet {
            println!("{summary}");
        }
        Ok(())
    }

    /// Walk the mirror and populate the raw directory
    pub fn run(&self) -> Result<PopulateSummary> {
        if !self.mirror.is_dir() {
            bail!("mirror directory '{}' does not exist", self.mirror.display());
        }
        if !self.raw.is_dir() {
            bail!("raw directory '{}' does not exist", self.raw.display());
        }

        let primary = self.mirror_files("**/*-0.txt")?;
        let cache = {
            let mut cache = self.mirror_files("**/pg*.txt.utf8")?;
            cache.extend(self.mirror_files("**/pg*.txt.utf-8")?);
            cache
        };

        let mut summary = PopulateSummary::default();
        let mut primary_ids = BTreeSet::new();

        for (id, path) in &primary {
            summary.found += 1;
            primary_ids.insert(*id);
            self.install(*id, path, &mut summary)?;
        }

        for (id, path) in &cache {
            summary.found += 1;
            if primary_ids.contains(id) {
                log::warn!(
                    "skipping '{}': duplicate of an existing -0.txt file",
                    path.display()
                );
                summary.duplicates += 1;
                continue;
            }
            self.install(*id, path, &mut summary)?;
        }

        Ok(summary)
    }

    /// Mirror files matching `pattern` whose names parse as a book id
    fn mirror_files(&self, pattern: &str) -> Result<Vec<(BookId, PathBuf)>> {
        let full_pattern = self.mirror.join(pattern);
        let full_pattern = full_pattern
            .to_str()
            .with_context(|| format!("mirror path '{}' is not UTF-8", self.mirror.display()))?;

        let mut files = Vec::new();
        for entry in glob(full_pattern).context("invalid mirror pattern")? {
            let path = entry.context("error while walking the mirror")?;
            if !path.is_file() {
                continue;
            }
            match BookId::from_filename(&path) {
                Ok(id) => files.push((id, path)),
                // Odd names (extra dashes, stray suffixes) are not books.
                Err(_) => log::debug!("ignoring mirror file '{}'", path.display()),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Hard-link (or copy) one mirror file to its canonical raw name
    fn install(&self, id: BookId, source: &Path, summary: &mut PopulateSummary) -> Result<()> {
        let target = self.raw.join(id.raw_filename());

        if target.is_file() {
            if !self.overwrite {
                summary.existing += 1;
                return Ok(());
            }
            fs::remove_file(&target)
                .with_context(|| format!("cannot replace '{}'", target.display()))?;
        }

        if fs::hard_link(source, &target).is_err() {
            // Cross-device links fail; a copy preserves the contents.
            fs::copy(source, &target).with_context(|| {
                format!(
                    "cannot copy '{}' to '{}'",
                    source.display(),
                    target.display()
                )
            })?;
        }

        summary.populated += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_for(root: &TempDir) -> PopulateArgs {
        let mirror = root.path().join("mirror");
        let raw = root.path().join("raw");
        fs::create_dir_all(&mirror).unwrap();
        fs::create_dir_all(&raw).unwrap();
        PopulateArgs {
            mirror,
            raw,
            overwrite: false,
            quiet: true,
            verbose: 0,
        }
    }

    fn write_mirror_file(args: &PopulateArgs, relative: &str, contents: &str) {
        let path = args.mirror.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn populates_canonical_raw_names() {
        let root = TempDir::new().unwrap();
        let args = args_for(&root);
        write_mirror_file(&args, "1/2/3/4/12345/12345-0.txt", "book text");

        let summary = args.run().unwrap();
        assert_eq!(summary.populated, 1);

        let raw = fs::read_to_string(args.raw.join("PG12345_raw.txt")).unwrap();
        assert_eq!(raw, "book text");
    }

    #[test]
    fn cache_duplicate_is_skipped() {
        let root = TempDir::new().unwrap();
        let args = args_for(&root);
        write_mirror_file(&args, "1/2/3/4/12345/12345-0.txt", "primary");
        write_mirror_file(&args, "cache/epub/12345/pg12345.txt.utf8", "duplicate");

        let summary = args.run().unwrap();
        assert_eq!(summary.populated, 1);
        assert_eq!(summary.duplicates, 1);

        let raw = fs::read_to_string(args.raw.join("PG12345_raw.txt")).unwrap();
        assert_eq!(raw, "primary");
    }

    #[test]
    fn cache_copy_used_when_no_primary() {
        let root = TempDir::new().unwrap();
        let args = args_for(&root);
        write_mirror_file(&args, "cache/epub/99/pg99.txt.utf8", "cache only");

        let summary = args.run().unwrap();
        assert_eq!(summary.populated, 1);
        assert!(args.raw.join("PG99_raw.txt").is_file());
    }

    #[test]
    fn existing_raw_files_kept_without_overwrite() {
        let root = TempDir::new().unwrap();
        let args = args_for(&root);
        write_mirror_file(&args, "1/11/11-0.txt", "new contents");
        fs::write(args.raw.join("PG11_raw.txt"), "old contents").unwrap();

        let summary = args.run().unwrap();
        assert_eq!(summary.existing, 1);
        assert_eq!(summary.populated, 0);
        let raw = fs::read_to_string(args.raw.join("PG11_raw.txt")).unwrap();
        assert_eq!(raw, "old contents");
    }

    #[test]
    fn overwrite_replaces_existing_raw_files() {
        let root = TempDir::new().unwrap();
        let mut args = args_for(&root);
        args.overwrite = true;
        write_mirror_file(&args, "1/11/11-0.txt", "new contents");
        fs::write(args.raw.join("PG11_raw.txt"), "old contents").unwrap();

        let summary = args.run().unwrap();
        assert_eq!(summary.populated, 1);
        let raw = fs::read_to_string(args.raw.join("PG11_raw.txt")).unwrap();
        assert_eq!(raw, "new contents");
    }

    #[test]
    fn odd_mirror_names_are_ignored() {
        let root = TempDir::new().unwrap();
        let args = args_for(&root);
        write_mirror_file(&args, "1/12/pg12345-0.txt.gz", "not a book");
        write_mirror_file(&args, "1/12/readme-0.txt", "not a book either");

        let summary = args.run().unwrap();
        assert_eq!(summary.populated, 0);
        assert_eq!(summary.found, 0);
    }
}
