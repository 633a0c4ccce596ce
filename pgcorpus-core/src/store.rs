//! Artifact stores
//!
//! Each book yields three parallel artifacts, kept in three directories
//! keyed by book id: cleaned text, one-token-per-line tokens, and
//! tab-separated counts. Writes go through a temp file plus rename so a
//! half-written artifact is never mistaken for a finished one by the
//! "already done" check.

use crate::book::BookId;
use crate::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the three artifact directories
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    /// Cleaned text artifacts
    pub text_dir: PathBuf,
    /// Token-sequence artifacts
    pub tokens_dir: PathBuf,
    /// Frequency-count artifacts
    pub counts_dir: PathBuf,
}

impl CorpusLayout {
    /// Build a layout from the three directory paths
    pub fn new(
        text_dir: impl Into<PathBuf>,
        tokens_dir: impl Into<PathBuf>,
        counts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            text_dir: text_dir.into(),
            tokens_dir: tokens_dir.into(),
            counts_dir: counts_dir.into(),
        }
    }

    /// Fail fast if any artifact directory is missing.
    ///
    /// Called once before batch work starts; a missing directory is a
    /// configuration error, not something to discover per book.
    pub fn check_dirs(&self) -> Result<()> {
        for (name, dir) in [
            ("text", &self.text_dir),
            ("tokens", &self.tokens_dir),
            ("counts", &self.counts_dir),
        ] {
            if !dir.is_dir() {
                return Err(PipelineError::Configuration(format!(
                    "{} output directory '{}' does not exist",
                    name,
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Path of the cleaned-text artifact for `id`
    pub fn text_path(&self, id: BookId) -> PathBuf {
        self.text_dir.join(id.text_filename())
    }

    /// Path of the tokens artifact for `id`
    pub fn tokens_path(&self, id: BookId) -> PathBuf {
        self.tokens_dir.join(id.tokens_filename())
    }

    /// Path of the counts artifact for `id`
    pub fn counts_path(&self, id: BookId) -> PathBuf {
        self.counts_dir.join(id.counts_filename())
    }

    /// Whether all three artifacts for `id` exist
    pub fn is_done(&self, id: BookId) -> bool {
        self.text_path(id).is_file()
            && self.tokens_path(id).is_file()
            && self.counts_path(id).is_file()
    }

    /// Whether all three artifacts for `id` exist and are non-empty.
    ///
    /// The stricter check guards against artifacts truncated by an earlier
    /// crash on filesystems where the rename did land but the data did not.
    pub fn is_done_nonempty(&self, id: BookId) -> bool {
        [self.text_path(id), self.tokens_path(id), self.counts_path(id)]
            .iter()
            .all(|path| fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false))
    }
}

/// Write `contents` to `path` atomically-enough: write a sibling temp file,
/// then rename it over the destination. Readers either see the old complete
/// artifact or the new complete one, never a partial write.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let io_err = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout(root: &TempDir) -> CorpusLayout {
        let layout = CorpusLayout::new(
            root.path().join("text"),
            root.path().join("tokens"),
            root.path().join("counts"),
        );
        fs::create_dir_all(&layout.text_dir).unwrap();
        fs::create_dir_all(&layout.tokens_dir).unwrap();
        fs::create_dir_all(&layout.counts_dir).unwrap();
        layout
    }

    #[test]
    fn check_dirs_accepts_existing() {
        let root = TempDir::new().unwrap();
        assert!(layout(&root).check_dirs().is_ok());
    }

    #[test]
    fn check_dirs_rejects_missing() {
        let root = TempDir::new().unwrap();
        let layout = CorpusLayout::new(
            root.path().join("text"),
            root.path().join("tokens"),
            root.path().join("counts"),
        );
        let err = layout.check_dirs().unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
        assert!(err.is_batch_fatal());
    }

    #[test]
    fn done_requires_all_three() {
        let root = TempDir::new().unwrap();
        let layout = layout(&root);
        let id = BookId(7);

        assert!(!layout.is_done(id));
        fs::write(layout.text_path(id), "text").unwrap();
        fs::write(layout.tokens_path(id), "tokens\n").unwrap();
        assert!(!layout.is_done(id));
        fs::write(layout.counts_path(id), "tokens\t1\n").unwrap();
        assert!(layout.is_done(id));
    }

    #[test]
    fn nonempty_check_rejects_truncated_artifact() {
        let root = TempDir::new().unwrap();
        let layout = layout(&root);
        let id = BookId(7);

        fs::write(layout.text_path(id), "text").unwrap();
        fs::write(layout.tokens_path(id), "").unwrap();
        fs::write(layout.counts_path(id), "tokens\t1\n").unwrap();

        assert!(layout.is_done(id));
        assert!(!layout.is_done_nonempty(id));
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("PG7_text.txt");

        write_atomic(&target, "cleaned text").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "cleaned text");
        assert!(!target.with_extension("tmp").exists());
    }
}
