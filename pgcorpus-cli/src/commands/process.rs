//! Process command: run the pipeline over a batch of raw books
//!
//! Discovery, language resolution, and the "already done" check happen up
//! front on the coordinating thread. One job per remaining book then runs
//! on a rayon pool; workers send their results through a channel and the
//! coordinator is the only writer of the log file, so appends never
//! interleave. Per-book failures are warnings; only configuration errors
//! and missing tokenizer resources abort the batch.

use crate::commands::init_logging;
use crate::discover;
use crate::metadata::Metadata;
use crate::progress::ProgressReporter;
use anyhow::{bail, Context, Result};
use clap::Args;
use pgcorpus_core::{
    resolve_language, BookId, BookProcessor, CorpusLayout, Outcome, PipelineError, WordTokenizer,
    DEFAULT_LANGUAGE,
};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Directory holding the raw books (PG{id}_raw.txt files)
    #[arg(short, long, value_name = "DIR", default_value = "data/raw")]
    pub raw: PathBuf,

    /// Output directory for cleaned text artifacts
    #[arg(long, value_name = "DIR", default_value = "data/text")]
    pub output_text: PathBuf,

    /// Output directory for token artifacts
    #[arg(long, value_name = "DIR", default_value = "data/tokens")]
    pub output_tokens: PathBuf,

    /// Output directory for counts artifacts
    #[arg(long, value_name = "DIR", default_value = "data/counts")]
    pub output_counts: PathBuf,

    /// Glob fragment selecting a subset of book ids (e.g. "1234*")
    #[arg(short, long, value_name = "PATTERN", default_value = "*")]
    pub pattern: String,

    /// Metadata catalog CSV; without it every book defaults to English
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Reprocess books even when all artifacts already exist
    #[arg(long)]
    pub overwrite_all: bool,

    /// Treat empty existing artifacts as not done
    #[arg(long)]
    pub check_empty: bool,

    /// Worker threads (default: available parallelism)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Processing log file, one TSV record per processed book
    #[arg(short, long, value_name = "FILE", default_value = ".log")]
    pub log_file: PathBuf,

    /// Suppress progress output and per-book warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Final accounting of one batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Raw files matching the pattern
    pub found: usize,
    /// Jobs submitted to the pool
    pub submitted: usize,
    /// Books fully processed this run
    pub processed: usize,
    /// Books skipped because their artifacts already existed
    pub skipped: usize,
    /// Books that failed and were reported
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Books found:    {}", self.found)?;
        writeln!(f, "Jobs submitted: {}", self.submitted)?;
        writeln!(f, "Processed:      {}", self.processed)?;
        writeln!(f, "Skipped (done): {}", self.skipped)?;
        write!(f, "Failed:         {}", self.failed)
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        let summary = self.run()?;
        if !self.quiet {
            println!("{summary}");
        }
        Ok(())
    }

    /// Run the batch and return its accounting
    pub fn run(&self) -> Result<BatchSummary> {
        if !self.raw.is_dir() {
            bail!("raw directory '{}' does not exist", self.raw.display());
        }

        let layout = CorpusLayout::new(
            self.output_text.clone(),
            self.output_tokens.clone(),
            self.output_counts.clone(),
        );
        layout.check_dirs()?;

        let metadata = match &self.metadata {
            Some(path) => Metadata::load(path)?,
            None => {
                log::info!("no metadata file given; every book defaults to {DEFAULT_LANGUAGE}");
                Metadata::default()
            }
        };

        let files = discover::raw_files(&self.raw, &self.pattern)?;
        let mut summary = BatchSummary {
            found: files.len(),
            ..BatchSummary::default()
        };
        log::info!("found {} raw books", summary.found);

        let done = if self.overwrite_all {
            BTreeSet::new()
        } else {
            discover::done_set(&layout, self.check_empty)?
        };

        // Resolve id and language up front; jobs carry everything they need.
        let mut jobs: Vec<(BookId, PathBuf, String)> = Vec::new();
        for path in files {
            let id = match BookId::from_filename(&path) {
                Ok(id) => id,
                Err(err) => {
                    log::warn!("cannot process '{}': {err}", path.display());
                    summary.failed += 1;
                    continue;
                }
            };
            if done.contains(&id) {
                summary.skipped += 1;
                continue;
            }
            let language = match metadata.language_codes(id) {
                Some(codes) => resolve_language(codes).to_string(),
                None => {
                    if !metadata.is_empty() {
                        log::warn!("no metadata for {id}; defaulting to {DEFAULT_LANGUAGE}");
                    }
                    DEFAULT_LANGUAGE.to_string()
                }
            };
            jobs.push((id, path, language));
        }
        summary.submitted = jobs.len();

        let processor = BookProcessor::new(layout, Arc::new(WordTokenizer::new()))
            .overwrite_all(self.overwrite_all)
            .check_empty(self.check_empty);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs.unwrap_or_else(num_cpus::get))
            .build()
            .context("cannot build worker pool")?;

        let mut progress = ProgressReporter::new(self.quiet, summary.submitted as u64);

        let (tx, rx) = mpsc::channel();
        let mut fatal: Option<PipelineError> = None;

        std::thread::scope(|scope| {
            let jobs = &jobs;
            let processor = &processor;
            let pool = &pool;

            scope.spawn(move || {
                pool.install(|| {
                    jobs.par_iter().for_each_with(tx, |tx, (id, path, language)| {
                        // Send failures mean the coordinator stopped
                        // collecting; the job still ran to completion.
                        let _ = tx.send((*id, processor.process(path, language)));
                    });
                });
            });

            for (id, result) in rx.iter() {
                match result {
                    Ok(Outcome::Processed(record)) => {
                        if let Err(err) = record.append_to(&self.log_file) {
                            fatal = Some(err);
                            break;
                        }
                        summary.processed += 1;
                        progress.book_processed(id);
                    }
                    Ok(Outcome::Skipped(_)) => {
                        summary.skipped += 1;
                        progress.book_skipped(id);
                    }
                    Err(err) if err.is_batch_fatal() => {
                        fatal = Some(err);
                        break;
                    }
                    Err(err) => {
                        log::warn!("cannot process {id}: {err}");
                        summary.failed += 1;
                        progress.book_failed(id);
                    }
                }
            }
        });

        progress.finish();

        if let Some(err) = fatal {
            return Err(anyhow::Error::new(err).context("batch aborted"));
        }
        Ok(summary)
    }
}
