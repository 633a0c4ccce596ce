//! Progress reporting for batch runs
//!
//! One bar for the whole batch. Because per-book failures are warnings
//! rather than aborts, the bar message keeps a running tally of processed,
//! skipped, and failed books so a pile-up of failures is visible without
//! scrolling back through the warning stream.

use indicatif::{ProgressBar, ProgressStyle};
use pgcorpus_core::BookId;
use std::time::Duration;

/// Running tally of batch outcomes behind an optional progress bar
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    processed: u64,
    skipped: u64,
    failed: u64,
}

impl ProgressReporter {
    /// Create a reporter for a batch of `total_books` jobs.
    ///
    /// In quiet mode no bar is drawn and every update is a no-op.
    pub fn new(quiet: bool, total_books: u64) -> Self {
        let progress_bar = (!quiet).then(|| {
            let pb = ProgressBar::new(total_books);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "[{elapsed_precise}] {bar:40.green/white} {pos}/{len} books | {msg}",
                    )
                    .unwrap()
                    .progress_chars("=>-"),
            );
            pb.enable_steady_tick(Duration::from_millis(150));
            pb
        });

        Self {
            progress_bar,
            processed: 0,
            skipped: 0,
            failed: 0,
        }
    }

    /// Record a fully processed book
    pub fn book_processed(&mut self, book: BookId) {
        self.processed += 1;
        self.advance(book);
    }

    /// Record a book skipped because its artifacts already existed
    pub fn book_skipped(&mut self, book: BookId) {
        self.skipped += 1;
        self.advance(book);
    }

    /// Record a book that failed and was reported
    pub fn book_failed(&mut self, book: BookId) {
        self.failed += 1;
        self.advance(book);
    }

    fn tally(&self) -> String {
        format!(
            "{} ok, {} skipped, {} failed",
            self.processed, self.skipped, self.failed
        )
    }

    fn advance(&self, book: BookId) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{} (last: {book})", self.tally()));
            pb.inc(1);
        }
    }

    /// Finish the bar, leaving the final tally on screen
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_creates_no_bar() {
        let mut reporter = ProgressReporter::new(true, 10);
        assert!(reporter.progress_bar.is_none());

        // Updates on a quiet reporter are no-ops, not panics.
        reporter.book_processed(BookId(1));
        reporter.book_failed(BookId(2));
        reporter.finish();
    }

    #[test]
    fn every_outcome_advances_the_bar() {
        let mut reporter = ProgressReporter::new(false, 3);
        let pb = reporter.progress_bar.as_ref().unwrap();
        assert_eq!(pb.length(), Some(3));

        reporter.book_processed(BookId(1));
        reporter.book_skipped(BookId(2));
        reporter.book_failed(BookId(3));

        let pb = reporter.progress_bar.as_ref().unwrap();
        assert_eq!(pb.position(), 3);
        reporter.finish();
    }

    #[test]
    fn tally_reflects_outcomes() {
        let mut reporter = ProgressReporter::new(true, 5);
        reporter.book_processed(BookId(1));
        reporter.book_processed(BookId(2));
        reporter.book_skipped(BookId(3));
        reporter.book_failed(BookId(4));

        assert_eq!(reporter.tally(), "2 ok, 1 skipped, 1 failed");
    }
}
