//! pgcorpus CLI library
//!
//! Command-line layer over `pgcorpus-core`: batch scheduling across a
//! worker pool, metadata lookups, incremental-run bookkeeping, and
//! operator-facing progress reporting.

pub mod commands;
pub mod discover;
pub mod metadata;
pub mod progress;
