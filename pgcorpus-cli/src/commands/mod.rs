//! CLI command implementations

use clap::Subcommand;

pub mod populate;
pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Process raw books into text, tokens, and counts artifacts
    Process(process::ProcessArgs),

    /// Populate the raw directory from a local Project Gutenberg mirror
    Populate(populate::PopulateArgs),
}

/// Initialize logging from the shared quiet/verbose flags.
///
/// Safe to call once per process; commands call it at the top of
/// `execute`.
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    }
    let _ = builder.try_init();
}
