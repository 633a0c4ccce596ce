//! pgcorpus binary entry point

use clap::Parser;
use pgcorpus_cli::commands::Commands;

/// Standardize a local Project Gutenberg mirror into a corpus of cleaned
/// texts, token sequences, and word counts.
#[derive(Debug, Parser)]
#[command(name = "pgcorpus", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Populate(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
