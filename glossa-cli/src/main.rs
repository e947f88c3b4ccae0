//! glossa command-line entry point

use clap::Parser;
use glossa_cli::commands::Commands;

/// Prepare raw text for language learners: sentences, tokens, words and vocabulary
#[derive(Debug, Parser)]
#[command(name = "glossa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
