//! CLI command implementations

use crate::output::OutputFormat;
use anyhow::Result;
use clap::Subcommand;
use glossa_core::{classify, list_languages};

pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split, tokenize and enrich text files
    Process(process::ProcessArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
        }
    }
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List built-in language profiles
    Languages,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// The listing as printed to stdout
    pub fn render(self) -> String {
        let mut out = String::new();
        match self {
            ListCommands::Languages => {
                out.push_str("Built-in languages:\n");
                for (code, name) in list_languages() {
                    let category = classify(Some(code.as_str())).category;
                    out.push_str(&format!("  {code:<4} {name} ({})\n", category.as_str()));
                }
            }
            ListCommands::Formats => {
                out.push_str("Output formats:\n");
                for (name, description) in OutputFormat::descriptions() {
                    out.push_str(&format!("  {name:<9} {description}\n"));
                }
            }
        }
        out
    }
}
