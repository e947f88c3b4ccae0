//! Output formatting module

use anyhow::Result;
use glossa_api::Output;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one processed document
    fn format_document(&mut self, output: &Output) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one sentence per line, prefixed by its id
    Text,
    /// JSON array of document records
    Json,
    /// Markdown with numbered sentences and a vocabulary table
    Markdown,
}

impl OutputFormat {
    /// Every format with a one-line description
    pub fn descriptions() -> [(&'static str, &'static str); 3] {
        [
            ("text", "One sentence per line, prefixed with its id"),
            ("json", "Array of document records with tokens, words and vocabulary"),
            ("markdown", "Numbered sentences followed by a vocabulary table"),
        ]
    }

    /// Parse a format name as written in a config file
    pub fn parse(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }

    /// Build the formatter for this format
    pub fn formatter<W>(self, writer: W, include_metadata: bool, pretty: bool) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(
                JsonFormatter::new(writer)
                    .include_metadata(include_metadata)
                    .pretty(pretty),
            ),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}
