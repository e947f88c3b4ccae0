//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Output;
use std::io::Write;

/// Markdown formatter - numbered sentences and a vocabulary table per document
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentence_count: 0,
        }
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, output: &Output) -> Result<()> {
        let document = &output.document;

        writeln!(self.writer, "## {}", document.title)?;
        writeln!(self.writer)?;
        for sentence in &document.sentences {
            self.sentence_count += 1;
            writeln!(self.writer, "{}. {}", sentence.sentence_id, sentence.body)?;
        }

        if !document.vocab_expressions.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "| ID | Expression | Sentences |")?;
            writeln!(self.writer, "|---:|---|---|")?;
            for entry in &document.vocab_expressions {
                let sentences: Vec<String> = entry
                    .examples
                    .iter()
                    .map(|example| example.sentence_id.to_string())
                    .collect();
                writeln!(
                    self.writer,
                    "| {} | {} | {} |",
                    entry.vocab_id,
                    escape_cell(&entry.key),
                    sentences.join(", ")
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total sentences: {}*", self.sentence_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
