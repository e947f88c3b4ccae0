//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Output;
use std::io::{self, Write};

/// Plain text formatter - outputs one sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, output: &Output) -> Result<()> {
        // Blank line between documents
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;

        for sentence in &output.document.sentences {
            writeln!(self.writer, "{}\t{}", sentence.sentence_id, sentence.body)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::SharedBuffer;
    use glossa_api::process_text;

    #[test]
    fn test_sentences_prefixed_with_ids() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());

        let first = process_text("I eat an apple. She runs fast.", 1, "a", Some("en")).unwrap();
        let second = process_text("你好。", 2, "b", Some("zh")).unwrap();
        formatter.format_document(&first).unwrap();
        formatter.format_document(&second).unwrap();
        formatter.finish().unwrap();

        assert_eq!(
            buffer.contents(),
            "1\tI eat an apple.\n2\tShe runs fast.\n\n1\t你好。\n"
        );
    }
}
