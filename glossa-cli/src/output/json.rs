//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_api::Output;
use serde_json::Value;
use std::io::Write;

/// JSON formatter - outputs the processed documents as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<Value>,
    include_metadata: bool,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
            include_metadata: false,
            pretty: true,
        }
    }

    /// Emit `{document, metadata}` records instead of bare documents
    pub fn include_metadata(mut self, enabled: bool) -> Self {
        self.include_metadata = enabled;
        self
    }

    /// Pretty print the array
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, output: &Output) -> Result<()> {
        let record = if self.include_metadata {
            serde_json::to_value(output)?
        } else {
            serde_json::to_value(&output.document)?
        };
        self.documents.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
