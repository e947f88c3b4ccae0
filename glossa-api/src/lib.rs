//! Public API for the glossa text preprocessing pipeline
//!
//! This crate wraps the engine behind a small, stable surface: read an
//! [`Input`], process it with a [`TextProcessor`], get back storage-ready
//! DTOs plus timing metadata.
//!
//! ```rust
//! use glossa_api::process_text;
//!
//! let output = process_text("I eat an apple. She runs fast.", 1, "Apples", Some("en")).unwrap();
//! assert_eq!(output.document.total_sentences, 2);
//! assert!(output.document.sentences[0].grammar_annotations.is_empty());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use glossa_engine::{DocumentProcessor, TableLemmatizer, WordListEstimator};
use std::sync::Arc;
use std::time::Instant;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{
    DocumentDto, DocumentMeta, GrammarAnnotation, Input, Metadata, Output, SentenceDto,
    VocabAnnotation,
};
pub use error::ApiError;
pub use glossa_engine::{EnrichmentUnit, ExecutionMode};

/// Main entry point for document processing
pub struct TextProcessor {
    inner: Arc<DocumentProcessor>,
    config: Config,
}

impl std::fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextProcessor")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish()
    }
}

impl TextProcessor {
    /// Create a new processor with default configuration (structure only)
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a new processor with a default language
    pub fn with_language(language: &str) -> Result<Self> {
        Self::with_config(Config::builder().language(language).build()?)
    }

    /// Create a new processor with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let mut builder = DocumentProcessor::builder().config(config.inner.clone());

        if let Some(path) = &config.language_config {
            builder = builder.language_profile_file(path)?;
        }

        if let Some(path) = &config.known_words {
            let estimator = WordListEstimator::from_file(path)?;
            log::info!("Loaded {} known words from {}", estimator.len(), path.display());
            builder = builder.difficulty_estimator(estimator);
        }

        if let Some(path) = &config.lemma_table {
            let lemmatizer = TableLemmatizer::from_file(path)?;
            log::info!("Loaded {} lemma forms from {}", lemmatizer.len(), path.display());
            builder = builder.lemmatizer(lemmatizer);
        }

        Ok(Self {
            inner: Arc::new(builder.build()?),
            config,
        })
    }

    /// Process input and return the structured document
    pub fn process(&self, input: Input, meta: DocumentMeta) -> Result<Output> {
        let start = Instant::now();

        let text = input.read_text()?;
        let text_len = text.len();
        let char_count = text.chars().count();

        let language = meta.language.as_deref().or(self.config.language());
        let processed = self
            .inner
            .process(&text, meta.text_id, &meta.title, language);

        let elapsed = start.elapsed();
        let stats = processed.enrichment;
        let metadata = Metadata {
            total_bytes: text_len,
            total_chars: char_count,
            processing_time_ms: elapsed.as_millis() as u64,
            throughput_mbps: (text_len as f64 / 1_048_576.0) / elapsed.as_secs_f64().max(1e-9),
            mode_used: format!("{:?}", self.inner.execution_mode()),
            enrichment_calls: stats.calls,
            enrichment_failures: stats.failures,
            enrichment_timeouts: stats.timeouts,
            enrichment_skipped: stats.skipped,
            segmentation_gaps: processed.segmentation_gaps,
        };

        Ok(Output {
            document: processed.into(),
            metadata,
        })
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str, meta: DocumentMeta) -> Result<Output> {
        self.process(Input::from_text(text), meta)
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Convenience functions

/// Process text with default configuration
pub fn process_text(
    text: &str,
    text_id: u64,
    title: &str,
    language: Option<&str>,
) -> Result<Output> {
    let mut meta = DocumentMeta::new(text_id, title);
    meta.language = language.map(str::to_string);
    TextProcessor::new()?.process_text(text, meta)
}

/// Process a file with default configuration
pub fn process_file<P: AsRef<std::path::Path>>(
    path: P,
    text_id: u64,
    language: Option<&str>,
) -> Result<Output> {
    let path = path.as_ref();
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut meta = DocumentMeta::new(text_id, title);
    meta.language = language.map(str::to_string);
    TextProcessor::new()?.process(Input::from_file(path), meta)
}
