//! High-level configuration API

use crate::error::{ApiError, Result};
use glossa_engine::{EngineConfig, EnrichmentUnit, ExecutionMode};
use std::path::PathBuf;
use std::time::Duration;

/// High-level configuration for document processing
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(crate) inner: EngineConfig,
    pub(crate) language: Option<String>,
    pub(crate) language_config: Option<PathBuf>,
    pub(crate) known_words: Option<PathBuf>,
    pub(crate) lemma_table: Option<PathBuf>,
}

impl Config {
    /// Sequential enrichment
    pub fn sequential() -> Self {
        Self {
            inner: EngineConfig::sequential(),
            ..Self::default()
        }
    }

    /// Parallel enrichment
    pub fn parallel() -> Self {
        Self {
            inner: EngineConfig::parallel(),
            ..Self::default()
        }
    }

    /// Local services only, no per-call timeout thread
    pub fn offline() -> Self {
        Self {
            inner: EngineConfig::offline(),
            ..Self::default()
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default language for documents that do not name one
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The engine configuration
    pub fn engine(&self) -> &EngineConfig {
        &self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = Some(language.into());
        self
    }

    /// Load the language profile from a TOML file instead of the built-ins
    pub fn language_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.language_config = Some(path.into());
        self
    }

    /// Rate words as easy when they appear in this list (one per line)
    pub fn known_words(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.known_words = Some(path.into());
        self
    }

    /// Look lemmas up in this `form<TAB>lemma` table
    pub fn lemma_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lemma_table = Some(path.into());
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.inner.execution_mode = mode;
        self
    }

    /// Set thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.inner.threads = threads;
        self
    }

    /// Set the per-call enrichment timeout
    pub fn enrichment_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.inner.enrichment_timeout = timeout;
        self
    }

    /// Drop a failing service for the rest of a document after this many
    /// failures in a row; `None` never drops it
    pub fn max_consecutive_failures(mut self, limit: Option<usize>) -> Self {
        self.config.inner.max_consecutive_failures = limit;
        self
    }

    /// Set the enrichment unit for non-whitespace languages
    pub fn enrichment_unit(mut self, unit: EnrichmentUnit) -> Self {
        self.config.inner.enrichment_unit = unit;
        self
    }

    /// Set the highest hard-token share still rated `medium`
    pub fn medium_ratio(mut self, ratio: f64) -> Self {
        self.config.inner.difficulty_policy.medium_ratio = ratio;
        self
    }

    /// Treat blank lines as sentence boundaries
    pub fn split_on_blank_lines(mut self, enabled: bool) -> Self {
        self.config.inner.segmenter.split_on_blank_lines = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if self.config.inner.threads == Some(0) {
            return Err(ApiError::Config("thread count must be positive".to_string()));
        }

        let ratio = self.config.inner.difficulty_policy.medium_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ApiError::Config(format!(
                "medium ratio must be between 0 and 1, got {ratio}"
            )));
        }

        if self.config.inner.enrichment_timeout == Some(Duration::ZERO) {
            return Err(ApiError::Config("enrichment timeout must be positive".to_string()));
        }

        if self.config.inner.max_consecutive_failures == Some(0) {
            return Err(ApiError::Config("failure limit must be positive".to_string()));
        }

        Ok(self.config)
    }
}
