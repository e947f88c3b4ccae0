//! Configuration file support
//!
//! A CLI configuration is a TOML file with `[processing]`, `[enrichment]`
//! and `[output]` tables. Every key is optional; command-line flags take
//! precedence over the file.

use crate::error::CliError;
use anyhow::{Context, Result};
use glossa_api::EnrichmentUnit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Enrichment configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("{}: {}", path.display(), e.message())).into()
        })
    }
}

/// Processing-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Language used when none is given on the command line
    pub default_language: Option<String>,

    /// Treat blank lines as sentence boundaries
    pub split_on_blank_lines: bool,

    /// Unit assessed in non-whitespace languages
    pub enrichment_unit: UnitSetting,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            split_on_blank_lines: true,
            enrichment_unit: UnitSetting::Characters,
        }
    }
}

/// Enrichment unit as written in the config file
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitSetting {
    /// One assessment per text token
    Characters,
    /// One assessment per segmenter word
    Words,
}

impl From<UnitSetting> for EnrichmentUnit {
    fn from(setting: UnitSetting) -> Self {
        match setting {
            UnitSetting::Characters => EnrichmentUnit::Characters,
            UnitSetting::Words => EnrichmentUnit::Words,
        }
    }
}

/// Enrichment-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Known-word list for difficulty assessment
    pub known_words: Option<PathBuf>,

    /// Tab-separated inflected form to lemma table
    pub lemma_table: Option<PathBuf>,

    /// Per-call timeout in milliseconds (0 = no timeout)
    pub timeout_ms: u64,

    /// Failures in a row before a service is dropped for the rest of a
    /// document (0 = never)
    pub max_consecutive_failures: usize,

    /// Run assessments on a worker pool
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,

    /// Hard-unit ratio up to which a sentence is rated medium
    pub medium_ratio: f64,
}

impl EnrichmentConfig {
    /// The per-call timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// The failure limit, `None` when services are never dropped
    pub fn failure_limit(&self) -> Option<usize> {
        (self.max_consecutive_failures > 0).then_some(self.max_consecutive_failures)
    }

    /// The worker thread count, `None` for the pool default
    pub fn threads(&self) -> Option<usize> {
        (self.worker_threads > 0).then_some(self.worker_threads)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            known_words: None,
            lemma_table: None,
            timeout_ms: 10_000,
            max_consecutive_failures: 3,
            parallel: false,
            worker_threads: 0,
            medium_ratio: 0.2,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include processing metadata in JSON output
    pub include_metadata: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_metadata: false,
            pretty_json: true,
        }
    }
}
