//! Configuration types for the engine

use crate::ExecutionMode;
use glossa_core::{SegmenterOptions, SentenceDifficulty};
use std::time::Duration;

/// Default per-call limit for enrichment services
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of failures in a row after which a service is dropped
/// for the rest of a document
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: usize = 3;

/// What gets enriched in non-whitespace languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentUnit {
    /// Every text token (one character each)
    #[default]
    Characters,
    /// Every word token produced by the word segmenter
    Words,
}

/// Mapping from hard-token ratio to sentence difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceDifficultyPolicy {
    /// Highest share of hard units still rated `medium`
    pub medium_ratio: f64,
}

impl Default for SentenceDifficultyPolicy {
    fn default() -> Self {
        Self { medium_ratio: 0.2 }
    }
}

impl SentenceDifficultyPolicy {
    /// Rate a sentence from the number of assessed and hard units
    ///
    /// Returns `None` when nothing was assessed.
    pub fn rate(&self, assessed: usize, hard: usize) -> Option<SentenceDifficulty> {
        if assessed == 0 {
            return None;
        }
        if hard == 0 {
            return Some(SentenceDifficulty::Easy);
        }
        let ratio = hard as f64 / assessed as f64;
        if ratio <= self.medium_ratio {
            Some(SentenceDifficulty::Medium)
        } else {
            Some(SentenceDifficulty::Hard)
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Execution mode for enrichment calls
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Per-call limit for enrichment services (None = call inline, no limit)
    pub enrichment_timeout: Option<Duration>,
    /// Failures in a row, timeouts included, before a service is dropped
    /// for the rest of the document (None = never)
    pub max_consecutive_failures: Option<usize>,
    /// Unit of enrichment for non-whitespace languages
    pub enrichment_unit: EnrichmentUnit,
    /// Sentence difficulty thresholds
    pub difficulty_policy: SentenceDifficultyPolicy,
    /// Sentence segmentation options
    pub segmenter: SegmenterOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: None,
            enrichment_timeout: Some(DEFAULT_ENRICHMENT_TIMEOUT),
            max_consecutive_failures: Some(DEFAULT_MAX_CONSECUTIVE_FAILURES),
            enrichment_unit: EnrichmentUnit::default(),
            difficulty_policy: SentenceDifficultyPolicy::default(),
            segmenter: SegmenterOptions::default(),
        }
    }
}

impl EngineConfig {
    /// One call at a time, in document order
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Enrichment calls fanned out over a thread pool
    pub fn parallel() -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            ..Self::default()
        }
    }

    /// Local, in-process services only: no helper thread per call
    pub fn offline() -> Self {
        Self {
            enrichment_timeout: None,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_difficulty_thresholds() {
        let policy = SentenceDifficultyPolicy::default();
        assert_eq!(policy.rate(0, 0), None);
        assert_eq!(policy.rate(4, 0), Some(SentenceDifficulty::Easy));
        assert_eq!(policy.rate(5, 1), Some(SentenceDifficulty::Medium));
        assert_eq!(policy.rate(10, 2), Some(SentenceDifficulty::Medium));
        assert_eq!(policy.rate(4, 1), Some(SentenceDifficulty::Hard));
        assert_eq!(policy.rate(1, 1), Some(SentenceDifficulty::Hard));
    }

    #[test]
    fn test_presets() {
        assert_eq!(EngineConfig::sequential().execution_mode, ExecutionMode::Sequential);
        assert_eq!(EngineConfig::parallel().execution_mode, ExecutionMode::Parallel);
        assert_eq!(EngineConfig::offline().enrichment_timeout, None);
        assert_eq!(
            EngineConfig::default().enrichment_timeout,
            Some(DEFAULT_ENRICHMENT_TIMEOUT)
        );
        assert_eq!(
            EngineConfig::offline().max_consecutive_failures,
            Some(DEFAULT_MAX_CONSECUTIVE_FAILURES)
        );
    }
}
