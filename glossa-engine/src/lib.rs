//! Document orchestration and enrichment for the glossa pipeline
//!
//! This crate threads the per-document state (id counters, vocabulary
//! table) through the sentence loop, calls pluggable enrichment services
//! with timeouts, and aggregates hard words into a deduplicated vocabulary.

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod executor;
pub mod processor;
pub mod vocab;

// Re-export key types
pub use assembler::{AssembledSentence, SentenceAssembler};
pub use config::{EngineConfig, EnrichmentUnit, SentenceDifficultyPolicy};
pub use enrichment::{
    DifficultyEstimator, Enrichers, EnrichmentService, EnrichmentSession, EnrichmentStats,
    ExplanationGenerator, Lemmatizer, PosTagger, TableLemmatizer, TokenAssessment,
    WordListEstimator,
};
pub use error::{EngineError, EnrichmentError, EnrichmentResult, Result};
pub use executor::{ExecutionMode, Executor};
pub use processor::{DocumentProcessor, DocumentProcessorBuilder, ProcessedDocument};
pub use vocab::{VocabAggregator, VocabKey};

// Re-export from core for convenience
pub use glossa_core::{
    Classification, Document, ScriptCategory, Sentence, SentenceDifficulty, Token,
    TokenDifficulty, TokenType, VocabEntry, VocabExample, WordToken,
};
