//! Core text model and structural analysis for language-learning documents
//!
//! This crate holds everything that is deterministic and free of external
//! services: the document data model, language classification, sentence
//! segmentation, tokenization, id assignment and word segmentation for
//! non-whitespace scripts. Enrichment and orchestration live in
//! `glossa-engine`.
//!
//! # Example
//!
//! ```rust
//! use glossa_core::{classify, segment_sentences, tokenize, IdCounters};
//!
//! let language = classify(Some("English"));
//! let sentences = segment_sentences("Hello world. How are you?", Some("English"));
//! assert_eq!(sentences, vec!["Hello world.", "How are you?"]);
//!
//! let mut counters = IdCounters::new();
//! let tokens = counters.assign(&tokenize(&sentences[0], language.category));
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].global_token_id, 0);
//! assert_eq!(tokens[0].sentence_token_id, 1);
//! ```

pub mod error;
pub mod ids;
pub mod language;
pub mod model;
pub mod sentence;
pub mod tokenizer;
pub mod word;

pub use error::{DomainError, DomainResult};
pub use ids::{IdCounters, FIRST_GLOBAL_TOKEN_ID, FIRST_SENTENCE_TOKEN_ID, FIRST_WORD_TOKEN_ID};
pub use language::{
    classify, list_languages, Classification, LanguageClassifier, LanguageProfile, ScriptCategory,
    FALLBACK_LANGUAGE_CODE,
};
pub use model::{
    Document, Sentence, SentenceDifficulty, Token, TokenDifficulty, TokenType, VocabEntry,
    VocabExample, WordToken, AUTO_VOCAB_SOURCE,
};
pub use sentence::{segment_sentences, SegmenterOptions, SentenceSegmenter};
pub use tokenizer::{tokenize, RawToken, Tokenizer};
pub use word::{
    default_segmenter, segment_words, MaxMatchSegmenter, WordSegmentation, WordSegmenter,
};

#[cfg(feature = "jieba")]
pub use word::JiebaSegmenter;
