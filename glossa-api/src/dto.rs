//! Data Transfer Objects for API
//!
//! These are the shapes handed to storage layers. Sentences carry
//! `grammar_annotations` and `vocab_annotations`; the pipeline leaves both
//! empty and later annotation stages fill them in.

use crate::error::{ApiError, Result};
use glossa_core::{Sentence, Token, VocabEntry, WordToken};
use glossa_engine::ProcessedDocument;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Input source for processing
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// Caller-supplied document identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMeta {
    /// Document id
    pub text_id: u64,
    /// Title
    pub title: String,
    /// Language name or code; `None` uses the configured language
    pub language: Option<String>,
}

impl DocumentMeta {
    /// Create metadata without a language
    pub fn new(text_id: u64, title: impl Into<String>) -> Self {
        Self {
            text_id,
            title: title.into(),
            language: None,
        }
    }

    /// Set the language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new(1, "")
    }
}

/// Grammar note attached to a sentence by a later annotation stage
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrammarAnnotation {
    /// Covered sentence token ids
    pub token_ids: Vec<usize>,
    /// Explanation text
    pub explanation: String,
}

/// Link from a sentence span to a vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabAnnotation {
    /// Vocabulary entry id
    pub vocab_id: usize,
    /// Covered sentence token ids
    pub token_ids: Vec<usize>,
}

/// Sentence as handed to storage
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceDto {
    /// 1-based sentence id
    pub sentence_id: usize,
    /// Sentence text
    pub body: String,
    /// `easy`, `medium` or `hard` when assessed
    pub difficulty_level: Option<String>,
    /// Tokens in order
    pub tokens: Vec<Token>,
    /// Word tokens, empty for whitespace languages
    pub word_tokens: Vec<WordToken>,
    /// Always empty at this stage
    pub grammar_annotations: Vec<GrammarAnnotation>,
    /// Always empty at this stage
    pub vocab_annotations: Vec<VocabAnnotation>,
}

impl From<Sentence> for SentenceDto {
    fn from(sentence: Sentence) -> Self {
        Self {
            sentence_id: sentence.sentence_id,
            body: sentence.body,
            difficulty_level: sentence.difficulty_level.map(|level| {
                match level {
                    glossa_core::SentenceDifficulty::Easy => "easy",
                    glossa_core::SentenceDifficulty::Medium => "medium",
                    glossa_core::SentenceDifficulty::Hard => "hard",
                }
                .to_string()
            }),
            tokens: sentence.tokens,
            word_tokens: sentence.word_tokens,
            grammar_annotations: Vec::new(),
            vocab_annotations: Vec::new(),
        }
    }
}

/// Document as handed to storage
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentDto {
    /// Document id
    pub text_id: u64,
    /// Title
    pub title: String,
    /// Language as supplied by the caller
    pub language: Option<String>,
    /// Language code the document was processed as
    pub language_code: String,
    /// `whitespace` or `non_whitespace`
    pub category: String,
    /// Number of sentences
    pub total_sentences: usize,
    /// Number of tokens
    pub total_tokens: usize,
    /// Number of word tokens
    pub total_word_tokens: usize,
    /// Sentences in order
    pub sentences: Vec<SentenceDto>,
    /// Vocabulary entries created in this run
    pub vocab_expressions: Vec<VocabEntry>,
}

impl From<ProcessedDocument> for DocumentDto {
    fn from(processed: ProcessedDocument) -> Self {
        let document = processed.document;
        Self {
            text_id: document.text_id,
            title: document.title,
            language: document.language,
            language_code: processed.language.code,
            category: processed.language.category.as_str().to_string(),
            total_sentences: processed.total_sentences,
            total_tokens: processed.total_tokens,
            total_word_tokens: processed.total_word_tokens,
            sentences: document.sentences.into_iter().map(SentenceDto::from).collect(),
            vocab_expressions: processed.vocab_expressions,
        }
    }
}

/// Processing metadata with runtime statistics
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Total bytes processed
    pub total_bytes: usize,
    /// Total characters processed
    pub total_chars: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Throughput in MB/s
    pub throughput_mbps: f64,
    /// Execution mode used
    pub mode_used: String,
    /// Enrichment calls made
    pub enrichment_calls: usize,
    /// Enrichment calls that failed
    pub enrichment_failures: usize,
    /// Enrichment calls that timed out
    pub enrichment_timeouts: usize,
    /// Enrichment calls skipped after a service kept failing
    pub enrichment_skipped: usize,
    /// Segmenter words that could not be aligned
    pub segmentation_gaps: usize,
}

/// Complete output with document and metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// The processed document
    pub document: DocumentDto,
    /// Processing metadata
    pub metadata: Metadata,
}

#[cfg(feature = "serde")]
impl Output {
    /// Serialize the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}
