//! Document-wide id counters
//!
//! The counters are the accumulator of the per-sentence fold: they are
//! created once per document and passed by `&mut` into every sentence step,
//! so ids stay monotonic across the whole document.

use crate::model::Token;
use crate::tokenizer::RawToken;

/// First global token id of a document
pub const FIRST_GLOBAL_TOKEN_ID: usize = 0;
/// First word token id of a document
pub const FIRST_WORD_TOKEN_ID: usize = 1;
/// First sentence-local token id of every sentence
pub const FIRST_SENTENCE_TOKEN_ID: usize = 1;

/// Monotonic counters threaded through one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCounters {
    next_global_token_id: usize,
    next_word_token_id: usize,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl IdCounters {
    /// Counters for the start of a document
    pub fn new() -> Self {
        Self {
            next_global_token_id: FIRST_GLOBAL_TOKEN_ID,
            next_word_token_id: FIRST_WORD_TOKEN_ID,
        }
    }

    /// Id the next token will receive
    pub fn peek_global_token_id(&self) -> usize {
        self.next_global_token_id
    }

    /// Id the next word token will receive
    pub fn peek_word_token_id(&self) -> usize {
        self.next_word_token_id
    }

    /// Number of tokens numbered so far
    pub fn tokens_assigned(&self) -> usize {
        self.next_global_token_id - FIRST_GLOBAL_TOKEN_ID
    }

    /// Number of word tokens numbered so far
    pub fn word_tokens_assigned(&self) -> usize {
        self.next_word_token_id - FIRST_WORD_TOKEN_ID
    }

    /// Take the next word token id
    pub fn next_word_token_id(&mut self) -> usize {
        let id = self.next_word_token_id;
        self.next_word_token_id += 1;
        id
    }

    /// Stamp one sentence's raw tokens with global and sentence-local ids
    pub fn assign(&mut self, raw_tokens: &[RawToken<'_>]) -> Vec<Token> {
        raw_tokens
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let global_token_id = self.next_global_token_id;
                self.next_global_token_id += 1;
                Token::new(
                    global_token_id,
                    FIRST_SENTENCE_TOKEN_ID + index,
                    raw.body,
                    raw.token_type,
                )
            })
            .collect()
    }
}
