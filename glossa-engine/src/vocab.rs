//! Vocabulary aggregation
//!
//! One [`VocabAggregator`] lives for one processing run. It is the only
//! place where entries are created, so every key maps to exactly one entry
//! and ids follow the order in which keys first appear.

use glossa_core::{VocabEntry, VocabExample, AUTO_VOCAB_SOURCE};
use std::collections::HashMap;
use std::fmt;

/// Normalized deduplication key: trimmed, lower-cased, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VocabKey(String);

impl VocabKey {
    /// Normalize `raw`; `None` when nothing is left
    pub fn new(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        (!key.is_empty()).then_some(Self(key))
    }

    /// Key for a hard unit: its lemma when present, else its surface form
    pub fn for_unit(lemma: Option<&str>, body: &str) -> Option<Self> {
        lemma.and_then(Self::new).or_else(|| Self::new(body))
    }

    /// The normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VocabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a vocabulary item was used
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    /// Sentence text
    pub context: &'a str,
    /// Document id
    pub text_id: u64,
    /// Sentence id
    pub sentence_id: usize,
}

/// Supplies explanations for entries and examples
pub trait ExplanationSource {
    /// Explanation stored on a new entry
    fn explanation(&mut self, key: &VocabKey, context: &str) -> Option<String>;

    /// Explanation stored on one example
    fn context_explanation(&mut self, key: &VocabKey, context: &str) -> Option<String>;
}

/// Produces empty explanations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExplanations;

impl ExplanationSource for NoExplanations {
    fn explanation(&mut self, _key: &VocabKey, _context: &str) -> Option<String> {
        None
    }

    fn context_explanation(&mut self, _key: &VocabKey, _context: &str) -> Option<String> {
        None
    }
}

/// Run-scoped table of vocabulary entries
#[derive(Debug, Clone, Default)]
pub struct VocabAggregator {
    index: HashMap<VocabKey, usize>,
    entries: Vec<VocabEntry>,
}

impl VocabAggregator {
    /// Empty table; the first entry gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for `key`, creating the entry on first sight
    ///
    /// Every call appends one example, so `k` occurrences of a key give one
    /// entry with `k` examples.
    pub fn resolve(
        &mut self,
        key: &VocabKey,
        usage: Usage<'_>,
        token_indices: Vec<usize>,
        explanations: &mut dyn ExplanationSource,
    ) -> usize {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                let explanation = explanations
                    .explanation(key, usage.context)
                    .unwrap_or_default();
                self.entries.push(VocabEntry {
                    vocab_id: position + 1,
                    key: key.as_str().to_string(),
                    explanation,
                    source: AUTO_VOCAB_SOURCE.to_string(),
                    examples: Vec::new(),
                });
                self.index.insert(key.clone(), position);
                log::debug!("New vocabulary entry {} for '{key}'", position + 1);
                position
            }
        };

        let context_explanation = explanations
            .context_explanation(key, usage.context)
            .unwrap_or_default();
        let entry = &mut self.entries[position];
        entry.examples.push(VocabExample {
            text_id: usage.text_id,
            sentence_id: usage.sentence_id,
            context_explanation,
            token_indices,
        });
        entry.vocab_id
    }

    /// Entry by id
    pub fn get(&self, vocab_id: usize) -> Option<&VocabEntry> {
        vocab_id.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Entry by key
    pub fn find(&self, key: &VocabKey) -> Option<&VocabEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was created
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order
    pub fn into_entries(self) -> Vec<VocabEntry> {
        self.entries
    }
}
