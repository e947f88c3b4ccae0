//! Forward maximum matching over a caller-supplied word list

use super::WordSegmenter;
use std::collections::HashSet;

/// Greedy longest-match segmenter
///
/// At each position the longest dictionary word starting there is taken;
/// characters not starting any dictionary word become one-character words.
/// With an empty dictionary this cuts text into single characters.
#[derive(Debug, Clone, Default)]
pub struct MaxMatchSegmenter {
    words: HashSet<String>,
    max_word_chars: usize,
}

impl MaxMatchSegmenter {
    /// Build from a word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segmenter = Self::default();
        for word in words {
            segmenter.insert(word);
        }
        segmenter
    }

    /// Add a word
    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();
        let chars = word.chars().count();
        if chars == 0 {
            return;
        }
        self.max_word_chars = self.max_word_chars.max(chars);
        self.words.insert(word);
    }

    /// Number of dictionary words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSegmenter for MaxMatchSegmenter {
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(pos, _)| pos)
            .chain(std::iter::once(text.len()))
            .collect();

        let mut words = Vec::new();
        let mut i = 0;
        while i + 1 < boundaries.len() {
            let longest = (2..=self.max_word_chars.min(boundaries.len() - 1 - i))
                .rev()
                .find(|&len| self.words.contains(&text[boundaries[i]..boundaries[i + len]]))
                .unwrap_or(1);
            words.push(&text[boundaries[i]..boundaries[i + longest]]);
            i += longest;
        }
        words
    }

    fn name(&self) -> &'static str {
        "max-match"
    }
}
