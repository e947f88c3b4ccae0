//! Alignment of word segmenter output onto character tokens
//!
//! The word segmenter and the tokenizer cut the same sentence independently.
//! Alignment runs in two forward-only passes:
//!
//! 1. [`locate_spans`] finds each word at or after the end of the previous
//!    one, which disambiguates repeated substrings.
//! 2. [`align_spans`] walks the token stream once. A token belongs to the
//!    span containing its start offset; because the token cursor never moves
//!    back, every span owns a contiguous token range and no two spans share a
//!    token.

use crate::model::Token;
use std::ops::Range;

/// A located word: byte range `[start, end)` in the sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// The word text
    pub word: &'a str,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

/// Result of locating words in a sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedSpans<'a> {
    /// Spans in sentence order, non-overlapping
    pub spans: Vec<WordSpan<'a>>,
    /// Words that could not be found after the cursor
    pub missing: Vec<&'a str>,
}

/// Locate `words` in `text`, searching forward from the previous match
pub fn locate_spans<'a>(text: &str, words: &[&'a str]) -> LocatedSpans<'a> {
    let mut located = LocatedSpans::default();
    let mut cursor = 0;

    for &word in words {
        if word.is_empty() {
            continue;
        }
        match text[cursor..].find(word) {
            Some(relative) => {
                let start = cursor + relative;
                let end = start + word.len();
                located.spans.push(WordSpan { word, start, end });
                cursor = end;
            }
            None => {
                log::debug!("Segmented word '{word}' not found after byte {cursor}");
                located.missing.push(word);
            }
        }
    }

    located
}

/// One span bound to a run of tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSpan {
    /// Index into the located spans
    pub span_index: usize,
    /// Index range into the sentence's token slice
    pub tokens: Range<usize>,
}

/// Bind spans to contiguous token ranges
///
/// Spans that contain no token start are dropped; tokens whose start lies
/// outside every span stay unbound.
pub fn align_spans(tokens: &[Token], spans: &[WordSpan<'_>]) -> Vec<AlignedSpan> {
    let mut starts = Vec::with_capacity(tokens.len());
    let mut offset = 0;
    for token in tokens {
        starts.push(offset);
        offset += token.body.len();
    }

    let mut aligned = Vec::with_capacity(spans.len());
    let mut cursor = 0;

    for (span_index, span) in spans.iter().enumerate() {
        while cursor < starts.len() && starts[cursor] < span.start {
            cursor += 1;
        }
        let first = cursor;
        while cursor < starts.len() && starts[cursor] < span.end {
            cursor += 1;
        }
        if first < cursor {
            aligned.push(AlignedSpan {
                span_index,
                tokens: first..cursor,
            });
        } else {
            log::debug!(
                "Word '{}' at {}..{} covers no token start",
                span.word,
                span.start,
                span.end
            );
        }
    }

    aligned
}
