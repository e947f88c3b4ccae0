//! Word segmentation for non-whitespace scripts
//!
//! Character tokens are grouped into [`WordToken`]s using an independent,
//! dictionary-based [`WordSegmenter`]. The segmenter only sees the sentence
//! text; its output is aligned back onto the token stream by
//! [`alignment`], and every word token owns a contiguous run of
//! `sentence_token_id`s.

pub mod alignment;
pub mod dictionary;
#[cfg(feature = "jieba")]
pub mod jieba;

pub use alignment::{align_spans, locate_spans, AlignedSpan, LocatedSpans, WordSpan};
pub use dictionary::MaxMatchSegmenter;
#[cfg(feature = "jieba")]
pub use jieba::JiebaSegmenter;

use crate::ids::IdCounters;
use crate::model::{Token, WordToken};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Splits text into words
pub trait WordSegmenter: Send + Sync {
    /// Cut `text` into words, in order; each word must be a slice of `text`
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Short name for logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// The default segmenter: jieba when compiled in, otherwise one word per
/// character
pub fn default_segmenter() -> Arc<dyn WordSegmenter> {
    #[cfg(feature = "jieba")]
    {
        Arc::new(JiebaSegmenter::new())
    }

    #[cfg(not(feature = "jieba"))]
    {
        Arc::new(MaxMatchSegmenter::default())
    }
}

/// Word tokens of one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSegmentation {
    /// Word tokens in sentence order
    pub word_tokens: Vec<WordToken>,
    /// `sentence_token_id` -> `word_token_id`
    pub token_to_word: BTreeMap<usize, usize>,
    /// Segmenter words that could not be bound to any token
    pub gaps: usize,
}

impl WordSegmentation {
    /// Write the back-references into the sentence's tokens
    pub fn apply(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            token.word_token_id = self.token_to_word.get(&token.sentence_token_id).copied();
        }
    }
}

/// Segment one sentence into word tokens
///
/// `tokens` must be the sentence's tokens, whose bodies concatenate to
/// `sentence_text`. Word token ids are drawn from `counters`. Spans that
/// cover only space or punctuation tokens do not become word tokens.
pub fn segment_words(
    sentence_text: &str,
    tokens: &[Token],
    segmenter: &dyn WordSegmenter,
    counters: &mut IdCounters,
) -> WordSegmentation {
    let words = segmenter.cut(sentence_text);
    let located = locate_spans(sentence_text, &words);
    let aligned = align_spans(tokens, &located.spans);

    // Whitespace words may fall inside one collapsed space token
    let is_gap = |word: &str| !word.trim().is_empty();
    let unaligned = located
        .spans
        .iter()
        .enumerate()
        .filter(|(index, span)| {
            is_gap(span.word) && !aligned.iter().any(|a| a.span_index == *index)
        })
        .count();

    let mut segmentation = WordSegmentation {
        gaps: located.missing.iter().filter(|word| is_gap(word)).count() + unaligned,
        ..WordSegmentation::default()
    };

    for span in aligned {
        let covered = &tokens[span.tokens];
        if !covered.iter().any(Token::is_text) {
            continue;
        }

        let word_token_id = counters.next_word_token_id();
        let token_ids: Vec<usize> = covered.iter().map(|t| t.sentence_token_id).collect();
        let body: String = covered.iter().map(|t| t.body.as_str()).collect();

        for &token_id in &token_ids {
            segmentation.token_to_word.insert(token_id, word_token_id);
        }

        let word = WordToken::new(word_token_id, body, token_ids);
        debug_assert!(word.is_contiguous(), "word token ids must be contiguous");
        segmentation.word_tokens.push(word);
    }

    if segmentation.gaps > 0 {
        log::debug!(
            "{} segmenter word(s) left unaligned in '{sentence_text}'",
            segmentation.gaps
        );
    }

    segmentation
}
