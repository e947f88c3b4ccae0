//! Sentence tokenization
//!
//! Two strategies, selected by [`ScriptCategory`]:
//!
//! - **Word level** for whitespace-delimited scripts: words (with internal
//!   hyphens and apostrophes), single punctuation characters, whitespace runs.
//! - **Character level** for non-whitespace scripts: every word character or
//!   ideograph is its own token, whitespace runs collapse into one token.
//!
//! Both strategies are lossless: the token bodies concatenate back to the
//! input sentence.

use crate::language::ScriptCategory;
use crate::model::TokenType;
use regex::Regex;
use std::sync::OnceLock;

static WORD_LEVEL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn word_level_pattern() -> &'static Regex {
    WORD_LEVEL_PATTERN.get_or_init(|| {
        Regex::new(r"(?P<text>\w+(?:[-‐'’]\w+)*)|(?P<space>\s+)|(?P<punct>[^\w\s])")
            .expect("valid tokenizer regex")
    })
}

/// A token before ids are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// Exact slice of the sentence
    pub body: &'a str,
    /// Token classification
    pub token_type: TokenType,
}

impl<'a> RawToken<'a> {
    fn new(body: &'a str, token_type: TokenType) -> Self {
        Self { body, token_type }
    }
}

/// Tokenization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Word-level tokens for whitespace-delimited scripts
    WordLevel,
    /// Character-level tokens for non-whitespace scripts
    CharacterLevel,
}

impl Tokenizer {
    /// Strategy for a script category
    pub fn for_category(category: ScriptCategory) -> Self {
        match category {
            ScriptCategory::Whitespace => Tokenizer::WordLevel,
            ScriptCategory::NonWhitespace => Tokenizer::CharacterLevel,
        }
    }

    /// Split one sentence into raw tokens
    pub fn tokenize<'a>(&self, sentence: &'a str) -> Vec<RawToken<'a>> {
        match self {
            Tokenizer::WordLevel => tokenize_word_level(sentence),
            Tokenizer::CharacterLevel => tokenize_character_level(sentence),
        }
    }
}

/// Split one sentence with the strategy of `category`
pub fn tokenize(sentence: &str, category: ScriptCategory) -> Vec<RawToken<'_>> {
    Tokenizer::for_category(category).tokenize(sentence)
}

fn tokenize_word_level(sentence: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in word_level_pattern().captures_iter(sentence) {
        let (whole, token_type) = if let Some(m) = caps.name("text") {
            (m, TokenType::Text)
        } else if let Some(m) = caps.name("space") {
            (m, TokenType::Space)
        } else if let Some(m) = caps.name("punct") {
            (m, TokenType::Punctuation)
        } else {
            continue;
        };

        // The three classes cover every character, so a gap would mean a
        // regex bug; keep the text anyway.
        if whole.start() > cursor {
            tokens.push(RawToken::new(
                &sentence[cursor..whole.start()],
                TokenType::Punctuation,
            ));
        }
        tokens.push(RawToken::new(whole.as_str(), token_type));
        cursor = whole.end();
    }

    if cursor < sentence.len() {
        tokens.push(RawToken::new(&sentence[cursor..], TokenType::Punctuation));
    }

    tokens
}

fn tokenize_character_level(sentence: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut space_start: Option<usize> = None;

    for (pos, ch) in sentence.char_indices() {
        if ch.is_whitespace() {
            space_start.get_or_insert(pos);
            continue;
        }
        if let Some(start) = space_start.take() {
            tokens.push(RawToken::new(&sentence[start..pos], TokenType::Space));
        }

        let token_type = if is_word_char(ch) {
            TokenType::Text
        } else {
            TokenType::Punctuation
        };
        tokens.push(RawToken::new(
            &sentence[pos..pos + ch.len_utf8()],
            token_type,
        ));
    }

    if let Some(start) = space_start {
        tokens.push(RawToken::new(&sentence[start..], TokenType::Space));
    }

    tokens
}

/// Word characters plus the CJK ideograph blocks
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || is_cjk_ideograph(ch)
}

/// CJK unified ideographs, extension A, compatibility ideographs and the
/// supplementary ideographic planes
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(
        ch,
        '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
    )
}
