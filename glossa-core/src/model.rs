//! Document data model
//!
//! A [`Document`] exclusively owns its [`Sentence`]s, and every sentence owns
//! its [`Token`]s and [`WordToken`]s. Word tokens refer back to the tokens
//! they cover by `sentence_token_id` only; they never copy token state.
//! Vocabulary entries live outside the document and are referenced by id.

use serde::{Deserialize, Serialize};

/// Source tag stamped on vocabulary entries created by the pipeline
pub const AUTO_VOCAB_SOURCE: &str = "auto";

/// Classification of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Word characters (letters, digits, ideographs)
    Text,
    /// Any other visible character
    Punctuation,
    /// A run of whitespace
    Space,
}

impl TokenType {
    /// Lower-case name used in text output
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Text => "text",
            TokenType::Punctuation => "punctuation",
            TokenType::Space => "space",
        }
    }
}

/// Difficulty of a single token as reported by an estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenDifficulty {
    /// Known to the learner
    Easy,
    /// Worth explaining; triggers vocabulary aggregation
    Hard,
}

/// Difficulty derived for a whole sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceDifficulty {
    /// No hard tokens
    Easy,
    /// A small share of hard tokens
    Medium,
    /// Many hard tokens
    Hard,
}

/// One token of a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Document-wide id, strictly increasing from 0
    pub global_token_id: usize,
    /// Sentence-local id, contiguous from 1
    pub sentence_token_id: usize,
    /// Exact substring of the sentence
    pub body: String,
    /// Token classification
    pub token_type: TokenType,
    /// Difficulty, only ever set on text tokens
    pub difficulty_level: Option<TokenDifficulty>,
    /// Base form
    pub lemma: Option<String>,
    /// Part-of-speech tag
    pub pos_tag: Option<String>,
    /// Whether the token is a grammatical particle of the language
    pub is_grammar_marker: bool,
    /// Vocabulary entry linked when the token is hard
    pub linked_vocab_id: Option<usize>,
    /// Owning word token (non-whitespace languages only)
    pub word_token_id: Option<usize>,
}

impl Token {
    /// Create an un-enriched token
    pub fn new(
        global_token_id: usize,
        sentence_token_id: usize,
        body: impl Into<String>,
        token_type: TokenType,
    ) -> Self {
        Self {
            global_token_id,
            sentence_token_id,
            body: body.into(),
            token_type,
            difficulty_level: None,
            lemma: None,
            pos_tag: None,
            is_grammar_marker: false,
            linked_vocab_id: None,
            word_token_id: None,
        }
    }

    /// Whether this is a `text` token
    pub fn is_text(&self) -> bool {
        self.token_type == TokenType::Text
    }
}

/// A segmented word spanning one or more character tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    /// Document-wide id, strictly increasing from 1
    pub word_token_id: usize,
    /// Concatenated bodies of the covered tokens
    pub body: String,
    /// Contiguous, ascending `sentence_token_id`s owned by this word
    pub token_ids: Vec<usize>,
    /// Base form
    pub lemma: Option<String>,
    /// Part-of-speech tag
    pub pos_tag: Option<String>,
    /// Difficulty, set only when words are the enrichment unit
    pub difficulty_level: Option<TokenDifficulty>,
    /// Vocabulary entry linked when the word is hard
    pub linked_vocab_id: Option<usize>,
}

impl WordToken {
    /// Create an un-enriched word token
    pub fn new(word_token_id: usize, body: impl Into<String>, token_ids: Vec<usize>) -> Self {
        Self {
            word_token_id,
            body: body.into(),
            token_ids,
            lemma: None,
            pos_tag: None,
            difficulty_level: None,
            linked_vocab_id: None,
        }
    }

    /// Whether the owned ids form one ascending run without holes
    pub fn is_contiguous(&self) -> bool {
        self.token_ids.windows(2).all(|pair| pair[1] == pair[0] + 1)
    }
}

/// One sentence of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 1-based position in the document
    pub sentence_id: usize,
    /// Trimmed sentence text
    pub body: String,
    /// Tokens in order
    pub tokens: Vec<Token>,
    /// Word tokens, empty for whitespace languages
    pub word_tokens: Vec<WordToken>,
    /// Derived from token difficulties
    pub difficulty_level: Option<SentenceDifficulty>,
}

impl Sentence {
    /// Create a sentence from already-numbered tokens
    pub fn new(sentence_id: usize, body: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            sentence_id,
            body: body.into(),
            tokens,
            word_tokens: Vec::new(),
            difficulty_level: None,
        }
    }

    /// Look up a token by its sentence-local id
    pub fn token(&self, sentence_token_id: usize) -> Option<&Token> {
        sentence_token_id
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Look up a word token by its document-wide id
    pub fn word_token(&self, word_token_id: usize) -> Option<&WordToken> {
        self.word_tokens
            .iter()
            .find(|word| word.word_token_id == word_token_id)
    }

    /// Iterate over `text` tokens
    pub fn text_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.is_text())
    }

    /// Concatenate all token bodies
    pub fn reconstruct(&self) -> String {
        self.tokens.iter().map(|token| token.body.as_str()).collect()
    }
}

/// A processed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-supplied id
    pub text_id: u64,
    /// Caller-supplied title
    pub title: String,
    /// Language as supplied by the caller
    pub language: Option<String>,
    /// Sentences in document order
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create an empty document
    pub fn new(text_id: u64, title: impl Into<String>, language: Option<String>) -> Self {
        Self {
            text_id,
            title: title.into(),
            language,
            sentences: Vec::new(),
        }
    }

    /// Look up a sentence by its 1-based id
    pub fn sentence(&self, sentence_id: usize) -> Option<&Sentence> {
        sentence_id
            .checked_sub(1)
            .and_then(|index| self.sentences.get(index))
    }

    /// All tokens in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|sentence| sentence.tokens.iter())
    }

    /// Number of tokens across all sentences
    pub fn total_tokens(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    /// Number of word tokens across all sentences
    pub fn total_word_tokens(&self) -> usize {
        self.sentences.iter().map(|s| s.word_tokens.len()).sum()
    }
}

/// One usage of a vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabExample {
    /// Document the usage occurs in
    pub text_id: u64,
    /// Sentence the usage occurs in
    pub sentence_id: usize,
    /// Explanation of the usage in this sentence, empty when unavailable
    pub context_explanation: String,
    /// Sentence-local ids of the tokens forming the usage
    pub token_indices: Vec<usize>,
}

/// A deduplicated vocabulary expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Run-scoped id, strictly increasing from 1
    pub vocab_id: usize,
    /// Normalized (lower-cased) deduplication key
    pub key: String,
    /// General explanation, empty when unavailable
    pub explanation: String,
    /// Origin tag, [`AUTO_VOCAB_SOURCE`] for pipeline entries
    pub source: String,
    /// Usages in document order
    pub examples: Vec<VocabExample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sentence() -> Sentence {
        Sentence::new(
            1,
            "Hi there.",
            vec![
                Token::new(0, 1, "Hi", TokenType::Text),
                Token::new(1, 2, " ", TokenType::Space),
                Token::new(2, 3, "there", TokenType::Text),
                Token::new(3, 4, ".", TokenType::Punctuation),
            ],
        )
    }

    #[test]
    fn test_sentence_token_lookup_is_one_based() {
        let sentence = sample_sentence();
        assert_eq!(sentence.token(1).map(|t| t.body.as_str()), Some("Hi"));
        assert_eq!(sentence.token(4).map(|t| t.body.as_str()), Some("."));
        assert!(sentence.token(0).is_none());
        assert!(sentence.token(5).is_none());
    }

    #[test]
    fn test_reconstruct_and_text_tokens() {
        let sentence = sample_sentence();
        assert_eq!(sentence.reconstruct(), "Hi there.");
        let texts: Vec<&str> = sentence.text_tokens().map(|t| t.body.as_str()).collect();
        assert_eq!(texts, vec!["Hi", "there"]);
    }

    #[test]
    fn test_word_token_contiguity() {
        assert!(WordToken::new(1, "学习", vec![3, 4]).is_contiguous());
        assert!(WordToken::new(2, "我", vec![1]).is_contiguous());
        assert!(!WordToken::new(3, "x", vec![1, 3]).is_contiguous());
    }

    #[test]
    fn test_document_totals() {
        let mut document = Document::new(7, "Title", Some("en".to_string()));
        document.sentences.push(sample_sentence());
        assert_eq!(document.total_tokens(), 4);
        assert_eq!(document.total_word_tokens(), 0);
        assert_eq!(document.sentence(1).map(|s| s.sentence_id), Some(1));
        assert!(document.sentence(2).is_none());
    }

    #[test]
    fn test_enum_serialization_is_snake_case() {
        let json = serde_json::to_string(&TokenType::Punctuation).unwrap();
        assert_eq!(json, "\"punctuation\"");
        let json = serde_json::to_string(&SentenceDifficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
