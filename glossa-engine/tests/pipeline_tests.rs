//! End-to-end tests for the document pipeline

use glossa_core::MaxMatchSegmenter;
use glossa_engine::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Rates exactly the listed words as hard
struct HardWords(Vec<&'static str>);

impl DifficultyEstimator for HardWords {
    fn assess(&self, word: &str, _context: &str) -> EnrichmentResult<TokenDifficulty> {
        let hard = self.0.iter().any(|w| w.eq_ignore_ascii_case(word));
        Ok(Some(if hard {
            TokenDifficulty::Hard
        } else {
            TokenDifficulty::Easy
        }))
    }
}

struct Lowercase;

impl Lemmatizer for Lowercase {
    fn lemmatize(&self, word: &str) -> EnrichmentResult<String> {
        Ok(Some(word.to_lowercase()))
    }
}

struct Echo;

impl ExplanationGenerator for Echo {
    fn explain(&self, key: &str, _context: &str) -> EnrichmentResult<String> {
        Ok(Some(format!("meaning of {key}")))
    }

    fn explain_in_context(&self, key: &str, context: &str) -> EnrichmentResult<String> {
        Ok(Some(format!("{key} in '{context}'")))
    }

    fn explains_in_context(&self) -> bool {
        true
    }
}

/// General explanations only
struct Brief;

impl ExplanationGenerator for Brief {
    fn explain(&self, key: &str, _context: &str) -> EnrichmentResult<String> {
        Ok(Some(format!("{key}: brief")))
    }
}

struct Slow;

impl DifficultyEstimator for Slow {
    fn assess(&self, _word: &str, _context: &str) -> EnrichmentResult<TokenDifficulty> {
        thread::sleep(Duration::from_millis(300));
        Ok(Some(TokenDifficulty::Hard))
    }
}

/// Never answers
struct Hung;

impl DifficultyEstimator for Hung {
    fn assess(&self, _word: &str, _context: &str) -> EnrichmentResult<TokenDifficulty> {
        loop {
            thread::sleep(Duration::from_secs(3600));
        }
    }
}

struct Panicky;

impl Lemmatizer for Panicky {
    fn lemmatize(&self, _word: &str) -> EnrichmentResult<String> {
        panic!("lemmatizer crashed")
    }
}

fn plain() -> DocumentProcessor {
    DocumentProcessor::new().unwrap()
}

#[test]
fn test_scenario_english_two_sentences() {
    let processed = plain().process("I eat an apple. She runs fast.", 1, "Apples", Some("en"));

    assert_eq!(processed.total_sentences, 2);
    let first = &processed.document.sentences[0];
    assert_eq!(first.body, "I eat an apple.");
    assert_eq!(first.tokens[0].body, "I");
    assert_eq!(first.tokens[0].token_type, TokenType::Text);
    assert_eq!(first.tokens[1].token_type, TokenType::Space);
    assert_eq!(first.tokens[2].body, "eat");
    let last = first.tokens.last().unwrap();
    assert_eq!((last.body.as_str(), last.token_type), (".", TokenType::Punctuation));

    let second = &processed.document.sentences[1];
    assert_eq!(second.tokens[0].global_token_id, last.global_token_id + 1);
    assert_eq!(second.tokens[0].sentence_token_id, 1);

    let globals: Vec<usize> = processed.document.tokens().map(|t| t.global_token_id).collect();
    assert_eq!(globals, (0..processed.total_tokens).collect::<Vec<_>>());
    assert_eq!(processed.total_word_tokens, 0);
}

#[test]
fn test_scenario_chinese_word_tokens() {
    let processor = DocumentProcessor::builder()
        .word_segmenter(Arc::new(MaxMatchSegmenter::from_words(["喜欢", "学习", "编程"])))
        .build()
        .unwrap();
    let processed = processor.process("我喜欢学习编程。", 2, "编程", Some("zh"));

    assert_eq!(processed.language.category, ScriptCategory::NonWhitespace);
    assert_eq!(processed.total_sentences, 1);
    assert_eq!(processed.total_tokens, 8);

    let sentence = &processed.document.sentences[0];
    assert_eq!(sentence.tokens[7].token_type, TokenType::Punctuation);
    let words: Vec<&str> = sentence.word_tokens.iter().map(|w| w.body.as_str()).collect();
    assert_eq!(words, vec!["我", "喜欢", "学习", "编程"]);
    assert_eq!(processed.total_word_tokens, 4);

    for word in &sentence.word_tokens {
        assert!(word.is_contiguous());
        for &id in &word.token_ids {
            assert_eq!(sentence.token(id).unwrap().word_token_id, Some(word.word_token_id));
        }
    }
}

#[test]
fn test_scenario_vocab_deduplication() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(None)
        .difficulty_estimator(HardWords(vec!["challenging"]))
        .lemmatizer(Lowercase)
        .build()
        .unwrap();
    let processed = processor.process(
        "This is challenging. That was Challenging too.",
        42,
        "t",
        Some("en"),
    );

    assert_eq!(processed.vocab_expressions.len(), 1);
    let entry = &processed.vocab_expressions[0];
    assert_eq!(entry.vocab_id, 1);
    assert_eq!(entry.key, "challenging");
    assert_eq!(entry.source, "auto");
    let places: Vec<(u64, usize)> = entry
        .examples
        .iter()
        .map(|e| (e.text_id, e.sentence_id))
        .collect();
    assert_eq!(places, vec![(42, 1), (42, 2)]);

    let linked: Vec<Option<usize>> = processed
        .document
        .tokens()
        .filter(|t| t.body.eq_ignore_ascii_case("challenging"))
        .map(|t| t.linked_vocab_id)
        .collect();
    assert_eq!(linked, vec![Some(1), Some(1)]);
}

#[test]
fn test_scenario_empty_input() {
    let processed = plain().process("", 1, "empty", None);
    assert_eq!(processed.total_sentences, 0);
    assert_eq!(processed.total_tokens, 0);
    assert!(processed.document.sentences.is_empty());
    assert_eq!(processed.language.code, "und");
}

#[test]
fn test_unknown_language_uses_word_tokens() {
    let processed = plain().process("Qapla' batlh. Heghlu'meH QaQ.", 1, "t", Some("Klingon"));
    assert_eq!(processed.language.category, ScriptCategory::Whitespace);
    assert!(!processed.language.known);
    assert_eq!(processed.total_sentences, 2);
    // A trailing apostrophe is punctuation, an inner one joins the word
    assert_eq!(processed.document.sentences[0].tokens[0].body, "Qapla");
    assert_eq!(processed.document.sentences[1].tokens[0].body, "Heghlu'meH");
}

#[test]
fn test_explanations_fill_entries_and_examples() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(None)
        .difficulty_estimator(HardWords(vec!["ephemeral"]))
        .explainer(Echo)
        .build()
        .unwrap();
    let processed = processor.process("Fame is ephemeral. So is ephemeral joy.", 1, "t", None);

    let entry = &processed.vocab_expressions[0];
    assert_eq!(entry.explanation, "meaning of ephemeral");
    assert_eq!(
        entry.examples[1].context_explanation,
        "ephemeral in 'So is ephemeral joy.'"
    );
    assert_eq!(entry.examples[0].token_indices, vec![5]);
}

#[test]
fn test_timeouts_degrade_to_missing_difficulty() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(Some(Duration::from_millis(20)))
        .difficulty_estimator(Slow)
        .build()
        .unwrap();
    let processed = processor.process("Slow words.", 1, "t", Some("en"));

    assert_eq!(processed.total_tokens, 4);
    assert_eq!(processed.enrichment.calls, 2);
    assert_eq!(processed.enrichment.timeouts, 2);
    assert_eq!(processed.enrichment.failures, 2);
    assert!(processed.vocab_expressions.is_empty());
    assert!(processed.document.tokens().all(|t| t.difficulty_level.is_none()));
    assert_eq!(processed.document.sentences[0].difficulty_level, None);
}

#[test]
fn test_hung_service_is_dropped_after_failure_limit() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(Some(Duration::from_millis(20)))
        .difficulty_estimator(Hung)
        .build()
        .unwrap();
    assert_eq!(processor.config().max_consecutive_failures, Some(3));

    let text = format!("{}end.", "word ".repeat(200));
    let start = Instant::now();
    let processed = processor.process(&text, 1, "t", Some("en"));

    assert_eq!(processed.total_tokens, 402);
    assert_eq!(processed.enrichment.calls, 3);
    assert_eq!(processed.enrichment.timeouts, 3);
    assert_eq!(processed.enrichment.failures, 3);
    assert_eq!(processed.enrichment.skipped, 198);
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(processed.document.tokens().all(|t| t.difficulty_level.is_none()));

    // The next document tries the service again
    let processed = processor.process("One more.", 2, "t", Some("en"));
    assert_eq!(processed.enrichment.timeouts, 2);
    assert_eq!(processed.enrichment.skipped, 0);
}

#[test]
fn test_default_context_explanation_makes_no_calls() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(Some(Duration::from_secs(5)))
        .difficulty_estimator(HardWords(vec!["ephemeral"]))
        .explainer(Brief)
        .build()
        .unwrap();
    let processed = processor.process("Fame is ephemeral. So is ephemeral joy.", 1, "t", None);

    let entry = &processed.vocab_expressions[0];
    assert_eq!(entry.explanation, "ephemeral: brief");
    assert_eq!(entry.examples.len(), 2);
    assert!(entry.examples.iter().all(|e| e.context_explanation.is_empty()));
    // Seven difficulty calls and one general explanation
    assert_eq!(processed.enrichment.calls, 8);
}

#[test]
fn test_panicking_service_is_contained() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(None)
        .lemmatizer(Panicky)
        .build()
        .unwrap();
    let processed = processor.process("Still here.", 1, "t", Some("en"));

    assert_eq!(processed.total_tokens, 3);
    assert_eq!(processed.enrichment.failures, 2);
    assert!(processed.document.tokens().all(|t| t.lemma.is_none()));
}

#[test]
fn test_word_unit_links_word_tokens() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(None)
        .enrichment_unit(EnrichmentUnit::Words)
        .word_segmenter(Arc::new(MaxMatchSegmenter::from_words(["喜欢", "学习", "编程"])))
        .difficulty_estimator(HardWords(vec!["喜欢"]))
        .build()
        .unwrap();
    let processed = processor.process("我喜欢学习。我喜欢编程。", 1, "t", Some("zh"));

    assert_eq!(processed.vocab_expressions.len(), 1);
    let entry = &processed.vocab_expressions[0];
    assert_eq!(entry.key, "喜欢");
    assert_eq!(entry.examples.len(), 2);
    assert_eq!(entry.examples[0].token_indices, vec![2, 3]);

    let first = &processed.document.sentences[0];
    let like = first.word_tokens.iter().find(|w| w.body == "喜欢").unwrap();
    assert_eq!(like.difficulty_level, Some(TokenDifficulty::Hard));
    assert_eq!(like.linked_vocab_id, Some(1));
    // Character tokens are not rated in word mode
    assert!(first.tokens.iter().all(|t| t.difficulty_level.is_none()));
    // 1 hard of 3 words
    assert_eq!(first.difficulty_level, Some(SentenceDifficulty::Hard));
}

#[test]
fn test_sentence_difficulty_levels() {
    let processor = DocumentProcessor::builder()
        .enrichment_timeout(None)
        .difficulty_estimator(HardWords(vec!["quixotic"]))
        .build()
        .unwrap();
    let processed = processor.process(
        "The cat sat on the mat. His quixotic plan failed badly today, sadly. Quixotic!",
        1,
        "t",
        Some("en"),
    );

    let levels: Vec<Option<SentenceDifficulty>> = processed
        .document
        .sentences
        .iter()
        .map(|s| s.difficulty_level)
        .collect();
    assert_eq!(
        levels,
        vec![
            Some(SentenceDifficulty::Easy),
            Some(SentenceDifficulty::Medium),
            Some(SentenceDifficulty::Hard),
        ]
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_and_sequential_agree() {
    let text = "The ubiquitous cat ignored the ubiquitous dog. A serendipitous find! \
                The cat was ubiquitous, serendipitous and quiet.";
    let build = |mode| {
        DocumentProcessor::builder()
            .execution_mode(mode)
            .threads(Some(4))
            .difficulty_estimator(HardWords(vec!["ubiquitous", "serendipitous", "quiet"]))
            .lemmatizer(Lowercase)
            .build()
            .unwrap()
    };

    let sequential = build(ExecutionMode::Sequential).process(text, 9, "t", Some("en"));
    let parallel = build(ExecutionMode::Parallel).process(text, 9, "t", Some("en"));

    assert_eq!(sequential, parallel);
    let keys: Vec<&str> = parallel
        .vocab_expressions
        .iter()
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(keys, vec!["ubiquitous", "serendipitous", "quiet"]);
}
