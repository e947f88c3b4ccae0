//! Determinism and structural properties of processed documents

use glossa_core::MaxMatchSegmenter;
use glossa_engine::*;
use proptest::prelude::*;
use std::sync::Arc;

fn document_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[A-Za-z]{1,10}",
            Just(" ".to_string()),
            Just(". ".to_string()),
            Just("! ".to_string()),
            Just("\n\n".to_string()),
            Just("我喜欢学习".to_string()),
            Just("。".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn processor() -> DocumentProcessor {
    DocumentProcessor::builder()
        .word_segmenter(Arc::new(MaxMatchSegmenter::from_words(["喜欢", "学习"])))
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn processing_is_deterministic(text in document_text(), zh in any::<bool>()) {
        let language = if zh { "zh" } else { "en" };
        let first = processor().process(&text, 1, "t", Some(language));
        let second = processor().process(&text, 1, "t", Some(language));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ids_are_dense_and_ordered(text in document_text(), zh in any::<bool>()) {
        let language = if zh { "zh" } else { "en" };
        let processed = processor().process(&text, 1, "t", Some(language));

        let globals: Vec<usize> = processed.document.tokens().map(|t| t.global_token_id).collect();
        prop_assert_eq!(globals, (0..processed.total_tokens).collect::<Vec<_>>());

        let mut next_word_id = 1;
        for (index, sentence) in processed.document.sentences.iter().enumerate() {
            prop_assert_eq!(sentence.sentence_id, index + 1);
            prop_assert_eq!(sentence.reconstruct(), sentence.body.clone());
            let local: Vec<usize> = sentence.tokens.iter().map(|t| t.sentence_token_id).collect();
            prop_assert_eq!(local, (1..=sentence.tokens.len()).collect::<Vec<_>>());

            for word in &sentence.word_tokens {
                prop_assert_eq!(word.word_token_id, next_word_id);
                prop_assert!(word.is_contiguous());
                next_word_id += 1;
            }
        }
        prop_assert_eq!(next_word_id - 1, processed.total_word_tokens);
    }
}
