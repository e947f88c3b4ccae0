//! Sentence assembly
//!
//! Turns one sentence string into a structurally complete [`Sentence`]:
//! tokens with ids, grammar markers, and word tokens for non-whitespace
//! scripts. Enrichment is applied later by the processor.

use glossa_core::{
    segment_words, IdCounters, LanguageProfile, ScriptCategory, Sentence, Tokenizer,
    WordSegmenter,
};
use std::sync::Arc;

/// A sentence plus alignment bookkeeping
#[derive(Debug, Clone)]
pub struct AssembledSentence {
    /// The sentence
    pub sentence: Sentence,
    /// Segmenter words that could not be aligned
    pub gaps: usize,
}

/// Builds sentences for one language profile
pub struct SentenceAssembler {
    profile: Arc<LanguageProfile>,
    tokenizer: Tokenizer,
    word_segmenter: Option<Arc<dyn WordSegmenter>>,
}

impl std::fmt::Debug for SentenceAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceAssembler")
            .field("language", &self.profile.code())
            .field("tokenizer", &self.tokenizer)
            .field(
                "word_segmenter",
                &self.word_segmenter.as_ref().map(|s| s.name()),
            )
            .finish()
    }
}

impl SentenceAssembler {
    /// Create an assembler; `word_segmenter` is only used for
    /// non-whitespace scripts
    pub fn new(profile: Arc<LanguageProfile>, word_segmenter: Arc<dyn WordSegmenter>) -> Self {
        let category = profile.category();
        Self {
            tokenizer: Tokenizer::for_category(category),
            word_segmenter: (category == ScriptCategory::NonWhitespace).then_some(word_segmenter),
            profile,
        }
    }

    /// Build sentence `sentence_id` from its text, drawing ids from `counters`
    pub fn assemble(
        &self,
        sentence_id: usize,
        body: String,
        counters: &mut IdCounters,
    ) -> AssembledSentence {
        let mut tokens = counters.assign(&self.tokenizer.tokenize(&body));

        for token in tokens.iter_mut().filter(|t| t.is_text()) {
            token.is_grammar_marker = self.profile.is_grammar_marker(&token.body);
        }

        let mut gaps = 0;
        let mut word_tokens = Vec::new();
        if let Some(segmenter) = &self.word_segmenter {
            let segmentation = segment_words(&body, &tokens, segmenter.as_ref(), counters);
            segmentation.apply(&mut tokens);
            gaps = segmentation.gaps;
            word_tokens = segmentation.word_tokens;
        }

        let mut sentence = Sentence::new(sentence_id, body, tokens);
        sentence.word_tokens = word_tokens;
        AssembledSentence { sentence, gaps }
    }
}
