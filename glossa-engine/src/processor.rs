//! Document processor and builder
//!
//! [`DocumentProcessor::process`] runs the whole pipeline for one document:
//!
//! 1. classify the language and pick its profile,
//! 2. segment sentences,
//! 3. fold over the sentences with one [`IdCounters`] accumulator, building
//!    tokens and word tokens,
//! 4. assess every enrichment unit through the configured [`Executor`],
//! 5. write assessments back and resolve vocabulary entries, sequentially
//!    and in document order.

use crate::{
    assembler::SentenceAssembler,
    config::{EngineConfig, EnrichmentUnit, SentenceDifficultyPolicy},
    enrichment::{
        AssessmentRequest, DifficultyEstimator, Enrichers, EnrichmentService, EnrichmentSession,
        EnrichmentStats, ExplanationGenerator, Lemmatizer, PosTagger, TokenAssessment,
    },
    error::Result,
    executor::{executor_for, ExecutionMode, Executor},
    vocab::{ExplanationSource, Usage, VocabAggregator, VocabKey},
};
use glossa_core::{
    default_segmenter, Classification, Document, IdCounters, LanguageClassifier,
    LanguageProfile, ScriptCategory, SegmenterOptions, Sentence, SentenceSegmenter, VocabEntry,
    WordSegmenter,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// The structured document
    pub document: Document,
    /// Language the document was processed as
    pub language: Classification,
    /// Number of sentences
    pub total_sentences: usize,
    /// Number of tokens
    pub total_tokens: usize,
    /// Number of word tokens
    pub total_word_tokens: usize,
    /// Vocabulary entries created in this run, in id order
    pub vocab_expressions: Vec<VocabEntry>,
    /// Enrichment call counters
    pub enrichment: EnrichmentStats,
    /// Segmenter words that could not be aligned to tokens
    pub segmentation_gaps: usize,
}

/// Main document processor
pub struct DocumentProcessor {
    config: EngineConfig,
    service: EnrichmentService,
    executor: Box<dyn Executor>,
    word_segmenter: Arc<dyn WordSegmenter>,
    profile: Option<Arc<LanguageProfile>>,
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("config", &self.config)
            .field("enrichers", self.service.enrichers())
            .field("executor", &self.executor.name())
            .field("word_segmenter", &self.word_segmenter.name())
            .field("profile", &self.profile.as_ref().map(|p| p.code()))
            .finish()
    }
}

/// Where one enrichment unit lives
#[derive(Debug, Clone, Copy)]
enum Unit {
    Token { sentence: usize, index: usize },
    Word { sentence: usize, index: usize },
}

impl DocumentProcessor {
    /// Processor with the default configuration and no enrichment
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start building a processor
    pub fn builder() -> DocumentProcessorBuilder {
        DocumentProcessorBuilder::new()
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execution mode of the enrichment phase
    pub fn execution_mode(&self) -> ExecutionMode {
        self.executor.mode()
    }

    /// Process one document
    ///
    /// Never fails: empty input gives an empty document, and enrichment
    /// failures leave the affected fields unset.
    pub fn process(
        &self,
        raw_text: &str,
        text_id: u64,
        title: &str,
        language: Option<&str>,
    ) -> ProcessedDocument {
        let (classification, profile) = self.resolve_language(language);
        log::debug!(
            "Processing text {text_id} as '{}' ({})",
            classification.code,
            classification.category.as_str()
        );

        let bodies = SentenceSegmenter::with_options(Arc::clone(&profile), self.config.segmenter)
            .segment(raw_text);

        let assembler = SentenceAssembler::new(profile, Arc::clone(&self.word_segmenter));
        let mut counters = IdCounters::new();
        let mut segmentation_gaps = 0;
        let mut sentences = Vec::with_capacity(bodies.len());
        for (index, body) in bodies.into_iter().enumerate() {
            let assembled = assembler.assemble(index + 1, body, &mut counters);
            segmentation_gaps += assembled.gaps;
            sentences.push(assembled.sentence);
        }

        let mut enrichment = EnrichmentStats::default();
        let mut vocab = VocabAggregator::new();
        if self.service.is_active() {
            let unit = match classification.category {
                ScriptCategory::NonWhitespace => self.config.enrichment_unit,
                ScriptCategory::Whitespace => EnrichmentUnit::Characters,
            };
            enrichment = self.enrich(&mut sentences, unit, text_id, &mut vocab);
        }

        let mut document = Document::new(text_id, title, language.map(str::to_string));
        document.sentences = sentences;

        let processed = ProcessedDocument {
            total_sentences: document.sentences.len(),
            total_tokens: document.total_tokens(),
            total_word_tokens: document.total_word_tokens(),
            vocab_expressions: vocab.into_entries(),
            language: classification,
            document,
            enrichment,
            segmentation_gaps,
        };

        log::info!(
            "Text {text_id}: {} sentences, {} tokens, {} word tokens, {} vocabulary entries",
            processed.total_sentences,
            processed.total_tokens,
            processed.total_word_tokens,
            processed.vocab_expressions.len()
        );
        processed
    }

    fn resolve_language(&self, language: Option<&str>) -> (Classification, Arc<LanguageProfile>) {
        if let Some(profile) = &self.profile {
            let classification = Classification {
                code: profile.code().to_string(),
                category: profile.category(),
                known: true,
            };
            return (classification, Arc::clone(profile));
        }

        let classifier = LanguageClassifier::new();
        let classification = classifier.classify(language);
        if !classification.known && language.is_some() {
            log::warn!(
                "Unknown language '{}', using whitespace tokenization",
                classification.code
            );
        }
        let profile = classifier.profile_for(&classification);
        (classification, profile)
    }

    fn enrich(
        &self,
        sentences: &mut [Sentence],
        unit: EnrichmentUnit,
        text_id: u64,
        vocab: &mut VocabAggregator,
    ) -> EnrichmentStats {
        let (units, requests) = collect_units(sentences, unit);
        let session = self.service.session();
        let (assessments, mut stats) = self.executor.assess(&requests, &session);
        debug_assert_eq!(assessments.len(), units.len());

        let mut tallies = vec![(0usize, 0usize); sentences.len()];
        let mut explanations = ServiceExplanations {
            session: &session,
            stats: &mut stats,
        };

        for (unit, assessment) in units.into_iter().zip(assessments) {
            let sentence_index = match unit {
                Unit::Token { sentence, index } => {
                    let target = &mut sentences[sentence];
                    let token = &mut target.tokens[index];
                    let usage = Usage {
                        context: &target.body,
                        text_id,
                        sentence_id: target.sentence_id,
                    };
                    let vocab_id = link_vocab(
                        &assessment,
                        &token.body,
                        usage,
                        vec![token.sentence_token_id],
                        vocab,
                        &mut explanations,
                    );
                    token.difficulty_level = assessment.difficulty;
                    token.lemma = assessment.lemma.clone();
                    token.pos_tag = assessment.pos_tag.clone();
                    token.linked_vocab_id = vocab_id;
                    sentence
                }
                Unit::Word { sentence, index } => {
                    let target = &mut sentences[sentence];
                    let word = &mut target.word_tokens[index];
                    let usage = Usage {
                        context: &target.body,
                        text_id,
                        sentence_id: target.sentence_id,
                    };
                    let vocab_id = link_vocab(
                        &assessment,
                        &word.body,
                        usage,
                        word.token_ids.clone(),
                        vocab,
                        &mut explanations,
                    );
                    word.difficulty_level = assessment.difficulty;
                    word.lemma = assessment.lemma.clone();
                    word.pos_tag = assessment.pos_tag.clone();
                    word.linked_vocab_id = vocab_id;
                    sentence
                }
            };

            let tally = &mut tallies[sentence_index];
            if assessment.difficulty.is_some() {
                tally.0 += 1;
            }
            if assessment.is_hard() {
                tally.1 += 1;
            }
        }

        rate_sentences(sentences, &tallies, &self.config.difficulty_policy);
        stats
    }
}

/// Requests for every enrichment unit, in document order
fn collect_units(sentences: &[Sentence], unit: EnrichmentUnit) -> (Vec<Unit>, Vec<AssessmentRequest>) {
    let mut units = Vec::new();
    let mut requests = Vec::new();

    for (sentence_index, sentence) in sentences.iter().enumerate() {
        let context: Arc<str> = Arc::from(sentence.body.as_str());
        match unit {
            EnrichmentUnit::Characters => {
                for (index, token) in sentence.tokens.iter().enumerate() {
                    if token.is_text() {
                        units.push(Unit::Token {
                            sentence: sentence_index,
                            index,
                        });
                        requests.push(AssessmentRequest {
                            body: token.body.clone(),
                            context: Arc::clone(&context),
                        });
                    }
                }
            }
            EnrichmentUnit::Words => {
                for (index, word) in sentence.word_tokens.iter().enumerate() {
                    units.push(Unit::Word {
                        sentence: sentence_index,
                        index,
                    });
                    requests.push(AssessmentRequest {
                        body: word.body.clone(),
                        context: Arc::clone(&context),
                    });
                }
            }
        }
    }

    (units, requests)
}

/// Resolve a vocabulary entry for a hard unit
fn link_vocab(
    assessment: &TokenAssessment,
    body: &str,
    usage: Usage<'_>,
    token_indices: Vec<usize>,
    vocab: &mut VocabAggregator,
    explanations: &mut dyn ExplanationSource,
) -> Option<usize> {
    if !assessment.is_hard() {
        return None;
    }
    let key = VocabKey::for_unit(assessment.lemma.as_deref(), body)?;
    Some(vocab.resolve(&key, usage, token_indices, explanations))
}

fn rate_sentences(
    sentences: &mut [Sentence],
    tallies: &[(usize, usize)],
    policy: &SentenceDifficultyPolicy,
) {
    for (sentence, &(assessed, hard)) in sentences.iter_mut().zip(tallies) {
        sentence.difficulty_level = policy.rate(assessed, hard);
    }
}

/// Explanation calls that go through the session and count into `stats`
struct ServiceExplanations<'a> {
    session: &'a EnrichmentSession<'a>,
    stats: &'a mut EnrichmentStats,
}

impl ExplanationSource for ServiceExplanations<'_> {
    fn explanation(&mut self, key: &VocabKey, context: &str) -> Option<String> {
        self.session.explain(key.as_str(), context, self.stats)
    }

    fn context_explanation(&mut self, key: &VocabKey, context: &str) -> Option<String> {
        self.session
            .explain_in_context(key.as_str(), context, self.stats)
    }
}

/// Builder for [`DocumentProcessor`]
pub struct DocumentProcessorBuilder {
    config: EngineConfig,
    enrichers: Enrichers,
    word_segmenter: Option<Arc<dyn WordSegmenter>>,
    profile: Option<Arc<LanguageProfile>>,
}

impl Default for DocumentProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            enrichers: Enrichers::none(),
            word_segmenter: None,
            profile: None,
        }
    }

    /// Replace the whole engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.threads = count;
        self
    }

    /// Set the per-call enrichment timeout
    pub fn enrichment_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.enrichment_timeout = timeout;
        self
    }

    /// Drop a service for the rest of a document after this many failures
    /// in a row; `None` never drops it
    pub fn max_consecutive_failures(mut self, limit: Option<usize>) -> Self {
        self.config.max_consecutive_failures = limit;
        self
    }

    /// Set the enrichment unit for non-whitespace languages
    pub fn enrichment_unit(mut self, unit: EnrichmentUnit) -> Self {
        self.config.enrichment_unit = unit;
        self
    }

    /// Set the sentence segmentation options
    pub fn segmenter_options(mut self, options: SegmenterOptions) -> Self {
        self.config.segmenter = options;
        self
    }

    /// Replace all enrichment services
    pub fn enrichers(mut self, enrichers: Enrichers) -> Self {
        self.enrichers = enrichers;
        self
    }

    /// Set the difficulty estimator
    pub fn difficulty_estimator(mut self, estimator: impl DifficultyEstimator + 'static) -> Self {
        self.enrichers = self.enrichers.with_difficulty(estimator);
        self
    }

    /// Set the lemmatizer
    pub fn lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.enrichers = self.enrichers.with_lemmatizer(lemmatizer);
        self
    }

    /// Set the POS tagger
    pub fn pos_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.enrichers = self.enrichers.with_pos_tagger(tagger);
        self
    }

    /// Set the explanation generator
    pub fn explainer(mut self, explainer: impl ExplanationGenerator + 'static) -> Self {
        self.enrichers = self.enrichers.with_explainer(explainer);
        self
    }

    /// Use a specific word segmenter for non-whitespace languages
    pub fn word_segmenter(mut self, segmenter: Arc<dyn WordSegmenter>) -> Self {
        self.word_segmenter = Some(segmenter);
        self
    }

    /// Process every document with this profile, ignoring the language
    /// argument of [`DocumentProcessor::process`]
    pub fn language_profile(mut self, profile: Arc<LanguageProfile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Load a language profile file and use it for every document
    pub fn language_profile_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let profile = LanguageProfile::from_file(path)?;
        log::info!("Loaded language profile '{}' from {}", profile.code(), path.display());
        Ok(self.language_profile(Arc::new(profile)))
    }

    /// Build the processor
    pub fn build(self) -> Result<DocumentProcessor> {
        let executor = executor_for(&self.config)?;
        Ok(DocumentProcessor {
            service: EnrichmentService::new(self.enrichers, self.config.enrichment_timeout)
                .with_failure_limit(self.config.max_consecutive_failures),
            executor,
            word_segmenter: self.word_segmenter.unwrap_or_else(default_segmenter),
            profile: self.profile,
            config: self.config,
        })
    }
}
