//! Pluggable enrichment services
//!
//! Difficulty estimation, lemmatization, POS tagging and explanation
//! generation are external collaborators behind narrow traits. Every call
//! goes through an [`EnrichmentSession`], which applies the per-call
//! timeout, logs failures and turns them into absent values. A service that
//! keeps failing is dropped for the rest of the document. Nothing here can
//! abort a document.

pub mod lexicon;
pub mod timeout;

pub use lexicon::{TableLemmatizer, WordListEstimator};
pub use timeout::call_with_timeout;

use crate::error::{EnrichmentError, EnrichmentResult};
use glossa_core::TokenDifficulty;
use std::fmt;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Rates a word as easy or hard for the learner
pub trait DifficultyEstimator: Send + Sync {
    /// Assess `word` as used in `context`
    fn assess(&self, word: &str, context: &str) -> EnrichmentResult<TokenDifficulty>;
}

/// Maps a surface form to its base form
pub trait Lemmatizer: Send + Sync {
    /// Lemma of `word`, `None` when unknown
    fn lemmatize(&self, word: &str) -> EnrichmentResult<String>;
}

/// Assigns part-of-speech tags
pub trait PosTagger: Send + Sync {
    /// Tag of `word` as used in `context`
    fn tag(&self, word: &str, context: &str) -> EnrichmentResult<String>;
}

/// Writes learner-facing explanations for vocabulary entries
pub trait ExplanationGenerator: Send + Sync {
    /// General explanation of `key`, requested once per entry
    fn explain(&self, key: &str, context: &str) -> EnrichmentResult<String>;

    /// Explanation of `key` in one particular sentence, requested per example
    ///
    /// Only called when [`explains_in_context`](Self::explains_in_context)
    /// returns `true`.
    fn explain_in_context(&self, key: &str, context: &str) -> EnrichmentResult<String> {
        let _ = (key, context);
        Ok(None)
    }

    /// Whether [`explain_in_context`](Self::explain_in_context) is
    /// implemented; override together with it
    fn explains_in_context(&self) -> bool {
        false
    }
}

/// The set of services a processor calls; any of them may be absent
#[derive(Clone, Default)]
pub struct Enrichers {
    /// Difficulty estimator
    pub difficulty: Option<Arc<dyn DifficultyEstimator>>,
    /// Lemmatizer
    pub lemmatizer: Option<Arc<dyn Lemmatizer>>,
    /// POS tagger
    pub pos_tagger: Option<Arc<dyn PosTagger>>,
    /// Explanation generator
    pub explainer: Option<Arc<dyn ExplanationGenerator>>,
}

impl fmt::Debug for Enrichers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enrichers")
            .field("difficulty", &self.difficulty.is_some())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .field("pos_tagger", &self.pos_tagger.is_some())
            .field("explainer", &self.explainer.is_some())
            .finish()
    }
}

impl Enrichers {
    /// No services: structure only
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the difficulty estimator
    pub fn with_difficulty(mut self, estimator: impl DifficultyEstimator + 'static) -> Self {
        self.difficulty = Some(Arc::new(estimator));
        self
    }

    /// Set the lemmatizer
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Arc::new(lemmatizer));
        self
    }

    /// Set the POS tagger
    pub fn with_pos_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.pos_tagger = Some(Arc::new(tagger));
        self
    }

    /// Set the explanation generator
    pub fn with_explainer(mut self, explainer: impl ExplanationGenerator + 'static) -> Self {
        self.explainer = Some(Arc::new(explainer));
        self
    }

    /// Whether no per-token service is configured
    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none() && self.lemmatizer.is_none() && self.pos_tagger.is_none()
    }
}

/// Enrichment computed for one token or word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenAssessment {
    /// Difficulty, `None` when not assessed or the call failed
    pub difficulty: Option<TokenDifficulty>,
    /// Lemma
    pub lemma: Option<String>,
    /// POS tag
    pub pos_tag: Option<String>,
}

impl TokenAssessment {
    /// Whether the unit was rated hard
    pub fn is_hard(&self) -> bool {
        self.difficulty == Some(TokenDifficulty::Hard)
    }
}

/// One unit to assess: a text token or a word token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    /// Surface form
    pub body: String,
    /// The sentence the unit appears in
    pub context: Arc<str>,
}

/// Counters over all service calls of one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Calls made
    pub calls: usize,
    /// Calls that failed, timeouts included
    pub failures: usize,
    /// Calls that timed out
    pub timeouts: usize,
    /// Calls not made because the service had been dropped for the document
    pub skipped: usize,
}

impl EnrichmentStats {
    fn record<T>(&mut self, service: &str, result: EnrichmentResult<T>) -> Option<T> {
        self.calls += 1;
        match result {
            Ok(value) => value,
            Err(err) => {
                self.failures += 1;
                if err.is_timeout() {
                    self.timeouts += 1;
                }
                log::warn!("{service} call failed: {err}");
                None
            }
        }
    }
}

impl AddAssign for EnrichmentStats {
    fn add_assign(&mut self, other: Self) {
        self.calls += other.calls;
        self.failures += other.failures;
        self.timeouts += other.timeouts;
        self.skipped += other.skipped;
    }
}

/// [`Enrichers`] plus the timeout and failure policy
#[derive(Debug, Clone, Default)]
pub struct EnrichmentService {
    enrichers: Enrichers,
    timeout: Option<Duration>,
    failure_limit: Option<usize>,
}

impl EnrichmentService {
    /// Create a service facade that never disables a failing service
    pub fn new(enrichers: Enrichers, timeout: Option<Duration>) -> Self {
        Self {
            enrichers,
            timeout,
            failure_limit: None,
        }
    }

    /// Stop calling a service for the rest of a document after `limit`
    /// consecutive failures; `None` keeps calling it
    pub fn with_failure_limit(mut self, limit: Option<usize>) -> Self {
        self.failure_limit = limit.map(|limit| limit.max(1));
        self
    }

    /// The configured services
    pub fn enrichers(&self) -> &Enrichers {
        &self.enrichers
    }

    /// Whether any per-token service is configured
    pub fn is_active(&self) -> bool {
        !self.enrichers.is_empty()
    }

    /// Start enriching one document
    pub fn session(&self) -> EnrichmentSession<'_> {
        EnrichmentSession {
            service: self,
            breakers: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ServiceKind {
    Difficulty,
    Lemmatizer,
    PosTagger,
    Explainer,
}

impl ServiceKind {
    fn name(self) -> &'static str {
        match self {
            Self::Difficulty => "difficulty",
            Self::Lemmatizer => "lemmatizer",
            Self::PosTagger => "pos tagger",
            Self::Explainer => "explainer",
        }
    }
}

/// Consecutive failures of one service
#[derive(Debug, Default)]
struct Breaker {
    consecutive: AtomicUsize,
    open: AtomicBool,
}

impl Breaker {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    fn succeeded(&self) {
        self.consecutive.store(0, Ordering::Relaxed);
    }

    /// Count a failure; true when this one opens the breaker
    fn failed(&self, limit: Option<usize>) -> bool {
        let count = self.consecutive.fetch_add(1, Ordering::Relaxed) + 1;
        match limit {
            Some(limit) if count >= limit => !self.open.swap(true, Ordering::Relaxed),
            _ => false,
        }
    }
}

/// One document's use of an [`EnrichmentService`]
///
/// A service that fails `failure_limit` times in a row, timeouts included,
/// is not called again for the rest of the document; its remaining units
/// are counted as skipped. Shared across worker threads in parallel mode,
/// where calls already in flight when the limit is reached still finish.
#[derive(Debug)]
pub struct EnrichmentSession<'a> {
    service: &'a EnrichmentService,
    breakers: [Breaker; 4],
}

impl EnrichmentSession<'_> {
    /// Run every configured per-token service for one unit
    pub fn assess(&self, request: &AssessmentRequest) -> (TokenAssessment, EnrichmentStats) {
        let mut stats = EnrichmentStats::default();
        let mut assessment = TokenAssessment::default();
        let enrichers = &self.service.enrichers;

        if let Some(estimator) = &enrichers.difficulty {
            let estimator = Arc::clone(estimator);
            let (body, context) = (request.body.clone(), Arc::clone(&request.context));
            assessment.difficulty = self.call(ServiceKind::Difficulty, &mut stats, move || {
                estimator.assess(&body, &context)
            });
        }

        if let Some(lemmatizer) = &enrichers.lemmatizer {
            let lemmatizer = Arc::clone(lemmatizer);
            let body = request.body.clone();
            assessment.lemma = self
                .call(ServiceKind::Lemmatizer, &mut stats, move || {
                    lemmatizer.lemmatize(&body)
                })
                .filter(|lemma| !lemma.trim().is_empty());
        }

        if let Some(tagger) = &enrichers.pos_tagger {
            let tagger = Arc::clone(tagger);
            let (body, context) = (request.body.clone(), Arc::clone(&request.context));
            assessment.pos_tag = self.call(ServiceKind::PosTagger, &mut stats, move || {
                tagger.tag(&body, &context)
            });
        }

        (assessment, stats)
    }

    /// Explanation for a new vocabulary entry
    pub fn explain(&self, key: &str, context: &str, stats: &mut EnrichmentStats) -> Option<String> {
        let explainer = Arc::clone(self.service.enrichers.explainer.as_ref()?);
        let (key, context) = (key.to_string(), context.to_string());
        self.call(ServiceKind::Explainer, stats, move || {
            explainer.explain(&key, &context)
        })
    }

    /// Explanation of one usage of a vocabulary entry
    ///
    /// Not called at all when the explainer has no per-context explanations.
    pub fn explain_in_context(
        &self,
        key: &str,
        context: &str,
        stats: &mut EnrichmentStats,
    ) -> Option<String> {
        let explainer = self.service.enrichers.explainer.as_ref()?;
        if !explainer.explains_in_context() {
            return None;
        }
        let explainer = Arc::clone(explainer);
        let (key, context) = (key.to_string(), context.to_string());
        self.call(ServiceKind::Explainer, stats, move || {
            explainer.explain_in_context(&key, &context)
        })
    }

    fn call<T, F>(&self, kind: ServiceKind, stats: &mut EnrichmentStats, call: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce() -> EnrichmentResult<T> + Send + 'static,
    {
        let breaker = &self.breakers[kind as usize];
        if breaker.is_open() {
            stats.skipped += 1;
            return None;
        }

        let result = call_with_timeout(self.service.timeout, call);
        if result.is_ok() {
            breaker.succeeded();
        } else if breaker.failed(self.service.failure_limit) {
            log::warn!(
                "{} failed {} times in a row, not calling it again for this document",
                kind.name(),
                self.service.failure_limit.unwrap_or_default()
            );
        }
        stats.record(kind.name(), result)
    }
}

/// Always fails; stands in for a service that is configured but down
#[derive(Debug, Clone)]
pub struct UnavailableService {
    name: String,
}

impl UnavailableService {
    /// Create a stand-in for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn error(&self) -> EnrichmentError {
        EnrichmentError::Unavailable {
            service: self.name.clone(),
        }
    }
}

impl DifficultyEstimator for UnavailableService {
    fn assess(&self, _word: &str, _context: &str) -> EnrichmentResult<TokenDifficulty> {
        Err(self.error())
    }
}

impl Lemmatizer for UnavailableService {
    fn lemmatize(&self, _word: &str) -> EnrichmentResult<String> {
        Err(self.error())
    }
}

impl PosTagger for UnavailableService {
    fn tag(&self, _word: &str, _context: &str) -> EnrichmentResult<String> {
        Err(self.error())
    }
}

impl ExplanationGenerator for UnavailableService {
    fn explain(&self, _key: &str, _context: &str) -> EnrichmentResult<String> {
        Err(self.error())
    }
}
