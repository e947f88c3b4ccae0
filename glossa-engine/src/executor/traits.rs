//! Executor trait for pluggable execution strategies

use super::ExecutionMode;
use crate::enrichment::{AssessmentRequest, EnrichmentSession, EnrichmentStats, TokenAssessment};

/// Runs the assessment phase over a batch of units
pub trait Executor: Send + Sync {
    /// Assess every request
    ///
    /// The returned assessments are in request order, whatever order the
    /// calls actually ran in.
    fn assess(
        &self,
        requests: &[AssessmentRequest],
        session: &EnrichmentSession<'_>,
    ) -> (Vec<TokenAssessment>, EnrichmentStats);

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;

    /// Get a human-readable name for this executor
    fn name(&self) -> &'static str;
}
