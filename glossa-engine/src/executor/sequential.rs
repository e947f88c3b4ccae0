//! Sequential execution strategy

use crate::{
    enrichment::{AssessmentRequest, EnrichmentSession, EnrichmentStats, TokenAssessment},
    executor::{ExecutionMode, Executor},
};

/// Sequential single-threaded executor
#[derive(Debug, Clone)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn assess(
        &self,
        requests: &[AssessmentRequest],
        session: &EnrichmentSession<'_>,
    ) -> (Vec<TokenAssessment>, EnrichmentStats) {
        let mut stats = EnrichmentStats::default();
        let assessments = requests
            .iter()
            .map(|request| {
                let (assessment, call_stats) = session.assess(request);
                stats += call_stats;
                assessment
            })
            .collect();
        (assessments, stats)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}
