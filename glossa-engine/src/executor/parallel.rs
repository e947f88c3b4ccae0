//! Parallel execution strategy

use crate::{
    enrichment::{AssessmentRequest, EnrichmentSession, EnrichmentStats, TokenAssessment},
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Parallel multi-threaded executor
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: ThreadPool,
}

impl ParallelExecutor {
    /// Create a new parallel executor with its own pool
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("glossa-worker-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| EngineError::ParallelError(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ParallelExecutor {
    fn assess(
        &self,
        requests: &[AssessmentRequest],
        session: &EnrichmentSession<'_>,
    ) -> (Vec<TokenAssessment>, EnrichmentStats) {
        // Indexed collect keeps request order
        let results: Vec<(TokenAssessment, EnrichmentStats)> = self
            .pool
            .install(|| requests.par_iter().map(|request| session.assess(request)).collect());

        let mut stats = EnrichmentStats::default();
        let assessments = results
            .into_iter()
            .map(|(assessment, call_stats)| {
                stats += call_stats;
                assessment
            })
            .collect();
        (assessments, stats)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}
