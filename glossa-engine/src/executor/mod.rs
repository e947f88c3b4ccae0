//! Execution strategies for enrichment calls
//!
//! Executors only run the read-only assessment phase. Writing results back
//! and resolving vocabulary entries always happens afterwards, on one
//! thread, in document order.

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;
pub mod traits;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;
pub use traits::Executor;

use crate::config::EngineConfig;
use crate::error::Result;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One call at a time
    Sequential,
    /// Calls spread over a thread pool
    Parallel,
}

/// Build the executor for `config`
///
/// Without the `parallel` feature a parallel request falls back to the
/// sequential executor.
pub fn executor_for(config: &EngineConfig) -> Result<Box<dyn Executor>> {
    match config.execution_mode {
        ExecutionMode::Sequential => Ok(Box::new(SequentialExecutor)),
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => Ok(Box::new(ParallelExecutor::new(config.threads)?)),
        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Parallel => {
            log::warn!("Parallel execution not compiled in, running sequentially");
            Ok(Box::new(SequentialExecutor))
        }
    }
}
