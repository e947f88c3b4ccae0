//! Per-call time limit for enrichment services

use crate::error::{EnrichmentError, EnrichmentResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run one enrichment call, bounded by `limit`
///
/// With a limit the call runs on a helper thread and the caller stops
/// waiting after `limit`; a late answer is discarded. Without a limit the
/// call runs inline. Panics are reported as [`EnrichmentError::Panicked`]
/// in both cases.
pub fn call_with_timeout<T, F>(limit: Option<Duration>, call: F) -> EnrichmentResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> EnrichmentResult<T> + Send + 'static,
{
    let Some(limit) = limit else {
        return catch_unwind(AssertUnwindSafe(call)).unwrap_or(Err(EnrichmentError::Panicked));
    };

    let (tx, rx) = mpsc::sync_channel(1);
    let spawned = thread::Builder::new()
        .name("glossa-enrichment".to_string())
        .spawn(move || {
            // The receiver may be gone after a timeout
            let _ = tx.send(call());
        });

    if let Err(err) = spawned {
        log::warn!("Could not spawn enrichment thread: {err}");
        return Err(EnrichmentError::service(err.to_string()));
    }

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(EnrichmentError::Timeout { after: limit }),
        // The sender is dropped without sending only when the call panicked
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EnrichmentError::Panicked),
    }
}
