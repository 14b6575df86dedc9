//! Progress reporting for long-running retrieval sessions.
//!
//! Retrieval emits incremental counts as a side channel, decoupled from the
//! merge and pagination logic. Callers that don't care pass [`NoProgress`].

use std::sync::atomic::{AtomicUsize, Ordering};

use super::YearRange;

/// Observer for retrieval progress events.
pub trait Progress: Send + Sync {
    /// A retrieval session started with the given target size.
    fn begin(&self, _target: usize) {}

    /// A page merge added this many previously unseen records.
    fn records_merged(&self, _new_records: usize) {}

    /// A year partition is about to be fetched.
    fn partition_started(&self, _years: YearRange) {}

    /// The retrieval session completed.
    fn finish(&self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Observer that logs progress through `tracing`.
#[derive(Debug, Default)]
pub struct TracingProgress {
    target: AtomicUsize,
    fetched: AtomicUsize,
}

impl Progress for TracingProgress {
    fn begin(&self, target: usize) {
        self.target.store(target, Ordering::Relaxed);
        self.fetched.store(0, Ordering::Relaxed);
        tracing::info!(target_size = target, "starting retrieval");
    }

    fn records_merged(&self, new_records: usize) {
        let fetched = self.fetched.fetch_add(new_records, Ordering::Relaxed) + new_records;
        tracing::info!(
            fetched,
            target_size = self.target.load(Ordering::Relaxed),
            "request progress"
        );
    }

    fn partition_started(&self, years: YearRange) {
        tracing::info!(%years, "requesting year partition");
    }

    fn finish(&self) {
        tracing::info!(fetched = self.fetched.load(Ordering::Relaxed), "request complete");
    }
}
