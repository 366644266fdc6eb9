//! Controller — lifecycle and statistics for one benchmark run.
//!
//! The controller owns a single [`ArcSwapOption`] cell holding the current
//! [`RunState`] snapshot. Every mutation is a load–compute–compare-and-swap
//! retry loop over immutable snapshots; there is no lock anywhere on the
//! completion path.
//!
//! # High-level flow
//! 1. `start(total)` samples the backlog, installs a fresh snapshot and
//!    enables delivery to the external pool.
//! 2. The pool (or a listener attached to it) calls `record_completion()`
//!    once per finished unit, from as many threads as it likes.
//! 3. The completion that brings the count to `total` finalizes the run,
//!    logs the final statistics and halts delivery; no poller is involved.
//! 4. `stop()` can force the same transition early at any time.
//!
//! # Why snapshot swapping?
//! `stats()` must return an internally consistent view while thousands of
//! completions land per second. Swapping a whole immutable snapshot per
//! transition means a reader's single atomic load can never observe a torn
//! state: every value it sees existed at some real instant.
//!
//! # Exactly-once finalize
//! Many callers can observe `is_complete()` simultaneously; only the one
//! whose compare-and-swap flipped the completion timestamp from unset to set
//! acts on it (the final log line, the delivery halt). [`try_finalize`]
//! reports that distinction to its caller instead of just returning the
//! resulting snapshot, so everyone else sees a no-op and stays quiet.
//!
//! [`try_finalize`]: Controller::try_finalize

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use typed_builder::TypedBuilder;

use crate::error::Error;
use crate::pool::{DeliveryControl, QueueMonitor};
use crate::state::RunState;
use crate::stats::{self, Stats};

/// Drives a fixed-size workload through an external pool and measures how
/// fast it drains.
///
/// Holds exactly one logical run; a new [`start`](Controller::start) replaces
/// the previous run wholesale, whatever state it was in. Collaborators are
/// injected at build time and invoked synchronously.
#[derive(TypedBuilder)]
pub struct Controller<Q, D>
where
    Q: QueueMonitor,
    D: DeliveryControl,
{
    /// Source of backlog depth readings.
    queue: Q,
    /// Switch that starts and stops unit delivery to the pool.
    delivery: D,
    #[builder(default = ArcSwapOption::empty(), setter(skip))]
    state: ArcSwapOption<RunState>,
}

impl<Q, D> Controller<Q, D>
where
    Q: QueueMonitor,
    D: DeliveryControl,
{
    /// Begin a new run targeting `total` units.
    ///
    /// Samples the backlog, installs a fresh snapshot (silently discarding
    /// any prior run) and enables delivery. Returns the backlog depth
    /// observed at start, for the caller's logging.
    ///
    /// A collaborator failure propagates unmodified and leaves the previous
    /// run in place.
    pub fn start(&self, total: u64) -> Result<u64, Error> {
        if total == 0 {
            return Err(Error::InvalidTarget { total });
        }
        let backlog = self.queue.queue_depth()?;
        let previous = self.state.swap(Some(Arc::new(RunState::start(total))));
        if let Err(err) = self.delivery.set_delivery(true) {
            // Delivery never began, so no completions can have landed on the
            // fresh snapshot; restoring the previous run is safe.
            self.state.store(previous);
            return Err(err);
        }
        tracing::info!(total, backlog, "benchmark run started");
        Ok(backlog)
    }

    /// Force the current run to its terminal state.
    ///
    /// Finalizes the run if it wasn't already (fixing its elapsed time and
    /// emitting the final statistics exactly once), then halts delivery
    /// regardless of who performed the finalize. Safe to call repeatedly and
    /// from any thread.
    pub fn stop(&self) -> Result<(), Error> {
        if self.state.load().is_none() {
            return Err(Error::NotStarted);
        }
        if let Some(finished) = self.try_finalize() {
            self.log_final(&finished);
        }
        self.delivery.set_delivery(false)
    }

    /// Record one completed work unit. The hot path: lock-free, infallible,
    /// called concurrently by every pool worker.
    ///
    /// Ignored before the first `start()` and once the current run is
    /// finalized; late completions never resurrect a stopped run. The call
    /// that brings the count to the target finalizes the run, logs the final
    /// statistics and halts delivery.
    pub fn record_completion(&self) {
        let mut current = self.state.load();
        loop {
            let Some(state) = current.as_ref() else {
                return;
            };
            if state.is_finalized() {
                return;
            }
            let next = Arc::new(state.record());
            let replaced = self
                .state
                .compare_and_swap(&current, Some(Arc::clone(&next)));
            if same_snapshot(&replaced, &current) {
                if next.is_complete() {
                    self.auto_stop();
                }
                return;
            }
            // another completion raced ahead; recompute from its result
            current = replaced;
        }
    }

    /// Statistics for the current run, coherent at a single instant.
    ///
    /// One atomic snapshot load plus one backlog query; never blocks writers
    /// and is safe to poll at any frequency.
    pub fn stats(&self) -> Result<Stats, Error> {
        let guard = self.state.load();
        let state = guard.as_ref().ok_or(Error::NotStarted)?;
        let queue_depth = self.queue.queue_depth()?;
        Ok(Stats::capture(state, queue_depth))
    }

    /// Finalize on behalf of the completion that reached the target.
    ///
    /// Delivery failures are logged rather than propagated: the completion
    /// path has no error channel, and the run itself is already finished.
    fn auto_stop(&self) {
        let Some(finished) = self.try_finalize() else {
            return;
        };
        self.log_final(&finished);
        if let Err(err) = self.delivery.set_delivery(false) {
            tracing::warn!(error = %err, "failed to halt delivery after run completed");
        }
    }

    /// Fix the completion timestamp of the current run.
    ///
    /// Returns the finalized snapshot only if *this call* performed the
    /// transition; `None` means the run was already finalized (or never
    /// started) and the caller must not emit any once-only side effect.
    fn try_finalize(&self) -> Option<Arc<RunState>> {
        let mut current = self.state.load();
        loop {
            let state = current.as_ref()?;
            if state.is_finalized() {
                return None;
            }
            let next = Arc::new(state.finalize());
            let replaced = self
                .state
                .compare_and_swap(&current, Some(Arc::clone(&next)));
            if same_snapshot(&replaced, &current) {
                return Some(next);
            }
            current = replaced;
        }
    }

    fn log_final(&self, state: &RunState) {
        let elapsed = state.elapsed();
        tracing::info!(
            processed = state.processed(),
            remaining = state.remaining(),
            elapsed_ms = elapsed.as_millis() as u64,
            rate = stats::rate(state.processed(), elapsed),
            "benchmark run finished"
        );
    }
}

/// Pointer identity of two snapshot cells. The compare-and-swap succeeded
/// iff the replaced value is the one we computed from.
fn same_snapshot(a: &Option<Arc<RunState>>, b: &Option<Arc<RunState>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
