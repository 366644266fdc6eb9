//! Immutable snapshot of a single benchmark run.
//!
//! Every transition returns a fresh value; nothing here is shared or mutated
//! in place. The [`Controller`](crate::Controller) swaps whole snapshots
//! atomically, so any `RunState` a reader observes existed at some real
//! instant.

use std::time::{Duration, Instant};

/// Progress of one benchmark run: when it started, when (if ever) it
/// finished, how many units it targets and how many have completed.
#[derive(Debug, Clone, Copy)]
pub struct RunState {
    started_at: Instant,
    completed_at: Option<Instant>,
    total: u64,
    processed: u64,
}

impl RunState {
    /// Fresh state for a run targeting `total` units.
    ///
    /// The caller guarantees `total > 0`; the controller rejects zero targets
    /// before ever constructing a state.
    pub fn start(total: u64) -> Self {
        Self {
            started_at: Instant::now(),
            completed_at: None,
            total,
            processed: 0,
        }
    }

    /// Copy with one more processed unit, clamped at `total`.
    ///
    /// Clamping absorbs spurious completion signals arriving after the target
    /// was already reached.
    pub fn record(&self) -> Self {
        Self {
            processed: self.processed.saturating_add(1).min(self.total),
            ..*self
        }
    }

    /// Copy with the completion timestamp fixed, if it wasn't already.
    ///
    /// Finalizing a finalized state is a no-op copy, so the timestamp is set
    /// at most once no matter how many callers race here.
    pub fn finalize(&self) -> Self {
        if self.completed_at.is_some() {
            return *self;
        }
        Self {
            completed_at: Some(Instant::now()),
            ..*self
        }
    }

    /// Wall-clock time this run has been going: live while running, frozen at
    /// the completion timestamp once finalized.
    pub fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done - self.started_at,
            None => self.started_at.elapsed(),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.processed
    }

    /// All targeted units have completed.
    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }

    /// The completion timestamp has been fixed; the run is over.
    pub fn is_finalized(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn fresh_state_has_no_progress() {
        let state = RunState::start(10);
        assert_eq!(state.total(), 10);
        assert_eq!(state.processed(), 0);
        assert_eq!(state.remaining(), 10);
        assert!(!state.is_complete());
        assert!(!state.is_finalized());
    }

    #[test]
    fn record_counts_up_to_total() {
        let mut state = RunState::start(3);
        for expected in 1..=3 {
            state = state.record();
            assert_eq!(state.processed(), expected);
        }
        assert!(state.is_complete());
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn record_clamps_at_total() {
        let mut state = RunState::start(2);
        for _ in 0..5 {
            state = state.record();
        }
        assert_eq!(state.processed(), 2);
        assert!(state.is_complete());
    }

    #[test]
    fn complete_is_not_finalized() {
        let state = RunState::start(1).record();
        assert!(state.is_complete());
        assert!(!state.is_finalized());
    }

    #[test]
    fn finalize_fixes_the_timestamp_once() {
        let first = RunState::start(5).finalize();
        sleep(Duration::from_millis(5));
        let second = first.finalize();
        // the second finalize must not move the completion timestamp
        assert_eq!(first.elapsed(), second.elapsed());
    }

    #[test]
    fn elapsed_grows_while_running() {
        let state = RunState::start(5);
        let before = state.elapsed();
        sleep(Duration::from_millis(5));
        assert!(state.elapsed() >= before);
    }

    #[test]
    fn elapsed_is_frozen_after_finalize() {
        let state = RunState::start(5).finalize();
        let frozen = state.elapsed();
        sleep(Duration::from_millis(5));
        assert_eq!(state.elapsed(), frozen);
    }
}
