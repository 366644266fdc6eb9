//! Point-in-time statistics for a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::RunState;

/// A coherent statistics snapshot derived from a single [`RunState`] load.
///
/// Cheap to produce and serializable, so a control surface can poll it as
/// often as it likes and serve it straight as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Time the run has been going; frozen once the run is finalized.
    pub elapsed: Duration,
    /// Units completed so far.
    pub processed: u64,
    /// Units still outstanding against the target.
    pub remaining: u64,
    /// Backlog depth reported by the queue monitor at query time.
    pub queue_depth: u64,
    /// Units per second, at whole-second resolution. A run shorter than one
    /// second reports `0.0` rather than a division error.
    pub rate: f64,
}

impl Stats {
    pub(crate) fn capture(state: &RunState, queue_depth: u64) -> Self {
        let elapsed = state.elapsed();
        Self {
            elapsed,
            processed: state.processed(),
            remaining: state.remaining(),
            queue_depth,
            rate: rate(state.processed(), elapsed),
        }
    }

    pub fn elapsed_nanos(&self) -> u128 {
        self.elapsed.as_nanos()
    }
}

/// Processed units per elapsed second, `0.0` when less than a full second has
/// passed.
pub(crate) fn rate(processed: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs();
    if secs == 0 {
        0.0
    } else {
        processed as f64 / secs as f64
    }
}
