//! Floodgauge — a throughput benchmark controller.
//!
//! Floodgauge drives a fixed-size workload through an external processing
//! pool and measures how fast it drains: elapsed wall-clock time, completion
//! rate and remaining work, live at any instant and frozen once the run
//! finishes. It grew out of measuring message-driven bean pools, where a
//! broker feeds a pool of workers and the interesting number is units per
//! second through the whole pipe.
//!
//! The crate is deliberately small: it owns the run's state machine and the
//! statistics arithmetic, nothing else. The pool that performs the work, the
//! queue that feeds it and the switch that starts delivery are collaborators
//! you inject (see [`pool`]).
//!
//! # Architecture
//!
//! - [`RunState`]: an immutable snapshot of one run's progress. All
//!   transitions are pure functions returning a new snapshot.
//! - [`Controller`]: holds the single atomically-swappable reference to the
//!   current snapshot and exposes `start` / `stop` / `record_completion` /
//!   `stats`. Every mutation is a compare-and-swap retry loop; the
//!   completion path never takes a lock.
//! - [`pool`]: the two collaborator traits ([`QueueMonitor`],
//!   [`DeliveryControl`]) plus in-memory built-ins for demos and tests.
//! - [`Stats`]: a serializable statistics snapshot, safe to poll and serve
//!   straight as JSON.
//! - [`report`]: the [`Reporter`] sink trait with a stdout built-in.
//!
//! # Guarantees
//!
//! - `stats()` always returns an internally consistent view: snapshots are
//!   swapped whole, so reads can't tear.
//! - The transition into "finished" happens exactly once per run, no matter
//!   how many completions observe the full count simultaneously; the final
//!   statistics line is emitted by exactly one caller.
//! - Completions arriving after a run was stopped are dropped.
//!
//! # Example
//!
//! ```rust
//! use floodgauge::{Controller, pool::{StaticQueue, SwitchDelivery}};
//!
//! let controller = Controller::builder()
//!     .queue(StaticQueue::new(120))
//!     .delivery(SwitchDelivery::new())
//!     .build();
//!
//! let backlog = controller.start(5)?;
//! assert_eq!(backlog, 120);
//!
//! // the processing pool reports each finished unit
//! for _ in 0..5 {
//!     controller.record_completion();
//! }
//!
//! let stats = controller.stats()?;
//! assert_eq!(stats.processed, 5);
//! assert_eq!(stats.remaining, 0);
//! # Ok::<(), floodgauge::Error>(())
//! ```
//!
//! # Feature flags
//!
//! - `builtins`: in-memory collaborators ([`StaticQueue`](pool::StaticQueue),
//!   [`SwitchDelivery`](pool::SwitchDelivery)) and the JSON
//!   [`StdoutReporter`](report::StdoutReporter). (Enabled by default)
//!
//! # Where to start
//!
//! Read [`Controller`] for the lifecycle and concurrency design, then
//! [`pool`] for what you need to implement against your own broker. See
//! `demos/inmemory.rs` for a runnable end-to-end example.

/// Lifecycle, statistics derivation and the lock-free completion path
pub mod controller;
/// The error taxonomy
pub mod error;
/// Collaborator seams for the external pool
pub mod pool;
/// Sinks for statistics snapshots
pub mod report;
/// Immutable run snapshots and their pure transitions
pub mod state;
/// The statistics snapshot itself
pub mod stats;

pub use controller::Controller;
pub use error::Error;
pub use pool::{DeliveryControl, QueueMonitor};
pub use report::Reporter;
pub use state::RunState;
pub use stats::Stats;
