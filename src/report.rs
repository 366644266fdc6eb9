//! Reporters consume [`Stats`] snapshots and send them somewhere: stdout, a
//! file, a metrics pipeline. The controller itself only logs; anything
//! fancier lives behind this trait so the control surface can pick its sink.

use async_trait::async_trait;

use crate::stats::Stats;

#[async_trait]
pub trait Reporter {
    async fn report(&self, stats: Stats) -> Result<(), Box<dyn std::error::Error>>;
}

#[cfg(feature = "builtins")]
pub use builtins::*;

#[cfg(feature = "builtins")]
mod builtins {
    use super::*;

    /// Prints each snapshot as one line of JSON.
    pub struct StdoutReporter;

    #[async_trait]
    impl Reporter for StdoutReporter {
        async fn report(&self, stats: Stats) -> Result<(), Box<dyn std::error::Error>> {
            let line = serde_json::to_string(&stats)?;
            println!("{line}");
            Ok(())
        }
    }
}
