use thiserror::Error;

/// Everything that can go wrong while driving a benchmark run.
///
/// Collaborator failures are surfaced as [`Error::Unavailable`] and propagate
/// to the caller unmodified; the controller never retries a collaborator call
/// and never mutates its state on a failed operation.
#[derive(Debug, Error)]
pub enum Error {
    /// `start` was called with a unit target of zero.
    #[error("benchmark target must be positive, got {total}")]
    InvalidTarget { total: u64 },

    /// A query or stop was issued before any run was ever started.
    #[error("no benchmark run has been started")]
    NotStarted,

    /// A collaborator (queue monitor or delivery control) could not be
    /// reached or returned malformed data.
    #[error("collaborator unavailable: {reason}")]
    Unavailable { reason: String },
}

impl Error {
    /// Shorthand for collaborator implementations reporting an outage.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Error::Unavailable {
            reason: reason.into(),
        }
    }
}
