//! Error types for intake session operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while driving an intake session.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The session already reached its terminal state.
    #[error("session already submitted")]
    AlreadySubmitted,

    /// A submission is still in flight; the triggering control should have
    /// been disabled.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The persistence write failed; the record is preserved for resubmit.
    #[error("failed to save order: {0}")]
    Store(#[from] StoreError),
}
