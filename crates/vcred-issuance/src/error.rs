//! Issuance flow error types.

use vcred_core::{RequestStatus, ValidationError};
use vcred_publish::UploadError;
use vcred_store::StoreError;

/// Errors from lifecycle transitions on persisted requests.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The request is not in the status the transition requires.
    #[error("request {id} is {from} and cannot move to {to}")]
    InvalidTransition {
        /// The request in question.
        id: String,
        /// Its current status.
        from: RequestStatus,
        /// The status the caller asked for.
        to: RequestStatus,
    },

    /// A step was invoked before the step it depends on completed.
    #[error("out-of-order issuance step: {reason}")]
    Sequence {
        /// Which precondition is missing.
        reason: String,
    },

    /// The underlying collection operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from metadata assembly and publication.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// The academic entry failed validation; all violations are listed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A step was invoked before the step it depends on completed.
    #[error("out-of-order assembly step: {reason}")]
    Sequence {
        /// Which precondition is missing.
        reason: String,
    },

    /// A blob upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The metadata document could not be serialized.
    #[error("failed to serialize metadata document: {reason}")]
    Serialization {
        /// Serializer-reported cause.
        reason: String,
    },
}
