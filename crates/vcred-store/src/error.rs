//! Request store error types.

use vcred_core::RequestStatus;

/// Errors from request collection operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read against the collection failed at the transport.
    #[error("store read failed at {endpoint}: {reason}")]
    Read {
        /// The operation or URL that failed.
        endpoint: String,
        /// Transport-reported cause.
        reason: String,
    },

    /// A mutation against the collection failed or was rejected.
    #[error("store write failed at {endpoint}: {reason}")]
    Write {
        /// The operation or URL that failed.
        endpoint: String,
        /// Transport-reported or policy cause.
        reason: String,
    },

    /// No record matches the given identifier.
    #[error("request {id} not found")]
    NotFound {
        /// The identifier that did not match any record.
        id: String,
    },

    /// Delete was requested for a record that is no longer PENDING.
    ///
    /// ISSUED and APPROVED records are not deletable; the DELETED state
    /// is reachable only from PENDING.
    #[error("request {id} is {status} and cannot be deleted")]
    DeleteRejected {
        /// The record the caller tried to delete.
        id: String,
        /// Its current status.
        status: RequestStatus,
    },

    /// The collection returned a body that does not match the record
    /// schema.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization {
        /// The URL whose response failed to decode.
        endpoint: String,
        /// Decoder-reported cause.
        reason: String,
    },

    /// The store client was constructed from unusable configuration.
    #[error("store configuration error: {reason}")]
    Config {
        /// Why the configuration is unusable.
        reason: String,
    },
}
