//! Content publisher error types.

/// Errors from blob upload operations.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// HTTP transport error before a response was received.
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        /// The upload endpoint that failed.
        endpoint: String,
        /// Transport-level cause.
        source: reqwest::Error,
    },

    /// The pinning service returned a non-2xx status.
    #[error("pinning service {endpoint} returned {status}: {body}")]
    Api {
        /// The upload endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnosis.
        body: String,
    },

    /// The service accepted the upload but its response did not contain
    /// a usable CID.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization {
        /// The endpoint whose response failed to decode.
        endpoint: String,
        /// Decoder-reported cause.
        reason: String,
    },

    /// The publisher was constructed from unusable configuration.
    #[error("publisher configuration error: {reason}")]
    Config {
        /// Why the configuration is unusable.
        reason: String,
    },
}
