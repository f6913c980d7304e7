//! # ContentPublisher — Blob Upload Trait
//!
//! The seam between the issuance flow and the content-addressed network.
//! Implementations must be `Send + Sync`; a single publisher is owned by
//! the application root and shared behind an `Arc`.
//!
//! Uploads suspend for the duration of the network call. A failed upload
//! surfaces as [`UploadError`] and has no partial effect the caller must
//! undo; callers decide whether and when to retry.

use vcred_core::Cid;

use crate::error::UploadError;

/// Upload opaque blobs to a content-addressed store.
///
/// On success the returned [`Cid`] addresses exactly the uploaded bytes.
/// Uploading the same bytes twice may yield the same CID (the address is
/// derived from content); callers must not treat a repeated CID as an
/// error. No implementation retries implicitly.
#[allow(async_fn_in_trait)]
pub trait ContentPublisher: Send + Sync {
    /// Upload a blob and return its content identifier.
    async fn upload_blob(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Cid, UploadError>;
}
