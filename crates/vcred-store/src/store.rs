//! # RequestStore — Collection Access Trait
//!
//! The seam between the issuance flow and the persisted
//! `certificateRequests` collection. Implementations must be
//! `Send + Sync` so a single instance owned by the application root can
//! be shared across concurrent flows behind an `Arc`.
//!
//! Operations are `async fn`s: every one of them is a suspending
//! transport call, and independent flows must not block each other while
//! one is in flight. Call seams are generic over the implementation
//! (`InMemoryRequestStore` for tests, `HttpRequestStore` in production).

use serde::{Deserialize, Serialize};
use vcred_core::{CertificateRequest, Cid, NewCertificateRequest, RequestId, RequestStatus};

use crate::error::StoreError;

/// A partial update to a persisted request record.
///
/// Only `status` and `finalCid` are mutable; the submitted fields are
/// immutable once stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPatch {
    /// New lifecycle status, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
    /// Final metadata document CID, set exactly once at issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cid: Option<Cid>,
}

impl RequestPatch {
    /// A patch that only changes the status.
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            final_cid: None,
        }
    }

    /// The issuance patch: status plus the published document CID.
    pub fn issued(final_cid: Cid) -> Self {
        Self {
            status: Some(RequestStatus::Issued),
            final_cid: Some(final_cid),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.final_cid.is_none()
    }
}

/// Access to the persisted certificate request collection.
///
/// ## Policies every implementation enforces
///
/// - `add` assigns the record id and sets status PENDING.
/// - `update` rejects status changes that violate the monotonic
///   PENDING → APPROVED → ISSUED ordering with [`StoreError::Write`].
///   A patch restating the record's current status is accepted as a
///   no-op (it moves nothing backwards); callers that must forbid
///   re-application, like `approve`, check the current status first.
/// - `delete` is accepted only while the record is PENDING
///   ([`StoreError::DeleteRejected`] otherwise); DELETED is reachable
///   only from PENDING.
///
/// No operation retries implicitly. `list_all` and `get` are idempotent
/// reads and always safe to retry; mutation retry policy belongs to the
/// caller.
#[allow(async_fn_in_trait)]
pub trait RequestStore: Send + Sync {
    /// Return all requests in the collection. No ordering contract.
    async fn list_all(&self) -> Result<Vec<CertificateRequest>, StoreError>;

    /// Fetch one record by id.
    async fn get(&self, id: &RequestId) -> Result<CertificateRequest, StoreError>;

    /// Insert a new request; the store assigns the id and sets PENDING.
    async fn add(&self, new: NewCertificateRequest) -> Result<CertificateRequest, StoreError>;

    /// Remove exactly the record matching `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if absent and
    /// [`StoreError::DeleteRejected`] if the record is not PENDING.
    /// Callers must refresh their local view afterwards.
    async fn delete(&self, id: &RequestId) -> Result<(), StoreError>;

    /// Apply a partial update and return the updated record.
    async fn update(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<CertificateRequest, StoreError>;
}

/// Shared monotonicity check used by both implementations before
/// persisting a patch.
pub(crate) fn check_patch(
    current: &CertificateRequest,
    patch: &RequestPatch,
) -> Result<(), StoreError> {
    if let Some(next) = patch.status {
        if next != current.status && !current.status.can_advance_to(next) {
            return Err(StoreError::Write {
                endpoint: format!("update {}", current.id),
                reason: format!("status may not move {} -> {next}", current.status),
            });
        }
    }
    if patch.final_cid.is_some() && current.final_cid.is_some() {
        return Err(StoreError::Write {
            endpoint: format!("update {}", current.id),
            reason: "finalCid is set exactly once".into(),
        });
    }
    Ok(())
}
