//! # Request Lifecycle Controller
//!
//! Drives persisted status transitions for certificate requests:
//! PENDING → APPROVED → ISSUED, with DELETED reachable only from
//! PENDING. The controller owns the shared store handle; it is the only
//! component that writes status changes, and it is the only source of
//! [`IssuanceSession`] values.
//!
//! ## Invariants
//!
//! - `approve` succeeds only for a PENDING request and yields the
//!   session the assembler works on.
//! - `confirm_issued` accepts only a session whose metadata document is
//!   already published, so ISSUED is never persisted ahead of the
//!   artifact it refers to.

use std::sync::Arc;

use vcred_core::{CertificateRequest, NewCertificateRequest, RequestId, RequestStatus};
use vcred_store::{RequestPatch, RequestStore};

use crate::error::LifecycleError;
use crate::session::{IssuanceSession, IssuanceStage};

/// Lifecycle operations over the shared request store.
#[derive(Debug)]
pub struct RequestLifecycleController<S: RequestStore> {
    store: Arc<S>,
}

impl<S: RequestStore> RequestLifecycleController<S> {
    /// Wrap the shared store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Submit a new request; it is persisted as PENDING with a
    /// store-assigned id.
    pub async fn submit(
        &self,
        new: NewCertificateRequest,
    ) -> Result<CertificateRequest, LifecycleError> {
        let record = self.store.add(new).await?;
        tracing::info!(id = %record.id, student = %record.student_name, "request submitted");
        Ok(record)
    }

    /// All requests currently in the collection.
    pub async fn list(&self) -> Result<Vec<CertificateRequest>, LifecycleError> {
        Ok(self.store.list_all().await?)
    }

    /// Fetch one request by id.
    pub async fn get(&self, id: &RequestId) -> Result<CertificateRequest, LifecycleError> {
        Ok(self.store.get(id).await?)
    }

    /// Approve a PENDING request and open an issuance session for it.
    pub async fn approve(&self, id: &RequestId) -> Result<IssuanceSession, LifecycleError> {
        let current = self.store.get(id).await?;
        if current.status != RequestStatus::Pending {
            return Err(LifecycleError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                to: RequestStatus::Approved,
            });
        }
        let approved = self
            .store
            .update(id, RequestPatch::status(RequestStatus::Approved))
            .await?;
        tracing::info!(id = %id, "request approved");
        Ok(IssuanceSession::new(approved))
    }

    /// Persist ISSUED and the published document CID for a completed
    /// session, consuming it.
    ///
    /// Fails with [`LifecycleError::Sequence`] unless the session's
    /// metadata document has been published.
    pub async fn confirm_issued(
        &self,
        session: IssuanceSession,
    ) -> Result<CertificateRequest, LifecycleError> {
        let final_cid = match session.stage() {
            IssuanceStage::Published { final_cid } => final_cid.clone(),
            other => {
                return Err(LifecycleError::Sequence {
                    reason: format!(
                        "request {} is at stage {}, metadata document not yet published",
                        session.request().id,
                        other.name()
                    ),
                });
            }
        };
        let id = session.request().id.clone();
        let record = self.store.update(&id, RequestPatch::issued(final_cid)).await?;
        tracing::info!(id = %id, final_cid = ?record.final_cid, "request issued");
        Ok(record)
    }

    /// Delete a request. The store accepts this only while the record
    /// is PENDING.
    pub async fn delete(&self, id: &RequestId) -> Result<(), LifecycleError> {
        self.store.delete(id).await?;
        tracing::info!(id = %id, "request deleted");
        Ok(())
    }
}
