//! # In-Memory Request Store
//!
//! Reference [`RequestStore`] implementation backed by a concurrent map.
//! Used by tests and local development; enforces exactly the same
//! policies as the HTTP client so a flow exercised against it behaves
//! identically against the real collection.

use dashmap::DashMap;
use uuid::Uuid;
use vcred_core::{CertificateRequest, NewCertificateRequest, RequestId, RequestStatus};

use crate::error::StoreError;
use crate::store::{check_patch, RequestPatch, RequestStore};

/// Concurrent in-memory request collection with UUID-assigned ids.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    records: DashMap<RequestId, CertificateRequest>,
}

impl InMemoryRequestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RequestStore for InMemoryRequestStore {
    async fn list_all(&self) -> Result<Vec<CertificateRequest>, StoreError> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }

    async fn get(&self, id: &RequestId) -> Result<CertificateRequest, StoreError> {
        self.records
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn add(&self, new: NewCertificateRequest) -> Result<CertificateRequest, StoreError> {
        let id = RequestId::new(Uuid::new_v4().to_string()).map_err(|e| StoreError::Write {
            endpoint: "add".into(),
            reason: e.to_string(),
        })?;
        let record = new.into_record(id.clone());
        self.records.insert(id, record.clone());
        tracing::debug!(id = %record.id, "request added");
        Ok(record)
    }

    async fn delete(&self, id: &RequestId) -> Result<(), StoreError> {
        // Entry-level remove_if keeps the status check and the removal
        // atomic with respect to concurrent updates.
        let mut rejected: Option<RequestStatus> = None;
        let removed = self.records.remove_if(id, |_, record| {
            if record.status == RequestStatus::Pending {
                true
            } else {
                rejected = Some(record.status);
                false
            }
        });
        match (removed, rejected) {
            (Some(_), _) => {
                tracing::debug!(id = %id, "request deleted");
                Ok(())
            }
            (None, Some(status)) => Err(StoreError::DeleteRejected {
                id: id.to_string(),
                status,
            }),
            (None, None) => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }

    async fn update(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<CertificateRequest, StoreError> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        check_patch(entry.value(), &patch)?;
        let record = entry.value_mut();
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(final_cid) = patch.final_cid {
            record.final_cid = Some(final_cid);
        }
        tracing::debug!(id = %id, status = %record.status, "request updated");
        Ok(record.clone())
    }
}
