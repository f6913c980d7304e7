//! # HTTP Document-Collection Client
//!
//! [`RequestStore`] implementation over the document store's REST
//! surface. One client instance is constructed by the application root
//! from an injected [`DocumentStoreConfig`] and shared behind an `Arc`;
//! call sites never build their own clients or see the credential.
//!
//! ## REST Mapping
//!
//! - `list_all` — `GET  {base}/collections/{name}/documents`
//! - `get`      — `GET  {base}/collections/{name}/documents/{id}`
//! - `add`      — `POST {base}/collections/{name}/documents`
//! - `update`   — `PATCH  {base}/collections/{name}/documents/{id}`
//! - `delete`   — `DELETE {base}/collections/{name}/documents/{id}`
//!
//! ## Error Mapping
//!
//! Transport failures and 5xx map to [`StoreError::Read`] /
//! [`StoreError::Write`]; 404 maps to [`StoreError::NotFound`]; an
//! undecodable body maps to [`StoreError::Deserialization`]. No retries
//! are built in — retry policy belongs to the caller, and reads are
//! always safe to repeat.
//!
//! The collection offers no multi-record transaction, so the PENDING-only
//! delete policy is enforced with a read-then-delete pair; the window
//! between them is accepted (the only concurrent writer to one request is
//! its own issuance flow).

use std::time::Duration;

use vcred_core::{
    ApiCredential, CertificateRequest, NewCertificateRequest, RequestId, RequestStatus,
};

use crate::error::StoreError;
use crate::store::{check_patch, RequestPatch, RequestStore};

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the document-collection client, supplied by the
/// process owner. The credential never appears in source.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Base URL of the document store API.
    pub base_url: String,
    /// Bearer credential for the store.
    pub api_key: ApiCredential,
    /// Collection holding the request records
    /// (conventionally `certificateRequests`).
    pub collection: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl DocumentStoreConfig {
    /// Create a configuration for the `certificateRequests` collection
    /// with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: ApiCredential) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            collection: "certificateRequests".into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for the persisted request collection.
#[derive(Debug)]
pub struct HttpRequestStore {
    client: reqwest::Client,
    documents_url: String,
}

impl HttpRequestStore {
    /// Build the client from injected configuration.
    pub fn new(config: DocumentStoreConfig) -> Result<Self, StoreError> {
        if config.api_key.is_empty() {
            return Err(StoreError::Config {
                reason: "document store credential is empty".into(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                let mut auth = reqwest::header::HeaderValue::from_str(&format!(
                    "Bearer {}",
                    config.api_key.expose()
                ))
                .map_err(|_| StoreError::Config {
                    reason: "invalid credential characters".into(),
                })?;
                auth.set_sensitive(true);
                headers.insert(reqwest::header::AUTHORIZATION, auth);
                headers
            })
            .build()
            .map_err(|e| StoreError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let base = config.base_url.trim_end_matches('/');
        let documents_url = format!("{base}/collections/{}/documents", config.collection);
        Ok(Self {
            client,
            documents_url,
        })
    }

    fn document_url(&self, id: &RequestId) -> String {
        format!("{}/{}", self.documents_url, id)
    }

    /// Decode a record body, mapping failures to the store taxonomy.
    async fn decode_record(
        resp: reqwest::Response,
        endpoint: &str,
    ) -> Result<CertificateRequest, StoreError> {
        resp.json().await.map_err(|e| StoreError::Deserialization {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

impl RequestStore for HttpRequestStore {
    async fn list_all(&self) -> Result<Vec<CertificateRequest>, StoreError> {
        let url = &self.documents_url;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::Read {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Read {
                endpoint: url.clone(),
                reason: format!("HTTP {status}: {body}"),
            });
        }

        resp.json().await.map_err(|e| StoreError::Deserialization {
            endpoint: url.clone(),
            reason: e.to_string(),
        })
    }

    async fn get(&self, id: &RequestId) -> Result<CertificateRequest, StoreError> {
        let url = self.document_url(id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Read {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if resp.status().as_u16() == 404 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Read {
                endpoint: url,
                reason: format!("HTTP {status}: {body}"),
            });
        }

        Self::decode_record(resp, &url).await
    }

    async fn add(&self, new: NewCertificateRequest) -> Result<CertificateRequest, StoreError> {
        let url = &self.documents_url;
        let resp = self
            .client
            .post(url)
            .json(&new)
            .send()
            .await
            .map_err(|e| StoreError::Write {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Write {
                endpoint: url.clone(),
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let record = Self::decode_record(resp, url).await?;
        tracing::info!(id = %record.id, "request added to collection");
        Ok(record)
    }

    async fn delete(&self, id: &RequestId) -> Result<(), StoreError> {
        // Policy gate: DELETED is reachable only from PENDING.
        let current = self.get(id).await?;
        if current.status != RequestStatus::Pending {
            return Err(StoreError::DeleteRejected {
                id: id.to_string(),
                status: current.status,
            });
        }

        let url = self.document_url(id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| StoreError::Write {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if resp.status().as_u16() == 404 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Write {
                endpoint: url,
                reason: format!("HTTP {status}: {body}"),
            });
        }

        tracing::info!(id = %id, "request deleted from collection");
        Ok(())
    }

    async fn update(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<CertificateRequest, StoreError> {
        // Monotonicity gate against the current persisted state.
        let current = self.get(id).await?;
        check_patch(&current, &patch)?;

        let url = self.document_url(id);
        let resp = self
            .client
            .patch(&url)
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::Write {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        if resp.status().as_u16() == 404 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Write {
                endpoint: url,
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let record = Self::decode_record(resp, &url).await?;
        tracing::info!(id = %id, status = %record.status, "request updated in collection");
        Ok(record)
    }
}
