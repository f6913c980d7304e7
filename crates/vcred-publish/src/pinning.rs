//! # HTTP Pinning Publisher
//!
//! [`ContentPublisher`] backed by a pinning service's file-upload
//! endpoint. The blob is sent as one multipart form part; the service
//! responds with the CID of the pinned content.
//!
//! The JWT is injected through [`PinningConfig`] by the process owner and
//! lives only inside the client's default headers. A failed upload maps
//! to [`UploadError`] with the endpoint, status, and body preserved for
//! diagnosis; the client never retries on its own.

use std::time::Duration;

use serde::Deserialize;
use vcred_core::{ApiCredential, Cid};

use crate::error::UploadError;
use crate::publisher::ContentPublisher;

/// Default per-upload timeout in seconds. Uploads carry image payloads,
/// so this is longer than a typical JSON call timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the pinning client, supplied by the process owner.
/// The credential never appears in source.
#[derive(Debug, Clone)]
pub struct PinningConfig {
    /// Upload endpoint URL (the `pinFileToIPFS`-style route).
    pub api_url: String,
    /// Bearer JWT for the pinning service.
    pub jwt: ApiCredential,
    /// Per-upload timeout in seconds.
    pub timeout_secs: u64,
}

impl PinningConfig {
    /// Create a configuration with the default upload timeout.
    pub fn new(api_url: impl Into<String>, jwt: ApiCredential) -> Self {
        Self {
            api_url: api_url.into(),
            jwt,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Upload response shape. Pinata-style services report the CID as
/// `IpfsHash`; others use a lowercase `cid` key.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(alias = "IpfsHash")]
    cid: String,
}

/// HTTP client for a multipart pinning endpoint.
#[derive(Debug)]
pub struct HttpPinningPublisher {
    client: reqwest::Client,
    api_url: String,
}

impl HttpPinningPublisher {
    /// Build the client from injected configuration.
    pub fn new(config: PinningConfig) -> Result<Self, UploadError> {
        if config.jwt.is_empty() {
            return Err(UploadError::Config {
                reason: "pinning service credential is empty".into(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                let mut auth = reqwest::header::HeaderValue::from_str(&format!(
                    "Bearer {}",
                    config.jwt.expose()
                ))
                .map_err(|_| UploadError::Config {
                    reason: "invalid credential characters".into(),
                })?;
                auth.set_sensitive(true);
                headers.insert(reqwest::header::AUTHORIZATION, auth);
                headers
            })
            .build()
            .map_err(|e| UploadError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ContentPublisher for HttpPinningPublisher {
    async fn upload_blob(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Cid, UploadError> {
        let size = bytes.len();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| UploadError::Config {
                reason: format!("invalid content type {content_type}: {e}"),
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(&self.api_url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| UploadError::Transport {
                endpoint: self.api_url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                endpoint: self.api_url.clone(),
                status,
                body,
            });
        }

        let pinned: PinResponse =
            resp.json().await.map_err(|e| UploadError::Deserialization {
                endpoint: self.api_url.clone(),
                reason: e.to_string(),
            })?;
        let cid = Cid::new(pinned.cid).map_err(|e| UploadError::Deserialization {
            endpoint: self.api_url.clone(),
            reason: format!("service returned unusable CID: {e}"),
        })?;

        tracing::info!(cid = %cid, filename, size, "blob pinned");
        Ok(cid)
    }
}
