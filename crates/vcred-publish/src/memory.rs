//! # In-Memory Publisher
//!
//! Reference [`ContentPublisher`] that derives the CID from the blob's
//! SHA-256 digest and keeps the bytes in a concurrent map. Identical
//! blobs map to the same CID, matching the dedup behavior of real
//! content-addressed networks.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use vcred_core::Cid;

use crate::error::UploadError;
use crate::publisher::ContentPublisher;

/// Content-addressed in-memory blob store for tests and local use.
#[derive(Debug, Default)]
pub struct InMemoryPublisher {
    blobs: DashMap<String, Vec<u8>>,
}

impl InMemoryPublisher {
    /// Create an empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored blob by CID, if present.
    pub fn blob(&self, cid: &Cid) -> Option<Vec<u8>> {
        self.blobs.get(cid.as_str()).map(|b| b.value().clone())
    }

    /// Number of distinct blobs stored.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    fn derive_cid(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let mut out = String::with_capacity(64);
        for byte in digest {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }
}

impl ContentPublisher for InMemoryPublisher {
    async fn upload_blob(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        _content_type: &str,
    ) -> Result<Cid, UploadError> {
        let key = Self::derive_cid(&bytes);
        let cid = Cid::new(key.clone()).map_err(|e| UploadError::Deserialization {
            endpoint: "memory".into(),
            reason: e.to_string(),
        })?;
        self.blobs.insert(key, bytes);
        tracing::debug!(cid = %cid, filename, "blob stored");
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_returns_retrievable_cid() {
        let publisher = InMemoryPublisher::new();
        let cid = publisher
            .upload_blob(b"degree scan".to_vec(), "scan.png", "image/png")
            .await
            .unwrap();
        assert_eq!(publisher.blob(&cid).unwrap(), b"degree scan");
    }

    #[tokio::test]
    async fn identical_blobs_share_a_cid() {
        let publisher = InMemoryPublisher::new();
        let a = publisher
            .upload_blob(b"same".to_vec(), "a.png", "image/png")
            .await
            .unwrap();
        let b = publisher
            .upload_blob(b"same".to_vec(), "b.png", "image/png")
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(publisher.len(), 1);
    }

    #[tokio::test]
    async fn distinct_blobs_get_distinct_cids() {
        let publisher = InMemoryPublisher::new();
        let a = publisher
            .upload_blob(b"one".to_vec(), "a", "application/octet-stream")
            .await
            .unwrap();
        let b = publisher
            .upload_blob(b"two".to_vec(), "b", "application/octet-stream")
            .await
            .unwrap();
        assert_ne!(a, b);
    }
}
