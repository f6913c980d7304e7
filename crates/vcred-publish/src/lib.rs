//! # vcred-publish — Content-Addressed Blob Publishing
//!
//! Upload of certificate artifacts (image scans and metadata documents)
//! to a content-addressed network through a pinning service.
//!
//! ## Architecture
//!
//! The [`ContentPublisher`] trait abstracts over the upload transport.
//! Production deployments use [`HttpPinningPublisher`] against a
//! multipart pinning endpoint; tests and local development use
//! [`InMemoryPublisher`], which derives CIDs from SHA-256 digests and so
//! reproduces the dedup behavior of the real network.
//!
//! ## Error Handling
//!
//! Failed uploads surface as [`UploadError`] with the endpoint and, for
//! API rejections, the status and body preserved. Nothing retries
//! implicitly; retry is a caller decision.

pub mod error;
pub mod memory;
pub mod pinning;
pub mod publisher;

pub use error::UploadError;
pub use memory::InMemoryPublisher;
pub use pinning::{HttpPinningPublisher, PinningConfig};
pub use publisher::ContentPublisher;
