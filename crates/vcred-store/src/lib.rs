//! # vcred-store — Certificate Request Persistence
//!
//! Access to the persisted `certificateRequests` document collection.
//!
//! ## Architecture
//!
//! The [`RequestStore`] trait abstracts over the collection's transport.
//! Production deployments use [`HttpRequestStore`] against the document
//! store's REST surface; tests and local development use
//! [`InMemoryRequestStore`]. Both enforce the same policies:
//!
//! - status changes are monotonic (PENDING → APPROVED → ISSUED),
//! - delete is accepted only while a record is PENDING.
//!
//! ## Error Handling
//!
//! Every operation returns a structured [`StoreError`]; nothing is
//! swallowed and nothing retries implicitly. `list_all` is an idempotent
//! read and is always safe for callers to retry.

pub mod error;
pub mod http;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use http::{DocumentStoreConfig, HttpRequestStore};
pub use memory::InMemoryRequestStore;
pub use store::{RequestPatch, RequestStore};
