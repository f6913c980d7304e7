//! # vcred-core — Foundational Types for the Vericred Stack
//!
//! This crate is the bedrock of the vericred workspace. It defines the
//! domain primitives shared by the store, publisher, and issuance crates.
//! Every other crate in the workspace depends on `vcred-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `RequestId` and `Cid` are
//!    validated newtypes — no bare strings for identifiers, and a `Cid` is
//!    non-empty by construction.
//!
//! 2. **Monotonic request status.** `RequestStatus::can_advance_to()` is the
//!    single source of truth for the PENDING → APPROVED → ISSUED ordering;
//!    stores consult it before persisting any status change.
//!
//! 3. **No floats in published documents.** CGPA values are decimal strings
//!    validated to two-decimal fixed point. Published metadata bytes stay
//!    deterministic across languages and serializers.
//!
//! 4. **Secrets never in source.** `ApiCredential` wraps bearer tokens and
//!    API keys, zeroizes on drop, and redacts itself in `Debug` output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vcred-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod academic;
pub mod identity;
pub mod metadata;
pub mod request;
pub mod secret;

// Re-export primary types for ergonomic imports.
pub use academic::{AcademicEntry, FieldViolation, ValidationError, SEMESTER_COUNT};
pub use identity::{Cid, IdentityError, RequestId};
pub use metadata::CertificateMetadataDocument;
pub use request::{CertificateRequest, NewCertificateRequest, RequestStatus};
pub use secret::ApiCredential;
