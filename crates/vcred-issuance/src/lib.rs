//! # vcred-issuance — Certificate Issuance Flow
//!
//! Orchestration of one certificate's journey from submitted request to
//! published credential.
//!
//! ## Architecture
//!
//! [`RequestLifecycleController`] owns the persisted status transitions
//! (PENDING → APPROVED → ISSUED, DELETED only from PENDING) and is the
//! sole source of [`IssuanceSession`] values. [`CertificateAssembler`]
//! advances a session through image upload, validation, document
//! assembly, and publication. Both hold shared `Arc` handles to the one
//! store and one publisher the application root constructed.
//!
//! ## Invariants
//!
//! - ISSUED is persisted only after the metadata document is published;
//!   the session's stage carries the proof.
//! - Assembly embeds only an image CID recorded by a completed upload.
//! - Validation reports every field violation at once.

pub mod assembler;
pub mod error;
pub mod lifecycle;
pub mod session;

pub use assembler::CertificateAssembler;
pub use error::{AssemblyError, LifecycleError};
pub use lifecycle::RequestLifecycleController;
pub use session::{IssuanceSession, IssuanceStage, StageRecord};
