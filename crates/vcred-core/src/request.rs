//! # Certificate Request Records
//!
//! The persisted `CertificateRequest` record and its lifecycle status.
//!
//! ## States
//!
//! ```text
//! Pending ──▶ Approved ──▶ Issued (terminal)
//!    │
//!    ▼
//! Deleted (terminal)
//! ```
//!
//! Status transitions are monotonic: a request never moves backwards
//! along PENDING → APPROVED → ISSUED, and DELETED is reachable only
//! from PENDING. `RequestStatus::can_advance_to()` is the single source
//! of truth; both store implementations consult it before persisting
//! a status change.
//!
//! Field names serialize in camelCase to match the document collection
//! schema (`studentName`, `registrationNumber`, ...), and statuses
//! serialize as the collection's string enum (`"PENDING"`, ...).

use serde::{Deserialize, Serialize};

use crate::identity::{Cid, RequestId};

/// Lifecycle status of a certificate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting institution decision (initial).
    Pending,
    /// Selected to drive an issuance flow; not yet persisted as such.
    Approved,
    /// Certificate metadata published and recorded (terminal).
    Issued,
    /// Removed before approval (terminal).
    Deleted,
}

impl RequestStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Issued | Self::Deleted)
    }

    /// Whether a transition from `self` to `next` respects the
    /// monotonic ordering.
    pub fn can_advance_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Deleted)
                | (Self::Approved, Self::Issued)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Issued => "ISSUED",
            Self::Deleted => "DELETED",
        };
        f.write_str(s)
    }
}

/// A persisted student credential request.
///
/// Submitted fields are immutable once stored; only `status` and
/// `final_cid` change, and only through the store's `update` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    /// Store-assigned record identifier.
    pub id: RequestId,
    /// Full name of the requesting student.
    pub student_name: String,
    /// Institution registration number of the student.
    pub registration_number: String,
    /// Course or program the certificate attests.
    pub course: String,
    /// Wallet address of the student (certificate recipient).
    pub wallet_address: String,
    /// Name of the institution the request was submitted to.
    pub institution_name: String,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// CID of the published metadata document, set exactly once at
    /// issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cid: Option<Cid>,
}

/// The insert shape of a request: everything except the store-assigned
/// id and the lifecycle fields. Stores set `status = Pending` and leave
/// `final_cid` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificateRequest {
    /// Full name of the requesting student.
    pub student_name: String,
    /// Institution registration number of the student.
    pub registration_number: String,
    /// Course or program the certificate attests.
    pub course: String,
    /// Wallet address of the student.
    pub wallet_address: String,
    /// Name of the institution the request is submitted to.
    pub institution_name: String,
}

impl NewCertificateRequest {
    /// Materialize a full record with a store-assigned id.
    pub fn into_record(self, id: RequestId) -> CertificateRequest {
        CertificateRequest {
            id,
            student_name: self.student_name,
            registration_number: self.registration_number,
            course: self.course,
            wallet_address: self.wallet_address,
            institution_name: self.institution_name,
            status: RequestStatus::Pending,
            final_cid: None,
        }
    }
}
