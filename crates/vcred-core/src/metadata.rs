//! # Certificate Metadata Document
//!
//! The assembled record combining a request's submitted fields, the
//! institution-entered academic data, and the CID of the previously
//! published certificate image. Published as a single immutable blob;
//! its own CID becomes the request's `final_cid`.
//!
//! Construction happens exactly once, after the image CID exists. The
//! backing store is append-only, so a published document is never
//! mutated or deleted.

use serde::{Deserialize, Serialize};

use crate::academic::{AcademicEntry, SEMESTER_COUNT};
use crate::identity::Cid;
use crate::request::CertificateRequest;

/// The immutable certificate content, addressed by its own CID once
/// published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateMetadataDocument {
    /// Full name of the student, from the originating request.
    pub student_name: String,
    /// Registration number, from the originating request.
    pub registration_number: String,
    /// Course, from the originating request.
    pub course: String,
    /// Student wallet address, from the originating request.
    pub wallet_address: String,
    /// Institution name, from the originating request.
    pub institution_name: String,
    /// Wallet address of the issuing institution.
    pub institution_wallet_address: String,
    /// CGPA as the validated decimal string.
    pub cgpa: String,
    /// Marks for semesters 1-6.
    pub sem_marks: [i32; SEMESTER_COUNT],
    /// CID of the previously published certificate image blob.
    pub certificate_image_cid: Cid,
}

impl CertificateMetadataDocument {
    /// Combine a request, a validated academic entry, and the image CID.
    ///
    /// Pure combination — sequencing and validation are enforced by the
    /// assembler, which is the only production caller.
    pub fn new(request: &CertificateRequest, entry: &AcademicEntry, image_cid: Cid) -> Self {
        Self {
            student_name: request.student_name.clone(),
            registration_number: request.registration_number.clone(),
            course: request.course.clone(),
            wallet_address: request.wallet_address.clone(),
            institution_name: request.institution_name.clone(),
            institution_wallet_address: entry.institution_wallet_address.clone(),
            cgpa: entry.cgpa.clone(),
            sem_marks: entry.sem_marks,
            certificate_image_cid: image_cid,
        }
    }
}
