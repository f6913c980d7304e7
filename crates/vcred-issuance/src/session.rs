//! # IssuanceSession — Per-Request Flow State
//!
//! Explicit state object for one certificate issuance. A session is
//! created only by [`RequestLifecycleController::approve`] and advanced
//! only by the assembler, so the stage a session reports is always the
//! stage its request has actually reached.
//!
//! ## Invariants
//!
//! - A session exists only for an APPROVED request.
//! - [`IssuanceStage::ImageUploaded`] holds a CID only after the upload
//!   that produced it completed; assembly reads the CID from the stage
//!   rather than trusting a caller-supplied value.
//! - Stages advance monotonically; every transition is timestamped in
//!   the session history.
//!
//! [`RequestLifecycleController::approve`]: crate::lifecycle::RequestLifecycleController::approve

use chrono::{DateTime, Utc};
use vcred_core::{AcademicEntry, CertificateMetadataDocument, CertificateRequest, Cid};

/// Where a session stands in the issuance flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuanceStage {
    /// The request is approved; no artifacts uploaded yet.
    Approved,
    /// The certificate image is pinned; its CID is recorded.
    ImageUploaded(Cid),
    /// The metadata document is built and ready to publish.
    Assembled(CertificateMetadataDocument),
    /// The metadata document is pinned; the request can be marked ISSUED.
    Published {
        /// CID of the published metadata document.
        final_cid: Cid,
    },
}

impl IssuanceStage {
    /// Short stage name for logs and history records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::ImageUploaded(_) => "image_uploaded",
            Self::Assembled(_) => "assembled",
            Self::Published { .. } => "published",
        }
    }
}

/// One timestamped stage transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    /// Stage entered.
    pub stage: &'static str,
    /// When it was entered.
    pub at: DateTime<Utc>,
}

/// State of one in-flight issuance.
///
/// Fields are crate-private; the assembler and lifecycle controller are
/// the only writers.
#[derive(Debug)]
pub struct IssuanceSession {
    request: CertificateRequest,
    entry: Option<AcademicEntry>,
    stage: IssuanceStage,
    history: Vec<StageRecord>,
}

impl IssuanceSession {
    pub(crate) fn new(request: CertificateRequest) -> Self {
        let mut session = Self {
            request,
            entry: None,
            stage: IssuanceStage::Approved,
            history: Vec::new(),
        };
        session.record_stage();
        session
    }

    /// The request this session is issuing.
    pub fn request(&self) -> &CertificateRequest {
        &self.request
    }

    /// Academic data, once assembly has accepted it.
    pub fn entry(&self) -> Option<&AcademicEntry> {
        self.entry.as_ref()
    }

    /// Current stage.
    pub fn stage(&self) -> &IssuanceStage {
        &self.stage
    }

    /// Timestamped transitions, oldest first.
    pub fn history(&self) -> &[StageRecord] {
        &self.history
    }

    /// CID of the uploaded certificate image, if the upload stage has
    /// been reached.
    pub fn image_cid(&self) -> Option<&Cid> {
        match &self.stage {
            IssuanceStage::ImageUploaded(cid) => Some(cid),
            IssuanceStage::Assembled(doc) => Some(&doc.certificate_image_cid),
            _ => None,
        }
    }

    /// The assembled metadata document, if assembly has completed and
    /// publication has not yet replaced the stage.
    pub fn document(&self) -> Option<&CertificateMetadataDocument> {
        match &self.stage {
            IssuanceStage::Assembled(doc) => Some(doc),
            _ => None,
        }
    }

    pub(crate) fn set_stage(&mut self, stage: IssuanceStage) {
        tracing::debug!(
            id = %self.request.id,
            from = self.stage.name(),
            to = stage.name(),
            "issuance stage advanced"
        );
        self.stage = stage;
        self.record_stage();
    }

    pub(crate) fn set_entry(&mut self, entry: AcademicEntry) {
        self.entry = Some(entry);
    }

    fn record_stage(&mut self) {
        self.history.push(StageRecord {
            stage: self.stage.name(),
            at: Utc::now(),
        });
    }
}
