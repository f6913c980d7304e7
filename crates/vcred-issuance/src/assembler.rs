//! # Certificate Assembler
//!
//! Builds and publishes the certificate metadata document for an open
//! [`IssuanceSession`]: upload the image scan, validate the academic
//! entry, combine both with the request into the document, publish it.
//!
//! ## Invariants
//!
//! - Assembly embeds only an image CID the session itself recorded after
//!   a completed upload; there is no way to hand it an unverified CID.
//! - Validation collects every violation before reporting, so one fix
//!   round surfaces all problems.
//! - A failed publication leaves the session at the assembled stage;
//!   retrying publishes again without re-uploading the image.

use std::sync::Arc;

use vcred_core::{AcademicEntry, CertificateMetadataDocument, Cid, ValidationError};
use vcred_publish::ContentPublisher;

use crate::error::AssemblyError;
use crate::session::{IssuanceSession, IssuanceStage};

/// Filename the metadata document is published under.
const METADATA_FILENAME: &str = "certificate_data.json";

/// Assembles and publishes certificate metadata through the shared
/// publisher.
#[derive(Debug)]
pub struct CertificateAssembler<P: ContentPublisher> {
    publisher: Arc<P>,
}

impl<P: ContentPublisher> CertificateAssembler<P> {
    /// Wrap the shared publisher handle.
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }

    /// Check an academic entry without touching any session.
    ///
    /// Collects every field violation; returns `Ok` only when the entry
    /// is fully acceptable.
    pub fn validate(entry: &AcademicEntry) -> Result<(), ValidationError> {
        entry.validate()
    }

    /// Upload the certificate image and record its CID on the session.
    ///
    /// Allowed while the session is approved or already holds an image
    /// (re-upload replaces the recorded CID). Once the document is
    /// assembled the image is fixed and further uploads are rejected.
    pub async fn upload_image(
        &self,
        session: &mut IssuanceSession,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Cid, AssemblyError> {
        match session.stage() {
            IssuanceStage::Approved | IssuanceStage::ImageUploaded(_) => {}
            other => {
                return Err(AssemblyError::Sequence {
                    reason: format!(
                        "image upload is not allowed at stage {}",
                        other.name()
                    ),
                });
            }
        }
        let cid = self
            .publisher
            .upload_blob(bytes, filename, content_type)
            .await?;
        session.set_stage(IssuanceStage::ImageUploaded(cid.clone()));
        Ok(cid)
    }

    /// Validate the entry and build the metadata document.
    ///
    /// Requires the session's image upload to have completed; the image
    /// CID is read from the session, never supplied by the caller.
    /// Re-assembly with a corrected entry reuses the recorded image.
    pub fn assemble(
        &self,
        session: &mut IssuanceSession,
        entry: AcademicEntry,
    ) -> Result<(), AssemblyError> {
        entry.validate()?;
        let image_cid = session
            .image_cid()
            .cloned()
            .ok_or_else(|| AssemblyError::Sequence {
                reason: format!(
                    "certificate image not uploaded (session at stage {})",
                    session.stage().name()
                ),
            })?;
        let document = CertificateMetadataDocument::new(session.request(), &entry, image_cid);
        session.set_entry(entry);
        session.set_stage(IssuanceStage::Assembled(document));
        Ok(())
    }

    /// Publish the assembled metadata document and record the final CID.
    ///
    /// On failure the session stays assembled, so the caller can retry
    /// publication without repeating the image upload.
    pub async fn publish(&self, session: &mut IssuanceSession) -> Result<Cid, AssemblyError> {
        let bytes = match session.stage() {
            IssuanceStage::Assembled(doc) => {
                serde_json::to_vec(doc).map_err(|e| AssemblyError::Serialization {
                    reason: e.to_string(),
                })?
            }
            other => {
                return Err(AssemblyError::Sequence {
                    reason: format!(
                        "metadata document not assembled (session at stage {})",
                        other.name()
                    ),
                });
            }
        };

        let final_cid = self
            .publisher
            .upload_blob(bytes, METADATA_FILENAME, "application/json")
            .await?;
        session.set_stage(IssuanceStage::Published {
            final_cid: final_cid.clone(),
        });
        tracing::info!(id = %session.request().id, final_cid = %final_cid, "metadata published");
        Ok(final_cid)
    }
}
