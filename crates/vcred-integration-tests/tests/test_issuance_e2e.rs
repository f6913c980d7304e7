//! # Issuance End-to-End Integration Tests
//!
//! Full flow against the in-memory store and publisher:
//!
//! 1. Submit a request; it is persisted as PENDING
//! 2. Approve it; an issuance session opens
//! 3. Upload the certificate image; the session records its CID
//! 4. Assemble the metadata document; it embeds exactly that image CID
//! 5. Publish the document; the final CID differs from the image CID
//! 6. Confirm issuance; the record is ISSUED with the final CID
//! 7. Adversarial: out-of-order steps rejected, delete after issue rejected
//! 8. Recovery: a failed publication retries without re-uploading the image

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use vcred_core::{AcademicEntry, Cid, NewCertificateRequest, RequestStatus};
use vcred_issuance::{
    AssemblyError, CertificateAssembler, LifecycleError, RequestLifecycleController,
};
use vcred_publish::{ContentPublisher, InMemoryPublisher, UploadError};
use vcred_store::{InMemoryRequestStore, StoreError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn alice() -> NewCertificateRequest {
    NewCertificateRequest {
        student_name: "Alice".into(),
        registration_number: "R100".into(),
        course: "CS".into(),
        wallet_address: "0xA".into(),
        institution_name: "Tech U".into(),
    }
}

fn entry() -> AcademicEntry {
    AcademicEntry {
        institution_wallet_address: "0xINST".into(),
        cgpa: "9.12".into(),
        sem_marks: [78, 82, 90, 85, 88, 91],
    }
}

#[tokio::test]
async fn full_issuance_flow() {
    init_tracing();
    let store = Arc::new(InMemoryRequestStore::new());
    let publisher = Arc::new(InMemoryPublisher::new());
    let lifecycle = RequestLifecycleController::new(Arc::clone(&store));
    let assembler = CertificateAssembler::new(Arc::clone(&publisher));

    // Submit and approve.
    let record = lifecycle.submit(alice()).await.unwrap();
    assert_eq!(record.status, RequestStatus::Pending);
    let mut session = lifecycle.approve(&record.id).await.unwrap();

    // Upload the scan; the session records the CID.
    let image_cid = assembler
        .upload_image(&mut session, b"degree scan".to_vec(), "scan.png", "image/png")
        .await
        .unwrap();
    assert_eq!(session.image_cid(), Some(&image_cid));

    // Assemble; the document embeds exactly the uploaded image CID.
    assembler.assemble(&mut session, entry()).unwrap();
    let doc = session.document().unwrap();
    assert_eq!(doc.certificate_image_cid, image_cid);
    assert_eq!(doc.student_name, "Alice");
    assert_eq!(doc.registration_number, "R100");
    assert_eq!(doc.institution_wallet_address, "0xINST");

    // Publish; the metadata CID addresses different content than the image.
    let final_cid = assembler.publish(&mut session).await.unwrap();
    assert_ne!(final_cid, image_cid);

    // Confirm; the persisted record is ISSUED with the final CID.
    let issued = lifecycle.confirm_issued(session).await.unwrap();
    assert_eq!(issued.status, RequestStatus::Issued);
    assert_eq!(issued.final_cid, Some(final_cid.clone()));

    let persisted = lifecycle.get(&record.id).await.unwrap();
    assert_eq!(persisted.status, RequestStatus::Issued);
    assert_eq!(persisted.final_cid, Some(final_cid.clone()));

    // The published blob decodes back to the document contents.
    let bytes = publisher.blob(&final_cid).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["studentName"], "Alice");
    assert_eq!(json["walletAddress"], "0xA");
    assert_eq!(json["certificateImageCid"], image_cid.as_str());
    assert_eq!(json["semMarks"], serde_json::json!([78, 82, 90, 85, 88, 91]));
}

#[tokio::test]
async fn assemble_before_upload_is_rejected() {
    let store = Arc::new(InMemoryRequestStore::new());
    let lifecycle = RequestLifecycleController::new(Arc::clone(&store));
    let assembler = CertificateAssembler::new(Arc::new(InMemoryPublisher::new()));

    let record = lifecycle.submit(alice()).await.unwrap();
    let mut session = lifecycle.approve(&record.id).await.unwrap();

    let err = assembler.assemble(&mut session, entry()).unwrap_err();
    assert!(matches!(err, AssemblyError::Sequence { .. }));
}

#[tokio::test]
async fn confirm_before_publish_is_rejected_and_persists_nothing() {
    let store = Arc::new(InMemoryRequestStore::new());
    let lifecycle = RequestLifecycleController::new(Arc::clone(&store));
    let assembler = CertificateAssembler::new(Arc::new(InMemoryPublisher::new()));

    let record = lifecycle.submit(alice()).await.unwrap();
    let mut session = lifecycle.approve(&record.id).await.unwrap();
    assembler
        .upload_image(&mut session, b"scan".to_vec(), "scan.png", "image/png")
        .await
        .unwrap();
    assembler.assemble(&mut session, entry()).unwrap();

    let err = lifecycle.confirm_issued(session).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Sequence { .. }));

    let persisted = lifecycle.get(&record.id).await.unwrap();
    assert_eq!(persisted.status, RequestStatus::Approved);
    assert!(persisted.final_cid.is_none());
}

#[tokio::test]
async fn delete_after_issue_is_rejected() {
    let store = Arc::new(InMemoryRequestStore::new());
    let publisher = Arc::new(InMemoryPublisher::new());
    let lifecycle = RequestLifecycleController::new(Arc::clone(&store));
    let assembler = CertificateAssembler::new(Arc::clone(&publisher));

    let record = lifecycle.submit(alice()).await.unwrap();
    let mut session = lifecycle.approve(&record.id).await.unwrap();
    assembler
        .upload_image(&mut session, b"scan".to_vec(), "scan.png", "image/png")
        .await
        .unwrap();
    assembler.assemble(&mut session, entry()).unwrap();
    assembler.publish(&mut session).await.unwrap();
    lifecycle.confirm_issued(session).await.unwrap();

    let err = lifecycle.delete(&record.id).await.unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Store(StoreError::DeleteRejected {
            status: RequestStatus::Issued,
            ..
        })
    ));
    assert_eq!(lifecycle.list().await.unwrap().len(), 1);
}

/// Publisher whose first upload fails; used to prove publication retries
/// do not repeat the image upload.
struct FlakyPublisher {
    inner: InMemoryPublisher,
    failed_once: AtomicBool,
}

impl FlakyPublisher {
    fn new() -> Self {
        Self {
            inner: InMemoryPublisher::new(),
            failed_once: AtomicBool::new(false),
        }
    }
}

impl ContentPublisher for FlakyPublisher {
    async fn upload_blob(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<Cid, UploadError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(UploadError::Api {
                endpoint: "flaky".into(),
                status: 503,
                body: "temporarily unavailable".into(),
            });
        }
        self.inner.upload_blob(bytes, filename, content_type).await
    }
}

#[tokio::test]
async fn failed_publication_retries_without_reupload() {
    let store = Arc::new(InMemoryRequestStore::new());
    let lifecycle = RequestLifecycleController::new(Arc::clone(&store));

    let record = lifecycle.submit(alice()).await.unwrap();
    let mut session = lifecycle.approve(&record.id).await.unwrap();

    // Image upload succeeds against a reliable publisher.
    let image_assembler = CertificateAssembler::new(Arc::new(InMemoryPublisher::new()));
    let image_cid = image_assembler
        .upload_image(&mut session, b"scan".to_vec(), "scan.png", "image/png")
        .await
        .unwrap();
    image_assembler.assemble(&mut session, entry()).unwrap();

    // First publication fails; the session stays assembled.
    let flaky = CertificateAssembler::new(Arc::new(FlakyPublisher::new()));
    let err = flaky.publish(&mut session).await.unwrap_err();
    assert!(matches!(err, AssemblyError::Upload(_)));
    assert!(session.document().is_some());
    assert_eq!(session.image_cid(), Some(&image_cid));

    // Retry publishes without touching the image again.
    let final_cid = flaky.publish(&mut session).await.unwrap();
    let issued = lifecycle.confirm_issued(session).await.unwrap();
    assert_eq!(issued.final_cid, Some(final_cid));
}

#[tokio::test]
async fn independent_requests_issue_concurrently() {
    let store = Arc::new(InMemoryRequestStore::new());
    let publisher = Arc::new(InMemoryPublisher::new());
    let lifecycle = Arc::new(RequestLifecycleController::new(Arc::clone(&store)));
    let assembler = Arc::new(CertificateAssembler::new(Arc::clone(&publisher)));

    let mut handles = Vec::new();
    for i in 0..4 {
        let lifecycle = Arc::clone(&lifecycle);
        let assembler = Arc::clone(&assembler);
        handles.push(tokio::spawn(async move {
            let record = lifecycle
                .submit(NewCertificateRequest {
                    student_name: format!("Student {i}"),
                    registration_number: format!("R10{i}"),
                    course: "CS".into(),
                    wallet_address: format!("0x{i}"),
                    institution_name: "Tech U".into(),
                })
                .await
                .unwrap();
            let mut session = lifecycle.approve(&record.id).await.unwrap();
            assembler
                .upload_image(
                    &mut session,
                    format!("scan {i}").into_bytes(),
                    "scan.png",
                    "image/png",
                )
                .await
                .unwrap();
            assembler.assemble(&mut session, entry()).unwrap();
            assembler.publish(&mut session).await.unwrap();
            lifecycle.confirm_issued(session).await.unwrap()
        }));
    }

    for handle in handles {
        let issued = handle.await.unwrap();
        assert_eq!(issued.status, RequestStatus::Issued);
        assert!(issued.final_cid.is_some());
    }
    assert_eq!(store.len(), 4);
}
