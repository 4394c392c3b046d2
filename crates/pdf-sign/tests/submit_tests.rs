mod common;

use common::*;
use pdf_sign::*;
use std::sync::Mutex;

/// Upload service that remembers what it was sent
#[derive(Default)]
struct RecordingService {
    requests: Mutex<Vec<SubmissionRequest>>,
    response: Option<Vec<u8>>,
}

impl UploadService for RecordingService {
    async fn submit(&self, request: &SubmissionRequest) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(submission_error_from_body(
                br#"{"detail": "Page number out of range"}"#,
            )),
        }
    }
}

fn placement(page: usize) -> Placement {
    Placement {
        page,
        x: 0.1,
        y: 0.8,
        width: 0.35,
        height: 0.1,
    }
}

#[test]
fn test_validate_accepts_well_formed_request() {
    let request = SubmissionRequest {
        document: b"%PDF".to_vec(),
        signature: Some(vec![1, 2, 3]),
        placements: vec![placement(0), placement(2)],
        filter: FilterMode::Gray,
    };
    assert!(request.validate(3).is_ok());
}

#[test]
fn test_validate_requires_signature_for_placements() {
    let request = SubmissionRequest {
        document: b"%PDF".to_vec(),
        signature: None,
        placements: vec![placement(0)],
        filter: FilterMode::Color,
    };
    assert!(matches!(
        request.validate(1),
        Err(SignError::NoSignatureLoaded)
    ));

    // Without placements the signature is optional
    let request = SubmissionRequest {
        placements: Vec::new(),
        ..request
    };
    assert!(request.validate(1).is_ok());
}

#[test]
fn test_validate_rejects_empty_document() {
    let request = SubmissionRequest {
        document: Vec::new(),
        signature: None,
        placements: Vec::new(),
        filter: FilterMode::Color,
    };
    assert!(matches!(request.validate(1), Err(SignError::NoDocument)));
}

#[test]
fn test_validate_placement_ranges() {
    assert!(validate_placement(&placement(0), 1).is_ok());

    assert!(matches!(
        validate_placement(&placement(1), 1),
        Err(SignError::PageOutOfRange {
            page: 1,
            page_count: 1
        })
    ));

    let bad = [
        Placement { x: -0.01, ..placement(0) },
        Placement { y: 1.5, ..placement(0) },
        Placement { width: 0.0, ..placement(0) },
        Placement { height: 1.01, ..placement(0) },
        Placement { width: f32::NAN, ..placement(0) },
    ];
    for p in bad {
        assert!(
            matches!(validate_placement(&p, 1), Err(SignError::InvalidPlacement(_))),
            "{:?} should be rejected",
            p
        );
    }
}

#[test]
fn test_error_body_detail_is_used_verbatim() {
    let err = submission_error_from_body(br#"{"detail": "Empty PDF document"}"#);
    assert_eq!(err.to_string(), "Empty PDF document");
}

#[test]
fn test_error_body_falls_back_to_generic_message() {
    for body in [&b"<html>502</html>"[..], b"{}", br#"{"detail": "  "}"#, b""] {
        let err = submission_error_from_body(body);
        assert!(matches!(&err, SignError::Submission(_)));
        assert_eq!(err.to_string(), constants::GENERIC_SUBMISSION_ERROR);
    }
}

#[tokio::test]
async fn test_session_submit_sends_placements_and_signature() {
    let mut session = signed_session(3).await;
    session.add_overlay(0).unwrap();
    session.add_overlay(2).unwrap();

    let service = RecordingService {
        response: Some(b"%PDF-result".to_vec()),
        ..Default::default()
    };
    let result = session.submit(&service, FilterMode::Bw).await.unwrap();
    assert_eq!(result, b"%PDF-result");

    let requests = service.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.filter, FilterMode::Bw);
    assert_eq!(request.document, b"%PDF-1.7 test");
    assert!(request.signature.is_some());

    let mut pages: Vec<usize> = request.placements.iter().map(|p| p.page).collect();
    pages.sort();
    assert_eq!(pages, vec![0, 2]);

    let json: serde_json::Value = serde_json::from_str(&request.placements_json().unwrap()).unwrap();
    let first = &json.as_array().unwrap()[0];
    for key in ["page", "x", "y", "width", "height"] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn test_failed_submission_keeps_session_state() {
    let mut session = signed_session(1).await;
    let placement = session.add_overlay(0).unwrap();

    let service = RecordingService::default();
    let err = session
        .submit(&service, FilterMode::Color)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Page number out of range");
    assert_eq!(session.placements(), vec![placement]);
    assert!(session.signature().is_loaded());
}

#[tokio::test]
async fn test_invalid_submission_is_not_sent() {
    let mut session = signed_session(1).await;
    session.add_overlay(0).unwrap();
    session.clear_signature();
    // Empty sessions can still be submitted for processing only
    let service = RecordingService {
        response: Some(Vec::new()),
        ..Default::default()
    };
    session.submit(&service, FilterMode::Color).await.unwrap();
    assert_eq!(service.requests.lock().unwrap().len(), 1);

    let empty = EditingSession::with_renderer(
        Vec::new(),
        FixedRenderer::uniform(1, 100.0, 100.0),
        SignOptions::default(),
    );
    let result = empty.submit(&service, FilterMode::Color).await;
    assert!(matches!(result, Err(SignError::NoDocument)));
    assert_eq!(service.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_outbox_writes_request_files() {
    let dir = tempfile::tempdir().unwrap();
    let outbox = OutboxUploadService::new(dir.path().join("job-1"));

    let mut session = signed_session(2).await;
    session.add_overlay(1).unwrap();

    let manifest_bytes = session.submit(&outbox, FilterMode::Gray).await.unwrap();
    let manifest: OutboxManifest = serde_json::from_slice(&manifest_bytes).unwrap();

    assert_eq!(manifest.filter, FilterMode::Gray);
    assert_eq!(manifest.placement_count, 1);
    assert!(manifest.has_signature);
    assert_eq!(manifest.result_file, pdf_sign::constants::RESULT_FILE_NAME);

    let job = outbox.dir();
    let document = std::fs::read(job.join(OutboxUploadService::DOCUMENT_FILE)).unwrap();
    assert_eq!(document, b"%PDF-1.7 test");
    assert!(job.join(OutboxUploadService::SIGNATURE_FILE).exists());

    let placements: Vec<Placement> = serde_json::from_slice(
        &std::fs::read(job.join(OutboxUploadService::PLACEMENTS_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(placements, session.placements());

    let on_disk = std::fs::read(job.join(OutboxUploadService::MANIFEST_FILE)).unwrap();
    assert_eq!(on_disk, manifest_bytes);
}

#[test]
fn test_filter_mode_wire_values() {
    assert_eq!(serde_json::to_string(&FilterMode::Color).unwrap(), r#""color""#);
    assert_eq!(serde_json::to_string(&FilterMode::Gray).unwrap(), r#""gray""#);
    assert_eq!(serde_json::to_string(&FilterMode::Bw).unwrap(), r#""bw""#);
    assert_eq!(FilterMode::default(), FilterMode::Color);
    assert_eq!(FilterMode::Bw.as_str(), "bw");
}

#[test]
fn test_json_failures_are_serialization_errors() {
    let err: SignError = serde_json::from_str::<Placement>("{\"page\": 0")
        .unwrap_err()
        .into();

    assert!(matches!(err, SignError::Serialization(_)));
    assert!(err.to_string().starts_with("Serialization error"));
}
