//! Handing finished placements to the processing backend
//!
//! A submission carries the original document, the signature image, the
//! placement list and the processing mode. `validate` applies the same
//! acceptance rules the backend does, so obviously bad requests never leave
//! the session.

use crate::constants::{GENERIC_SUBMISSION_ERROR, RESULT_FILE_NAME};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub document: Vec<u8>,
    pub signature: Option<Vec<u8>>,
    pub placements: Vec<Placement>,
    pub filter: FilterMode,
}

impl SubmissionRequest {
    /// Placement list as sent in the `placements` form field
    pub fn placements_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.placements)?)
    }

    /// Check the request against a document with `page_count` pages
    pub fn validate(&self, page_count: usize) -> Result<()> {
        if self.document.is_empty() {
            return Err(SignError::NoDocument);
        }

        let has_signature = self.signature.as_ref().is_some_and(|s| !s.is_empty());
        if !self.placements.is_empty() && !has_signature {
            return Err(SignError::NoSignatureLoaded);
        }

        for placement in &self.placements {
            validate_placement(placement, page_count)?;
        }
        Ok(())
    }
}

/// Reject placements the backend would refuse
pub fn validate_placement(placement: &Placement, page_count: usize) -> Result<()> {
    if placement.page >= page_count {
        return Err(SignError::PageOutOfRange {
            page: placement.page,
            page_count,
        });
    }

    let Placement {
        x,
        y,
        width,
        height,
        ..
    } = *placement;
    let in_range = (0.0..=1.0).contains(&x)
        && (0.0..=1.0).contains(&y)
        && width > 0.0
        && width <= 1.0
        && height > 0.0
        && height <= 1.0;

    if in_range {
        Ok(())
    } else {
        Err(SignError::InvalidPlacement(format!(
            "page {}: position and size must be within 0..1 (x={}, y={}, width={}, height={})",
            placement.page, x, y, width, height
        )))
    }
}

/// Backend that turns a submission into a finished document
pub trait UploadService {
    /// Send the request; resolves to the result file bytes.
    ///
    /// Failures are reported as `SignError::Submission` carrying the message
    /// to show the user.
    fn submit(&self, request: &SubmissionRequest) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorPayload {
    detail: Option<String>,
}

/// Build the user-facing error for a failed response body.
///
/// Uses the backend's `detail` message verbatim when the body carries one.
pub fn submission_error_from_body(body: &[u8]) -> SignError {
    let detail = serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.detail)
        .filter(|detail| !detail.trim().is_empty());

    SignError::Submission(detail.unwrap_or_else(|| GENERIC_SUBMISSION_ERROR.to_string()))
}

/// Summary written next to the spooled files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxManifest {
    pub filter: FilterMode,
    pub placement_count: usize,
    pub has_signature: bool,
    pub document_file: String,
    pub signature_file: Option<String>,
    pub placements_file: String,
    /// Name the processing job writes the finished document under
    pub result_file: String,
}

/// Upload service that spools each submission into a directory, where a
/// separate processing job picks it up.
///
/// The result is the manifest describing the spooled files.
#[derive(Debug, Clone)]
pub struct OutboxUploadService {
    dir: PathBuf,
}

impl OutboxUploadService {
    pub const DOCUMENT_FILE: &'static str = "document.pdf";
    pub const SIGNATURE_FILE: &'static str = "signature.bin";
    pub const PLACEMENTS_FILE: &'static str = "placements.json";
    pub const MANIFEST_FILE: &'static str = "request.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    async fn write_request(&self, request: &SubmissionRequest) -> Result<Vec<u8>> {
        tokio::fs::create_dir_all(&self.dir).await?;

        tokio::fs::write(self.dir.join(Self::DOCUMENT_FILE), &request.document).await?;
        if let Some(signature) = &request.signature {
            tokio::fs::write(self.dir.join(Self::SIGNATURE_FILE), signature).await?;
        }
        tokio::fs::write(
            self.dir.join(Self::PLACEMENTS_FILE),
            request.placements_json()?,
        )
        .await?;

        let manifest = OutboxManifest {
            filter: request.filter,
            placement_count: request.placements.len(),
            has_signature: request.signature.is_some(),
            document_file: Self::DOCUMENT_FILE.to_string(),
            signature_file: request
                .signature
                .as_ref()
                .map(|_| Self::SIGNATURE_FILE.to_string()),
            placements_file: Self::PLACEMENTS_FILE.to_string(),
            result_file: RESULT_FILE_NAME.to_string(),
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        tokio::fs::write(self.dir.join(Self::MANIFEST_FILE), &manifest_bytes).await?;

        Ok(manifest_bytes)
    }
}

impl UploadService for OutboxUploadService {
    async fn submit(&self, request: &SubmissionRequest) -> Result<Vec<u8>> {
        log::info!(
            "Spooling {} placement(s) to {}",
            request.placements.len(),
            self.dir.display()
        );
        self.write_request(request)
            .await
            .map_err(|e| SignError::Submission(format!("Could not write submission: {}", e)))
    }
}
