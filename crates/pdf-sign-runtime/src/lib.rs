use std::fmt;
use std::path::PathBuf;

mod handlers;
mod worker;

pub use worker::worker_task;

// Re-export types from library crates
pub use pdf_sign::{FilterMode, GestureEvent, Placement, SignOptions};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum SessionCommand {
    /// Load a document, discarding the current session
    OpenDocument {
        path: PathBuf,
    },
    LoadSignature {
        bytes: Vec<u8>,
    },
    ClearSignature,
    AddOverlay {
        page: usize,
    },
    RemoveOverlay {
        page: usize,
    },
    Gesture {
        page: usize,
        event: GestureEvent,
    },
    /// Display scale changed; overlays are re-laid out from their placements
    SetScale {
        scale: f32,
    },
    Submit {
        filter: FilterMode,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    DocumentOpened {
        page_count: usize,
    },
    Status {
        message: StatusMessage,
    },
    PlacementsChanged {
        placements: Vec<Placement>,
    },
    SubmissionComplete {
        result: Vec<u8>,
    },
    Error {
        message: String,
    },
}

/// Short status lines shown next to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    DocumentRequired,
    SignatureRequired,
    SignatureMissingHint,
    SignatureReadyHint,
    Processing,
    Done,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StatusMessage::DocumentRequired => "Load a PDF document.",
            StatusMessage::SignatureRequired => "Load a signature image first.",
            StatusMessage::SignatureMissingHint => {
                "To place a signature, load a signature image."
            }
            StatusMessage::SignatureReadyHint => {
                "Click \"Add signature\" on a page, then drag the signature into place."
            }
            StatusMessage::Processing => "Processing…",
            StatusMessage::Done => "The document is ready.",
        };
        f.write_str(text)
    }
}
