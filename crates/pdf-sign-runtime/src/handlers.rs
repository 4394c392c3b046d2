use crate::{SessionUpdate, StatusMessage};
use pdf_sign::{
    EditingSession, FilterMode, GestureEvent, LopdfPageRenderer, SignError, SignOptions,
    SignatureLoad, UploadService, read_pdf,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub type Session = EditingSession<LopdfPageRenderer>;

fn send_status(update_tx: &mpsc::UnboundedSender<SessionUpdate>, message: StatusMessage) {
    let _ = update_tx.send(SessionUpdate::Status { message });
}

fn send_placements(session: &Session, update_tx: &mpsc::UnboundedSender<SessionUpdate>) {
    let _ = update_tx.send(SessionUpdate::PlacementsChanged {
        placements: session.placements(),
    });
}

fn send_error(update_tx: &mpsc::UnboundedSender<SessionUpdate>, message: String) {
    let _ = update_tx.send(SessionUpdate::Error { message });
}

pub async fn handle_open(
    path: PathBuf,
    options: &SignOptions,
    session: &mut Option<Session>,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    // Whatever happens, the previous document's state is gone
    *session = None;

    let opened = match read_pdf(&path).await {
        Ok(bytes) => EditingSession::open(bytes, options.clone()).await,
        Err(e) => Err(e),
    };

    match opened {
        Ok(new_session) => {
            let page_count = new_session.page_count();
            *session = Some(new_session);
            let _ = update_tx.send(SessionUpdate::DocumentOpened { page_count });
            send_status(update_tx, StatusMessage::SignatureMissingHint);
        }
        Err(e) => {
            log::error!("Failed to open {}: {}", path.display(), e);
            send_error(update_tx, format!("Failed to open document: {e}"));
        }
    }
}

pub async fn handle_load_signature(
    bytes: Vec<u8>,
    session: &mut Option<Session>,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    let Some(session) = session else {
        send_status(update_tx, StatusMessage::DocumentRequired);
        return;
    };

    match session.load_signature(bytes).await {
        Ok(SignatureLoad::Ready { .. }) => {
            send_status(update_tx, StatusMessage::SignatureReadyHint);
        }
        Ok(SignatureLoad::ProbeFailed) => {}
        // An emptied file input means the signature was removed
        Ok(SignatureLoad::Cleared) => {
            send_status(update_tx, StatusMessage::SignatureMissingHint);
            send_placements(session, update_tx);
        }
        Err(e) => send_error(update_tx, format!("Failed to load signature: {e}")),
    }
}

pub fn handle_clear_signature(
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    session.clear_signature();
    send_status(update_tx, StatusMessage::SignatureMissingHint);
    send_placements(session, update_tx);
}

pub fn handle_add_overlay(
    page: usize,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    match session.add_overlay(page) {
        Ok(_) => send_placements(session, update_tx),
        Err(SignError::NoSignatureLoaded) => {
            send_status(update_tx, StatusMessage::SignatureRequired);
        }
        Err(e) => send_error(update_tx, format!("Failed to add signature: {e}")),
    }
}

pub fn handle_remove_overlay(
    page: usize,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    session.remove_overlay(page);
    send_placements(session, update_tx);
}

pub fn handle_gesture(
    page: usize,
    event: GestureEvent,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    match session.handle_gesture(page, event) {
        Ok(Some(_)) => send_placements(session, update_tx),
        Ok(None) => {}
        Err(e) => send_error(update_tx, format!("Failed to place signature: {e}")),
    }
}

pub fn handle_set_scale(
    scale: f32,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    if let Err(e) = session.set_scale(scale) {
        send_error(update_tx, format!("Failed to rescale pages: {e}"));
    }
}

pub async fn handle_submit<U: UploadService>(
    filter: FilterMode,
    session: &Session,
    upload: &U,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    send_status(update_tx, StatusMessage::Processing);

    match session.submit(upload, filter).await {
        Ok(result) => {
            let _ = update_tx.send(SessionUpdate::SubmissionComplete { result });
            send_status(update_tx, StatusMessage::Done);
        }
        Err(e) => {
            log::error!("Submission failed: {}", e);
            // Backend detail is shown as-is
            send_error(update_tx, e.to_string());
        }
    }
}
