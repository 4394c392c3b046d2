use crate::handlers::{self, Session};
use crate::{SessionCommand, SessionUpdate, StatusMessage};
use pdf_sign::{SignOptions, UploadService};
use tokio::sync::mpsc;

/// Worker task that owns the editing session and applies commands to it
/// one at a time, in the order they were sent. Nothing is coalesced.
pub async fn worker_task<U: UploadService>(
    mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    update_tx: mpsc::UnboundedSender<SessionUpdate>,
    upload: U,
    options: SignOptions,
) {
    let mut session: Option<Session> = None;

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &upload, &options, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command<U: UploadService>(
    cmd: SessionCommand,
    session: &mut Option<Session>,
    upload: &U,
    options: &SignOptions,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    match cmd {
        SessionCommand::OpenDocument { path } => {
            handlers::handle_open(path, options, session, update_tx).await;
        }
        SessionCommand::LoadSignature { bytes } => {
            handlers::handle_load_signature(bytes, session, update_tx).await;
        }
        other => match session.as_mut() {
            Some(session) => apply_to_session(other, session, upload, update_tx).await,
            None => {
                let _ = update_tx.send(SessionUpdate::Status {
                    message: StatusMessage::DocumentRequired,
                });
            }
        },
    }
}

async fn apply_to_session<U: UploadService>(
    cmd: SessionCommand,
    session: &mut Session,
    upload: &U,
    update_tx: &mpsc::UnboundedSender<SessionUpdate>,
) {
    match cmd {
        SessionCommand::ClearSignature => {
            handlers::handle_clear_signature(session, update_tx);
        }
        SessionCommand::AddOverlay { page } => {
            handlers::handle_add_overlay(page, session, update_tx);
        }
        SessionCommand::RemoveOverlay { page } => {
            handlers::handle_remove_overlay(page, session, update_tx);
        }
        SessionCommand::Gesture { page, event } => {
            handlers::handle_gesture(page, event, session, update_tx);
        }
        SessionCommand::SetScale { scale } => {
            handlers::handle_set_scale(scale, session, update_tx);
        }
        SessionCommand::Submit { filter } => {
            handlers::handle_submit(filter, session, upload, update_tx).await;
        }
        // Handled by process_command
        SessionCommand::OpenDocument { .. } | SessionCommand::LoadSignature { .. } => {}
    }
}
