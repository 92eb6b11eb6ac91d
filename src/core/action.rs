//! # Actions
//!
//! Everything that can happen in pdfchat becomes an `Action`.
//! User presses Enter? That's `Action::SubmitQuestion(text)`.
//! Backend answers? That's `Action::ChatFinished(result)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must carry out. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every backend failure is turned into local state right here (a notice,
//! a synthesized chat turn, or a status line) so nothing escapes the loop.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};

use crate::backend::{BackendError, ChatRequest, ChatResponse, UploadResponse, UploadedFile};
use crate::core::intake::{IntakePhase, NO_PDFS_MESSAGE, UPLOAD_FALLBACK_MESSAGE};
use crate::core::state::App;
use crate::core::types::{ChatTurn, Document};

#[derive(Debug)]
pub enum Action {
    /// Text from the input box (untrimmed).
    SubmitQuestion(String),
    ChatFinished(Result<ChatResponse, BackendError>),
    /// Files are poised over the upload surface (picker opened).
    DragEntered,
    DragLeft,
    /// Files accepted by the PDF filter. May be empty.
    DropFiles(Vec<PathBuf>),
    UploadFinished(Result<UploadResponse, BackendError>),
    DeleteDocument(String),
    DeleteFinished {
        name: String,
        result: Result<(), BackendError>,
    },
    RefreshDocuments,
    DocumentsListed(Result<Vec<Document>, BackendError>),
    DismissNotice,
    Tick(Instant),
    ToggleTheme,
    Quit,
}

/// Work the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SendChat(ChatRequest),
    Upload(Vec<PathBuf>),
    Delete(String),
    ListDocuments,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitQuestion(text) => match app.conversation.begin(&text) {
            Some(question) => {
                info!("Sending question ({} chars)", question.len());
                app.status_message = "Thinking...".to_string();
                Effect::SendChat(ChatRequest::all_documents(question))
            }
            None => {
                debug!(
                    "Ignoring submit (blank={}, busy={})",
                    text.trim().is_empty(),
                    app.conversation.is_busy()
                );
                Effect::None
            }
        },

        Action::ChatFinished(result) => {
            if !app.conversation.is_busy() {
                warn!("Chat result arrived with no request outstanding; dropping it");
                return Effect::None;
            }
            let turn = match result {
                Ok(resp) => ChatTurn::assistant(resp.response, resp.sources),
                Err(e) => {
                    warn!("Chat request failed: {}", e);
                    ChatTurn::failure()
                }
            };
            app.status_message = if turn.failed {
                "Chat request failed".to_string()
            } else {
                "Ready".to_string()
            };
            app.conversation.finish(turn);
            Effect::None
        }

        Action::DragEntered => {
            if app.intake.phase == IntakePhase::Idle {
                app.intake.phase = IntakePhase::DragOver;
            }
            Effect::None
        }

        Action::DragLeft => {
            if app.intake.phase == IntakePhase::DragOver {
                app.intake.phase = IntakePhase::Idle;
            }
            Effect::None
        }

        Action::DropFiles(files) => {
            if app.intake.is_uploading() {
                debug!("Ignoring drop of {} file(s) while uploading", files.len());
                return Effect::None;
            }
            if files.is_empty() {
                app.intake.phase = IntakePhase::Idle;
                app.intake.raise(NO_PDFS_MESSAGE, Instant::now());
                return Effect::None;
            }
            info!("Uploading {} file(s)", files.len());
            app.intake.phase = IntakePhase::Uploading;
            app.status_message = format!("Uploading {} file(s)...", files.len());
            Effect::Upload(files)
        }

        Action::UploadFinished(result) => {
            app.intake.phase = IntakePhase::Idle;
            match result {
                Ok(resp) if resp.success => {
                    let batch: Vec<Document> =
                        resp.files.iter().map(UploadedFile::to_document).collect();
                    info!("Upload succeeded: {} document(s)", batch.len());
                    app.status_message = format!("Uploaded {} file(s)", batch.len());
                    app.registry.extend(batch);
                }
                Ok(resp) => {
                    let reason = resp.error.unwrap_or_else(|| "Unknown error".to_string());
                    warn!("Upload rejected by backend: {}", reason);
                    app.status_message = "Upload failed".to_string();
                    app.intake
                        .raise(format!("Upload failed: {reason}"), Instant::now());
                }
                Err(e) => {
                    warn!("Upload request failed: {}", e);
                    app.status_message = "Upload failed".to_string();
                    app.intake
                        .raise(e.user_message(UPLOAD_FALLBACK_MESSAGE), Instant::now());
                }
            }
            Effect::None
        }

        Action::DeleteDocument(name) => {
            info!("Requesting delete of {}", name);
            app.status_message = format!("Deleting {name}...");
            Effect::Delete(name)
        }

        Action::DeleteFinished { name, result } => {
            match result {
                Ok(()) => {
                    let removed = app.registry.remove_by_name(&name);
                    info!("Deleted {} ({} registry entries)", name, removed);
                    app.status_message = format!("Deleted {name}");
                }
                Err(e) => {
                    warn!("Error deleting PDF {}: {}", name, e);
                    app.status_message = format!("Could not delete {name}");
                }
            }
            Effect::None
        }

        Action::RefreshDocuments => {
            if app.refreshing {
                return Effect::None;
            }
            app.refreshing = true;
            app.status_message = "Refreshing documents...".to_string();
            Effect::ListDocuments
        }

        Action::DocumentsListed(result) => {
            app.refreshing = false;
            match result {
                Ok(documents) => {
                    info!("Backend lists {} document(s)", documents.len());
                    app.status_message = format!("{} document(s) on server", documents.len());
                    app.registry.replace(documents);
                }
                Err(e) => {
                    warn!("Listing documents failed: {}", e);
                    app.status_message = "Could not refresh documents".to_string();
                }
            }
            Effect::None
        }

        Action::DismissNotice => {
            app.intake.dismiss();
            Effect::None
        }

        Action::Tick(now) => {
            if app.intake.expire(now) {
                debug!("Notice auto-dismissed");
            }
            Effect::None
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
