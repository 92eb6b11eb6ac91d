//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` returns an `Effect` describing the backend call it needs. The
//! loop runs each one on a tokio task, and the task reports back through an
//! mpsc channel as a new `Action`, which the loop feeds to `update()` on a
//! later iteration. The core never awaits anything.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (question or upload outstanding): draws every ~80ms so the
//!   spinners turn.
//! - **Idle**: sleeps up to 250ms, only redraws on events, on backend results,
//!   or when a notice expires.

mod component;
mod components;
mod event;
mod paste;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::backend::{Backend, ChatRequest, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::intake::partition_pdfs;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DocumentEvent, DocumentListState, FilePickerState, InputBox, InputEvent, MessageListState,
    PickerEvent, UploadEvent, UploadPanelHandler,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Which pane receives keys that are not global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Documents,
    Upload,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Documents,
            Focus::Documents => Focus::Upload,
            Focus::Upload => Focus::Input,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub documents: DocumentListState,
    pub upload: UploadPanelHandler,
    /// File picker overlay (None = hidden)
    pub picker: Option<FilePickerState>,
    pub focus: Focus,
    /// Directory the picker opens in
    pub start_dir: Option<PathBuf>,
}

impl TuiState {
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            documents: DocumentListState::new(),
            upload: UploadPanelHandler,
            picker: None,
            focus: Focus::Input, // User expects to type immediately
            start_dir,
        }
    }

    /// Copy app state into component props.
    fn sync(&mut self, app: &App) {
        self.input_box.disabled = app.conversation.is_busy();
        self.documents.sync(app.registry.documents());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Bracketed paste is how terminals hand over dragged-in files
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Apply an action and start whatever backend call it asks for.
/// Returns true when the app should exit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SendChat(request) => spawn_chat(app.backend.clone(), request, tx.clone()),
        Effect::Upload(files) => spawn_upload(app.backend.clone(), files, tx.clone()),
        Effect::Delete(name) => spawn_delete(app.backend.clone(), name, tx.clone()),
        Effect::ListDocuments => spawn_list(app.backend.clone(), tx.clone()),
    }
    false
}

fn send_back(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver backend result: receiver dropped");
    }
}

fn spawn_chat(backend: Arc<dyn Backend>, request: ChatRequest, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request");
    tokio::spawn(async move {
        let result = backend.chat(&request).await;
        send_back(&tx, Action::ChatFinished(result));
    });
}

fn spawn_upload(backend: Arc<dyn Backend>, files: Vec<PathBuf>, tx: mpsc::Sender<Action>) {
    info!("Spawning upload of {} file(s)", files.len());
    tokio::spawn(async move {
        let result = backend.upload(&files).await;
        send_back(&tx, Action::UploadFinished(result));
    });
}

fn spawn_delete(backend: Arc<dyn Backend>, name: String, tx: mpsc::Sender<Action>) {
    info!("Spawning delete of {}", name);
    tokio::spawn(async move {
        let result = backend.delete(&name).await;
        send_back(&tx, Action::DeleteFinished { name, result });
    });
}

fn spawn_list(backend: Arc<dyn Backend>, tx: mpsc::Sender<Action>) {
    info!("Spawning document listing");
    tokio::spawn(async move {
        let result = backend.list().await;
        send_back(&tx, Action::DocumentsListed(result));
    });
}

fn open_picker(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    if app.intake.is_uploading() {
        debug!("Not opening file picker during upload");
        return;
    }
    tui.picker = Some(FilePickerState::new(tui.start_dir.as_deref()));
    dispatch(app, Action::DragEntered, tx);
}

/// Filter dropped paths to PDFs and hand them to the core. A drop with no
/// PDFs still reaches the core, which raises the notice.
fn drop_files(app: &mut App, paths: Vec<PathBuf>, tx: &mpsc::Sender<Action>) -> bool {
    let (accepted, rejected) = partition_pdfs(paths);
    if !rejected.is_empty() {
        info!("Ignoring {} non-PDF file(s)", rejected.len());
    }
    dispatch(app, Action::DropFiles(accepted), tx)
}

/// Route one input event. Returns true when the app should exit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return dispatch(app, Action::Quit, tx),
        TuiEvent::ToggleTheme => return dispatch(app, Action::ToggleTheme, tx),
        TuiEvent::RefreshDocuments => return dispatch(app, Action::RefreshDocuments, tx),
        _ => {}
    }

    // When the picker is open, it gets everything else
    if let Some(picker) = tui.picker.as_mut() {
        return match picker.handle_event(&event) {
            Some(PickerEvent::Confirm(paths)) if !paths.is_empty() => {
                tui.picker = None;
                drop_files(app, paths, tx)
            }
            Some(PickerEvent::Confirm(_)) | Some(PickerEvent::Dismiss) => {
                tui.picker = None;
                dispatch(app, Action::DragLeft, tx)
            }
            None => false,
        };
    }

    match event {
        TuiEvent::OpenFilePicker => {
            open_picker(app, tui, tx);
            return false;
        }
        TuiEvent::Escape if app.intake.notice.is_some() => {
            return dispatch(app, Action::DismissNotice, tx);
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            return false;
        }
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return false;
        }
        // A paste made only of absolute paths to existing files is a drop, whatever the focus
        TuiEvent::Paste(_) => {
            if let Some(UploadEvent::Drop(paths)) = tui.upload.handle_event(&event) {
                return drop_files(app, paths, tx);
            }
        }
        _ => {}
    }

    match tui.focus {
        Focus::Input => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                return dispatch(app, Action::SubmitQuestion(text), tx);
            }
        }
        Focus::Documents => {
            if let Some(DocumentEvent::Delete(name)) = tui.documents.handle_event(&event) {
                return dispatch(app, Action::DeleteDocument(name), tx);
            }
        }
        Focus::Upload => match tui.upload.handle_event(&event) {
            Some(UploadEvent::OpenPicker) => open_picker(app, tui, tx),
            Some(UploadEvent::Drop(paths)) => return drop_files(app, paths, tx),
            None => {}
        },
    }
    false
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let backend = HttpBackend::new(&config.base_url, config.request_timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let mut app = App::from_config(Arc::new(backend), &config);
    let mut tui = TuiState::new(config.start_dir.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if config.sync_on_startup {
        dispatch(&mut app, Action::RefreshDocuments, &tx);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app);

        let animating = app.conversation.is_busy() || app.intake.is_uploading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                break 'main;
            }
            tui.sync(&app);
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }

        let had_notice = app.intake.notice.is_some();
        dispatch(&mut app, Action::Tick(Instant::now()), &tx);
        if had_notice && app.intake.notice.is_none() {
            needs_redraw = true;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intake::{IntakePhase, NO_PDFS_MESSAGE};
    use crate::core::types::Document;
    use crate::test_support::test_app;

    fn setup() -> (App, TuiState, mpsc::Sender<Action>, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (test_app(), TuiState::new(None), tx, rx)
    }

    fn type_text(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c), tx);
        }
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Input.next(), Focus::Documents);
        assert_eq!(Focus::Documents.next(), Focus::Upload);
        assert_eq!(Focus::Upload.next(), Focus::Input);
    }

    #[test]
    fn test_force_quit() {
        let (mut app, mut tui, tx, _rx) = setup();
        assert!(handle_event(&mut app, &mut tui, TuiEvent::ForceQuit, &tx));
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let (mut app, mut tui, tx, rx) = setup();
        type_text(&mut app, &mut tui, &tx, "hello");
        handle_event(&mut app, &mut tui, TuiEvent::Submit, &tx);
        assert!(app.conversation.is_busy());

        // NoopBackend answers on a spawned task
        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(action, Action::ChatFinished(Ok(_))));
        dispatch(&mut app, action, &tx);
        assert_eq!(app.conversation.turns().len(), 2);
        assert!(!app.conversation.is_busy());
    }

    #[tokio::test]
    async fn test_enter_while_busy_keeps_draft() {
        let (mut app, mut tui, tx, _rx) = setup();
        type_text(&mut app, &mut tui, &tx, "first");
        handle_event(&mut app, &mut tui, TuiEvent::Submit, &tx);
        tui.sync(&app);

        type_text(&mut app, &mut tui, &tx, "second");
        handle_event(&mut app, &mut tui, TuiEvent::Submit, &tx);
        assert_eq!(tui.input_box.buffer, "second");
        assert_eq!(app.conversation.turns().len(), 1);
    }

    #[test]
    fn test_escape_dismisses_notice() {
        let (mut app, mut tui, tx, _rx) = setup();
        dispatch(&mut app, Action::DropFiles(vec![]), &tx);
        assert_eq!(app.intake.notice.as_ref().unwrap().message, NO_PDFS_MESSAGE);

        handle_event(&mut app, &mut tui, TuiEvent::Escape, &tx);
        assert!(app.intake.notice.is_none());
    }

    #[test]
    fn test_non_pdf_paste_drop_raises_notice() {
        let (mut app, mut tui, tx, _rx) = setup();
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, b"").unwrap();

        handle_event(
            &mut app,
            &mut tui,
            TuiEvent::Paste(txt.display().to_string()),
            &tx,
        );
        assert_eq!(app.intake.notice.as_ref().unwrap().message, NO_PDFS_MESSAGE);
        assert_eq!(app.intake.phase, IntakePhase::Idle);
        assert!(tui.input_box.buffer.is_empty());
    }

    #[tokio::test]
    async fn test_pdf_paste_starts_upload() {
        let (mut app, mut tui, tx, _rx) = setup();
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("paper.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();

        handle_event(
            &mut app,
            &mut tui,
            TuiEvent::Paste(pdf.display().to_string()),
            &tx,
        );
        assert_eq!(app.intake.phase, IntakePhase::Uploading);
    }

    #[test]
    fn test_plain_paste_goes_to_input() {
        let (mut app, mut tui, tx, _rx) = setup();
        handle_event(
            &mut app,
            &mut tui,
            TuiEvent::Paste("what is this about".to_string()),
            &tx,
        );
        assert_eq!(tui.input_box.buffer, "what is this about");
    }

    #[test]
    fn test_relative_file_name_paste_goes_to_input() {
        let (mut app, mut tui, tx, _rx) = setup();
        // Tests run from the package root, so this names a real file
        assert!(std::path::Path::new("Cargo.toml").is_file());

        handle_event(
            &mut app,
            &mut tui,
            TuiEvent::Paste("Cargo.toml".to_string()),
            &tx,
        );
        assert_eq!(tui.input_box.buffer, "Cargo.toml");
        assert!(app.intake.notice.is_none());
    }

    #[test]
    fn test_picker_open_and_dismiss_tracks_drag_state() {
        let (mut app, mut tui, tx, _rx) = setup();
        let dir = tempfile::tempdir().unwrap();
        tui.start_dir = Some(dir.path().to_path_buf());

        handle_event(&mut app, &mut tui, TuiEvent::OpenFilePicker, &tx);
        assert!(tui.picker.is_some());
        assert_eq!(app.intake.phase, IntakePhase::DragOver);

        // Keys go to the picker, not the input box
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('x'), &tx);
        assert!(tui.input_box.buffer.is_empty());

        handle_event(&mut app, &mut tui, TuiEvent::Escape, &tx);
        assert!(tui.picker.is_none());
        assert_eq!(app.intake.phase, IntakePhase::Idle);
    }

    #[tokio::test]
    async fn test_double_d_deletes_selected_document() {
        let (mut app, mut tui, tx, rx) = setup();
        app.registry.extend([Document::new("a.pdf", "1")]);
        tui.sync(&app);
        handle_event(&mut app, &mut tui, TuiEvent::FocusNext, &tx);
        assert_eq!(tui.focus, Focus::Documents);

        handle_event(&mut app, &mut tui, TuiEvent::InputChar('d'), &tx);
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('d'), &tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            action,
            Action::DeleteFinished { ref name, result: Ok(()) } if name == "a.pdf"
        ));
        dispatch(&mut app, action, &tx);
        assert!(app.registry.is_empty());
    }
}
