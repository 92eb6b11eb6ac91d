use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{DocumentList, FilePicker, MessageList, Notice, TitleBar, UploadPanel};
use crate::tui::theme::{Theme, spinner_char};
use crate::tui::{Focus, TuiState};

/// Width of the upload / document column.
const SIDEBAR_WIDTH: u16 = 34;
const UPLOAD_PANEL_HEIGHT: u16 = 6;
const SEND_BUTTON_WIDTH: u16 = 10;

pub const SEND_LABEL: &str = "Send";

/// Screen regions, computed once per frame.
pub struct ScreenLayout {
    pub title: Rect,
    pub upload: Rect,
    pub documents: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub send: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min};

        let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(area);
        let [sidebar, chat] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body);
        let [upload, documents] =
            Layout::vertical([Length(UPLOAD_PANEL_HEIGHT), Min(0)]).areas(sidebar);
        let [messages, input_row] = Layout::vertical([Min(0), Length(INPUT_HEIGHT)]).areas(chat);
        let [input, send] =
            Layout::horizontal([Min(0), Length(SEND_BUTTON_WIDTH)]).areas(input_row);

        Self {
            title,
            upload,
            documents,
            messages,
            input,
            send,
        }
    }
}

fn draw_send_button(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    busy: bool,
    ready: bool,
    spinner_frame: usize,
) {
    let label = if busy {
        format!("{} ", spinner_char(spinner_frame))
    } else {
        SEND_LABEL.to_string()
    };
    let style = if ready {
        theme.header_style()
    } else {
        theme.dim_style()
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(ready));
    frame.render_widget(
        Paragraph::new(Span::styled(label, style.add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let theme = Theme::from(app.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let layout = ScreenLayout::new(area);

    TitleBar::new(app.backend.base_url(), &app.status_message, theme).render(frame, layout.title);

    UploadPanel::new(
        app.intake.phase,
        tui.focus == Focus::Upload,
        spinner_frame,
        theme,
    )
    .render(frame, layout.upload);

    DocumentList::new(
        &mut tui.documents,
        app.registry.documents(),
        tui.focus == Focus::Documents,
        theme,
    )
    .render(frame, layout.documents);

    MessageList::new(
        &mut tui.message_list,
        app.conversation.turns(),
        app.conversation.is_busy(),
        spinner_frame,
        theme,
    )
    .render(frame, layout.messages);

    // Picker owns the cursor while open
    tui.input_box.focused = tui.focus == Focus::Input && tui.picker.is_none();
    tui.input_box.theme = theme;
    tui.input_box.render(frame, layout.input);

    let busy = app.conversation.is_busy();
    let ready = !busy && !tui.input_box.buffer.trim().is_empty();
    draw_send_button(frame, layout.send, &theme, busy, ready, spinner_frame);

    if let Some(picker) = &tui.picker {
        FilePicker::new(picker, theme).render(frame, area);
    }

    if let Some(notice) = &app.intake.notice {
        Notice::new(&notice.message, theme).render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::backend::ChatResponse;
    use crate::core::action::{Action, update};
    use crate::core::intake::NO_PDFS_MESSAGE;
    use crate::core::types::{Citation, Document};
    use crate::test_support::test_app;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_initial_screen() {
        let app = test_app();
        let mut tui = TuiState::new(None);
        let text = draw(&app, &mut tui);

        assert!(text.contains("PDF Chatbot"));
        assert!(text.contains("Uploaded PDFs"));
        assert!(text.contains("No PDFs uploaded yet"));
        assert!(text.contains("Type your question..."));
        assert!(text.contains(SEND_LABEL));
    }

    #[test]
    fn test_documents_and_citations_rendered() {
        let mut app = test_app();
        app.registry.extend([Document::new("report.pdf", "1")]);
        update(&mut app, Action::SubmitQuestion("what is it?".to_string()));
        update(
            &mut app,
            Action::ChatFinished(Ok(ChatResponse {
                response: "It is a report.".to_string(),
                sources: Some(vec![Citation {
                    text: "snippet".to_string(),
                    page: 3,
                    pdf_name: "x.pdf".to_string(),
                    similarity: 0.9,
                }]),
            })),
        );

        let mut tui = TuiState::new(None);
        let text = draw(&app, &mut tui);
        assert!(text.contains("report.pdf"));
        assert!(text.contains("what is it?"));
        assert!(text.contains("It is a report."));
        assert!(text.contains("x.pdf (Page 3)"));
    }

    #[test]
    fn test_uploading_and_notice() {
        let mut app = test_app();
        update(&mut app, Action::DropFiles(vec![PathBuf::from("a.pdf")]));
        let mut tui = TuiState::new(None);
        assert!(draw(&app, &mut tui).contains("Uploading..."));

        let mut app = test_app();
        update(&mut app, Action::DropFiles(vec![]));
        assert!(draw(&app, &mut tui).contains(NO_PDFS_MESSAGE));
    }

    #[test]
    fn test_busy_shows_thinking() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuestion("q".to_string()));
        let mut tui = TuiState::new(None);
        assert!(draw(&app, &mut tui).contains("Thinking..."));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        update(&mut app, Action::DropFiles(vec![]));
        let mut tui = TuiState::new(None);
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, &app, &mut tui, 0);
            })
            .unwrap();
    }
}
