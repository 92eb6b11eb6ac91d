//! # TitleBar Component
//!
//! Single-line header: application name, backend address, and the status line.
//!
//! Stateless. All three props are refreshed by the parent each frame, so the
//! bar never reads `App` directly:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.backend.base_url(), &app.status_message, theme);
//! title_bar.render(frame, title_area);
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const APP_TITLE: &str = "PDF Chatbot";

pub struct TitleBar<'a> {
    /// Backend base URL, shown so the user knows which server they are talking to
    pub base_url: &'a str,
    /// Transient status (e.g. "Thinking...", "Uploaded 2 file(s)")
    pub status_message: &'a str,
    pub theme: Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(base_url: &'a str, status_message: &'a str, theme: Theme) -> Self {
        Self {
            base_url,
            status_message,
            theme,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!(" {} · {}", APP_TITLE, self.base_url)
        } else {
            format!(
                " {} · {} · {}",
                APP_TITLE, self.base_url, self.status_message
            )
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), self.theme.header_style()));
        frame.render_widget(
            Paragraph::new(line).style(self.theme.header_style()),
            area,
        );
    }
}
