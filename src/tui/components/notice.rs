//! Error toast anchored to the bottom centre of the screen. Esc dismisses it,
//! and the core expires it after the configured duration.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

const DISMISS_HINT: &str = "Esc to dismiss";
const MAX_WIDTH: u16 = 60;

pub struct Notice<'a> {
    pub message: &'a str,
    pub theme: Theme,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str, theme: Theme) -> Self {
        Self { message, theme }
    }

    /// Toast rect: as wide as the message (capped), sitting just above the
    /// bottom edge of `area`.
    pub fn toast_area(&self, area: Rect) -> Rect {
        let content = self.message.width().max(DISMISS_HINT.width()) as u16;
        let width = (content + 4).min(MAX_WIDTH).min(area.width);
        let inner_width = width.saturating_sub(4).max(1) as usize;
        let lines = textwrap::wrap(self.message, inner_width).len().max(1) as u16;
        let height = (lines + 3).min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.bottom().saturating_sub(height + 1).max(area.y);
        Rect::new(x, y, width, height)
    }
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let toast = self.toast_area(area);
        frame.render_widget(Clear, toast);

        let error_style = self.theme.base_style().fg(self.theme.error);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(error_style.add_modifier(Modifier::BOLD))
            .padding(ratatui::widgets::Padding::horizontal(1))
            .style(self.theme.base_style());

        let lines = vec![
            Line::from(Span::styled(self.message, error_style)),
            Line::from(Span::styled(DISMISS_HINT, self.theme.dim_style())),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            toast,
        );
    }
}
