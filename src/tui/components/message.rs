use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::types::ChatTurn;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take at most this share of the transcript width.
const MAX_WIDTH_PERCENT: u16 = 70;
/// Blank row between consecutive bubbles.
pub const BUBBLE_GAP: u16 = 1;

pub const SOURCES_HEADING: &str = "Sources:";

/// A stateless component that renders one chat turn as a bubble.
///
/// # Design
///
/// `Message` is a **transient component**: it's created fresh each frame with the
/// turn it draws. User turns hug the right edge, assistant turns the left, and
/// neither grows past 70% of the transcript width. An assistant turn with a
/// non-empty citation list gets a separator and a "Sources:" block below the
/// answer.
///
/// # Height Calculation
///
/// Text is pre-wrapped with `textwrap`, and the same lines are drawn without
/// further wrapping, so [`calculate_height`](Self::calculate_height) is exact
/// and `MessageList` can lay out the transcript without rendering it.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
    pub theme: Theme,
}

/// Terminal coordinates are `u16`; longer counts pin at the maximum.
fn clamp_rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

fn wrap_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn, theme: Theme) -> Self {
        Self { turn, theme }
    }

    fn title(turn: &ChatTurn) -> &'static str {
        if turn.is_user { " You " } else { " Assistant " }
    }

    /// Width of the bubble inside a transcript of `available` columns.
    pub fn bubble_width(turn: &ChatTurn, available: u16) -> u16 {
        let max_width = (available.saturating_mul(MAX_WIDTH_PERCENT) / 100)
            .max(HORIZONTAL_OVERHEAD + 1)
            .min(available);
        let content_max = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let widest = Self::answer_lines(turn, content_max)
            .iter()
            .chain(Self::citation_lines(turn, content_max).iter())
            .map(|l| l.width())
            .max()
            .unwrap_or(0);
        let widest = clamp_rows(widest);
        let title_width = clamp_rows(Self::title(turn).width()).saturating_add(2);
        widest
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(title_width)
            .min(max_width)
    }

    /// The answer (or question) text, wrapped to `content_width`.
    fn answer_lines(turn: &ChatTurn, content_width: u16) -> Vec<String> {
        let options = wrap_options(content_width as usize);
        turn.text
            .trim()
            .lines()
            .flat_map(|line| {
                let wrapped = textwrap::wrap(line, &options);
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped.into_iter().map(|l| l.into_owned()).collect()
                }
            })
            .collect()
    }

    /// The "Sources:" heading and one bullet per citation. Empty when the
    /// turn carries no citations.
    fn citation_lines(turn: &ChatTurn, content_width: u16) -> Vec<String> {
        let labels = turn.citation_labels();
        if labels.is_empty() {
            return Vec::new();
        }
        let options = wrap_options(content_width as usize);
        let mut lines = vec![SOURCES_HEADING.to_string()];
        for label in labels {
            lines.extend(
                textwrap::wrap(&format!("• {label}"), &options)
                    .into_iter()
                    .map(|l| l.into_owned()),
            );
        }
        lines
    }

    /// Calculate the height required for this turn in a transcript `available` wide.
    pub fn calculate_height(turn: &ChatTurn, available: u16) -> u16 {
        let width = Self::bubble_width(turn, available);
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let answer = clamp_rows(Self::answer_lines(turn, content_width).len()).max(1);
        let citations = clamp_rows(Self::citation_lines(turn, content_width).len());
        // The separator row only exists alongside citations
        let separator = u16::from(citations > 0);
        answer
            .saturating_add(separator)
            .saturating_add(citations)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn style(&self) -> Style {
        if self.turn.failed {
            self.theme.base_style().fg(self.theme.error)
        } else if self.turn.is_user {
            Style::default().fg(self.theme.user_fg).bg(self.theme.user_bg)
        } else {
            self.theme.base_style().fg(self.theme.assistant)
        }
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(self.turn, area.width);
        let x = if self.turn.is_user {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, width, area.height);

        let style = self.style();
        let border_style = if self.turn.failed {
            style
        } else if self.turn.is_user {
            Style::default().fg(self.theme.user_bg)
        } else {
            self.theme.border_style(false)
        };

        let block = Block::bordered()
            .title(Self::title(self.turn))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let mut lines: Vec<Line> = Self::answer_lines(self.turn, content_width)
            .into_iter()
            .map(|text| Line::from(Span::styled(text, style)))
            .collect();

        let citations = Self::citation_lines(self.turn, content_width);
        if !citations.is_empty() {
            let dim = self.theme.dim_style();
            lines.push(Line::from(Span::styled(
                "─".repeat(content_width as usize),
                dim,
            )));
            lines.extend(
                citations
                    .into_iter()
                    .map(|text| Line::from(Span::styled(text, dim.add_modifier(Modifier::ITALIC)))),
            );
        }

        Paragraph::new(lines).style(style).render(inner, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Citation;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn citation(pdf_name: &str, page: u32) -> Citation {
        Citation {
            text: "snippet".to_string(),
            page,
            pdf_name: pdf_name.to_string(),
            similarity: 0.8,
        }
    }

    fn rendered(turn: &ChatTurn, width: u16) -> Vec<String> {
        let height = Message::calculate_height(turn, width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Message::new(turn, Theme::light()), f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_single_line_height() {
        let turn = ChatTurn::user("Hello");
        assert_eq!(Message::calculate_height(&turn, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_long_text_wraps_within_seventy_percent() {
        let turn = ChatTurn::assistant("word ".repeat(40), None);
        let width = Message::bubble_width(&turn, 100);
        assert!(width <= 70);
        assert!(Message::calculate_height(&turn, 100) > 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_sources_block_adds_lines() {
        let plain = ChatTurn::assistant("answer", None);
        let cited = ChatTurn::assistant("answer", Some(vec![citation("x.pdf", 3)]));
        // separator + heading + one label
        assert_eq!(
            Message::calculate_height(&cited, 80),
            Message::calculate_height(&plain, 80) + 3
        );
    }

    #[test]
    fn test_empty_sources_render_no_block() {
        let turn = ChatTurn::assistant("answer", Some(vec![]));
        let text = rendered(&turn, 60).join("\n");
        assert!(!text.contains(SOURCES_HEADING));
    }

    #[test]
    fn test_citation_labels_rendered() {
        let turn = ChatTurn::assistant(
            "answer",
            Some(vec![citation("x.pdf", 3), citation("y.pdf", 10)]),
        );
        let text = rendered(&turn, 60).join("\n");
        assert!(text.contains(SOURCES_HEADING));
        assert!(text.contains("x.pdf (Page 3)"));
        assert!(text.contains("y.pdf (Page 10)"));
    }

    #[test]
    fn test_user_bubble_is_right_aligned() {
        let turn = ChatTurn::user("hi");
        let rows = rendered(&turn, 40);
        assert!(rows[1].starts_with(' '));
        assert!(rows[1].trim_end().ends_with('│'));
    }

    #[test]
    fn test_assistant_bubble_is_left_aligned() {
        let turn = ChatTurn::assistant("hi", None);
        let rows = rendered(&turn, 40);
        assert!(rows[1].starts_with('│'));
    }

    #[test]
    fn test_height_pins_at_u16_max() {
        let turn = ChatTurn::assistant("line\n".repeat(70_000), Some(vec![citation("x.pdf", 1)]));
        assert_eq!(Message::calculate_height(&turn, 40), u16::MAX);
    }
}
