//! # InputBox Component
//!
//! Single-line question field.
//!
//! ## Responsibilities
//!
//! - Capture text input, editing and cursor movement
//! - Emit `Submit` on Enter, unless the box is disabled or blank
//! - Scroll horizontally so the cursor stays visible
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled` and `focused` are props
//! synced from the app every loop: while a question is outstanding the box stays
//! editable but Enter is ignored and the buffer kept.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub const PLACEHOLDER: &str = "Type your question...";
/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
const CONTENT_OFFSET: u16 = 2;
/// Input row height: one text line plus borders
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible display column
    scroll: usize,
    /// A question is outstanding (Prop)
    pub disabled: bool,
    /// Keyboard focus is here (Prop)
    pub focused: bool,
    pub theme: Theme,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
            disabled: false,
            focused: true,
            theme: Theme::light(),
        }
    }

    fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Keep the cursor column inside a viewport `visible` columns wide.
    fn update_scroll(&mut self, visible: usize) {
        let column = self.cursor_column();
        if visible == 0 {
            self.scroll = column;
        } else if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + visible {
            self.scroll = column + 1 - visible;
        }
    }

    /// The slice of the buffer between display columns `scroll` and `scroll + visible`.
    fn visible_text(&self, visible: usize) -> String {
        let mut column = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if column >= self.scroll && column + w <= self.scroll + visible {
                out.push(c);
            }
            column += w;
        }
        out
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.update_scroll(visible);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style(self.focused))
            .padding(ratatui::widgets::Padding::horizontal(1))
            .title(" Ask ");

        let content = if self.buffer.is_empty() {
            Span::styled(PLACEHOLDER, self.theme.dim_style())
        } else {
            Span::styled(self.visible_text(visible), self.theme.base_style())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if self.focused {
            let x = area.x + CONTENT_OFFSET + (self.cursor_column() - self.scroll) as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: fold pasted newlines into spaces
                let flattened: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flattened);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome if self.cursor != 0 => {
                self.cursor = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd if self.cursor != self.buffer.len() => {
                self.cursor = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.disabled || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
