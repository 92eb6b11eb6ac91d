//! # DocumentList Component
//!
//! The "Uploaded PDFs" column: one row per registry entry, with a cursor and a
//! two-step delete. Pressing `d` (or Delete) arms the selected row, pressing it
//! again emits [`DocumentEvent::Delete`]. Any other key disarms it.
//!
//! Like `MessageList`, the component is rebuilt every frame around a
//! persistent [`DocumentListState`].

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::types::Document;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub const LIST_TITLE: &str = " Uploaded PDFs ";
pub const EMPTY_LABEL: &str = "No PDFs uploaded yet";
const CONFIRM_SUFFIX: &str = " (d again to delete)";

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// Delete every document carrying this name.
    Delete(String),
}

#[derive(Debug, Default)]
pub struct DocumentListState {
    pub selected: usize,
    /// Name armed for deletion; only valid while it is still the selected row
    pub confirm_delete: Option<String>,
    /// Names at the last sync, so events carry document names
    names: Vec<String>,
}

impl DocumentListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the registry and clamp the cursor. Called once per loop.
    pub fn sync(&mut self, documents: &[Document]) {
        self.names = documents.iter().map(|d| d.name.clone()).collect();
        if self.selected >= self.names.len() {
            self.selected = self.names.len().saturating_sub(1);
        }
        if self.confirm_delete.as_ref() != self.names.get(self.selected) {
            self.confirm_delete = None;
        }
    }

    fn is_armed(&self, index: usize) -> bool {
        index == self.selected && self.confirm_delete.is_some()
    }
}

impl EventHandler for DocumentListState {
    type Event = DocumentEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.confirm_delete = None;
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.confirm_delete = None;
                if self.selected + 1 < self.names.len() {
                    self.selected += 1;
                }
                None
            }
            TuiEvent::InputChar('d') | TuiEvent::Delete => {
                let name = self.names.get(self.selected)?.clone();
                if self.confirm_delete.as_ref() == Some(&name) {
                    self.confirm_delete = None;
                    Some(DocumentEvent::Delete(name))
                } else {
                    self.confirm_delete = Some(name);
                    None
                }
            }
            _ => {
                self.confirm_delete = None;
                None
            }
        }
    }
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub struct DocumentList<'a> {
    pub state: &'a mut DocumentListState,
    pub documents: &'a [Document],
    pub focused: bool,
    pub theme: Theme,
}

impl<'a> DocumentList<'a> {
    pub fn new(
        state: &'a mut DocumentListState,
        documents: &'a [Document],
        focused: bool,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            documents,
            focused,
            theme,
        }
    }

    fn row(&self, index: usize, doc: &Document, width: usize) -> ListItem<'static> {
        let pages = doc.pages.map(|p| format!(" ({p}p)")).unwrap_or_default();
        let armed = self.state.is_armed(index);
        let suffix = if armed { CONFIRM_SUFFIX } else { "" };
        let name_width = width.saturating_sub(pages.width() + suffix.width() + 2);

        let mut spans = vec![
            Span::raw("▪ "),
            Span::styled(
                truncate_to_width(&doc.name, name_width),
                self.theme.base_style(),
            ),
            Span::styled(pages, self.theme.dim_style()),
        ];
        if armed {
            spans.push(Span::styled(
                suffix,
                self.theme
                    .base_style()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Component for DocumentList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("{}({}) ", LIST_TITLE, self.documents.len());
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style(self.focused))
            .title(title);

        if self.documents.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(EMPTY_LABEL, self.theme.dim_style())).block(block),
                area,
            );
            return;
        }

        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| self.row(i, doc, width))
            .collect();

        let mut list = List::new(items).block(block);
        if self.focused {
            list = list.highlight_style(self.theme.highlight_style());
        }

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
