//! # UploadPanel Component
//!
//! The drop target. Its caption follows the intake phase, and while focused it
//! accepts a pasted list of file paths (terminals deliver drag-and-drop as a
//! bracketed paste) or Enter to open the file picker.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::intake::IntakePhase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::paste::parse_dropped_paths;
use crate::tui::theme::{Theme, spinner_char};

pub const UPLOADING_LABEL: &str = "Uploading...";
pub const DRAG_OVER_LABEL: &str = "Drop the PDFs here";
pub const IDLE_LABEL: &str = "Drag and drop PDFs here, or press Ctrl+O to select files";
pub const HINT_LABEL: &str = "Only PDF files are accepted";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    OpenPicker,
    /// Every path the user dropped, before PDF filtering.
    Drop(Vec<PathBuf>),
}

/// Stateless drop target; props are refreshed each frame.
pub struct UploadPanel {
    pub phase: IntakePhase,
    pub focused: bool,
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl UploadPanel {
    pub fn new(phase: IntakePhase, focused: bool, spinner_frame: usize, theme: Theme) -> Self {
        Self {
            phase,
            focused,
            spinner_frame,
            theme,
        }
    }

    fn caption(&self) -> String {
        match self.phase {
            IntakePhase::Uploading => {
                format!("{} {}", spinner_char(self.spinner_frame), UPLOADING_LABEL)
            }
            IntakePhase::DragOver => DRAG_OVER_LABEL.to_string(),
            IntakePhase::Idle => IDLE_LABEL.to_string(),
        }
    }
}

impl Component for UploadPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let drag_over = self.phase == IntakePhase::DragOver;
        let border_style = if drag_over {
            self.theme
                .border_style(true)
                .add_modifier(Modifier::BOLD)
        } else {
            self.theme.border_style(self.focused)
        };

        let block = Block::bordered()
            .border_type(if drag_over {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(" Upload ");

        let mut caption_style = self.theme.base_style();
        if drag_over {
            caption_style = caption_style.fg(self.theme.focus);
        }

        let lines = vec![
            Line::from(Span::styled(self.caption(), caption_style)),
            Line::from(Span::styled(HINT_LABEL, self.theme.dim_style())),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

/// Drop handling lives in a zero-sized handler so the stateless panel can be
/// recreated each frame.
#[derive(Debug, Default)]
pub struct UploadPanelHandler;

impl EventHandler for UploadPanelHandler {
    type Event = UploadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(UploadEvent::OpenPicker),
            TuiEvent::Paste(text) => parse_dropped_paths(text).map(UploadEvent::Drop),
            _ => None,
        }
    }
}
