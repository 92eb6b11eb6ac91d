//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display every chat turn as a `Message` bubble
//! - Keep the newest turn in view unless the user scrolled away
//! - Show a "thinking" row while a question is outstanding
//! - Cache bubble heights so long transcripts stay cheap to lay out
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the turns (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::types::ChatTurn;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{BUBBLE_GAP, Message};
use crate::tui::event::TuiEvent;
use crate::tui::theme::{Theme, spinner_char};

pub const EMPTY_LABEL: &str = "Upload PDFs on the left, then ask a question about them.";
pub const THINKING_LABEL: &str = "Thinking...";
/// Rows reserved under the last bubble for the thinking indicator.
const THINKING_ROWS: u16 = 2;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Whether content exists below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub turns: &'a [ChatTurn],
    pub busy: bool,
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        turns: &'a [ChatTurn],
        busy: bool,
        spinner_frame: usize,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            turns,
            busy,
            spinner_frame,
            theme,
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(EMPTY_LABEL, self.theme.dim_style()))
                .alignment(Alignment::Center),
            row,
        );
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        if self.turns.is_empty() && !self.busy {
            self.render_empty(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        // 1. Update layout cache. Turns never change once pushed, so only
        // new turns (or a width change) need measuring.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.turns.len(), content_width);
        layout.heights.truncate(reusable);
        for turn in self.turns.iter().skip(layout.heights.len()) {
            let height = Message::calculate_height(turn, content_width).saturating_add(BUBBLE_GAP);
            layout.heights.push(height);
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.turns.len(), content_width);

        let total_height = layout.total_height();
        let thinking_rows = if self.busy { THINKING_ROWS } else { 0 };
        // Heights saturate at u16::MAX, so the thinking row may not fit
        let canvas_height = total_height.saturating_add(thinking_rows);

        // 2. Pin to the bottom, or clamp so we never overscroll past content.
        // Done before culling so the first frame lands on the newest turns.
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: canvas_height.saturating_sub(area.height),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible turns into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let bubble_height = height.saturating_sub(BUBBLE_GAP);
            let bubble_rect = Rect::new(0, y_offset, content_width, bubble_height);
            scroll_view.render_widget(Message::new(&self.turns[i], self.theme), bubble_rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.busy && total_height < canvas_height {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_char(self.spinner_frame)),
                    self.theme.base_style().fg(self.theme.focus),
                ),
                Span::styled(THINKING_LABEL, self.theme.dim_style()),
            ]);
            scroll_view.render_widget(
                Paragraph::new(line),
                Rect::new(0, total_height, content_width, 1),
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because scrolling needs the persistent scroll position, while `MessageList`
/// is recreated each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// Row count of each turn, bubble gap included
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    turn_count: usize,
    content_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached heights still valid for `turn_count` turns at `content_width`.
    pub fn reusable_count(&self, turn_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || self.heights.is_empty() {
            return 0;
        }
        // Fewer turns than cached means the transcript was replaced
        if turn_count < self.turn_count {
            return 0;
        }
        self.heights.len().min(turn_count)
    }

    pub fn update_metadata(&mut self, turn_count: usize, content_width: u16) {
        self.turn_count = turn_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of the turns intersecting the viewport, padded by half a
    /// screen on each side.
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
