//! # FilePicker Component
//!
//! Keyboard file browser, the terminal stand-in for the browser's "select
//! files" dialog. Directories come first, then files, both sorted
//! case-insensitively; hidden entries are skipped. Only PDFs can be marked.
//!
//! | Key            | Action                                   |
//! |----------------|------------------------------------------|
//! | Up / Down      | Move                                     |
//! | Enter          | Open directory, or mark/unmark a PDF     |
//! | Space          | Mark/unmark a PDF                        |
//! | Backspace      | Parent directory                         |
//! | `u` / Ctrl+O   | Upload marked files                      |
//! | Esc            | Close                                    |

use std::path::{Path, PathBuf};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph};

use crate::core::intake::is_pdf_path;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// Upload these files. May be empty when nothing was marked.
    Confirm(Vec<PathBuf>),
    Dismiss,
}

/// A single entry in the file picker.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_pdf: bool,
}

#[derive(Debug)]
pub struct FilePickerState {
    pub current_dir: PathBuf,
    /// Entries in the current directory (parent link, dirs, then files).
    pub entries: Vec<FileEntry>,
    pub cursor: usize,
    /// Marked PDFs, in marking order.
    pub selected: Vec<PathBuf>,
}

impl FilePickerState {
    /// Open the picker in `start_dir`, falling back to the working directory.
    pub fn new(start_dir: Option<&Path>) -> Self {
        let current_dir = start_dir
            .filter(|d| d.is_dir())
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut state = Self {
            current_dir,
            entries: Vec::new(),
            cursor: 0,
            selected: Vec::new(),
        };
        state.refresh_entries();
        state
    }

    /// Re-read the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_pdf: false,
            });
        }

        match std::fs::read_dir(&self.current_dir) {
            Ok(read_dir) => {
                let mut dirs = Vec::new();
                let mut files = Vec::new();
                for entry in read_dir.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.starts_with('.') {
                        continue;
                    }
                    if path.is_dir() {
                        dirs.push(FileEntry {
                            name,
                            path,
                            is_dir: true,
                            is_pdf: false,
                        });
                    } else {
                        let is_pdf = is_pdf_path(&path);
                        files.push(FileEntry {
                            name,
                            path,
                            is_dir: false,
                            is_pdf,
                        });
                    }
                }
                dirs.sort_by_key(|e| e.name.to_lowercase());
                files.sort_by_key(|e| e.name.to_lowercase());
                entries.extend(dirs);
                entries.extend(files);
            }
            Err(e) => {
                log::warn!("Cannot read directory {}: {}", self.current_dir.display(), e);
            }
        }

        self.entries = entries;
        self.cursor = 0;
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        self.selected.iter().any(|p| p == path)
    }

    fn toggle(&mut self, path: PathBuf) {
        if let Some(pos) = self.selected.iter().position(|p| *p == path) {
            self.selected.remove(pos);
        } else {
            self.selected.push(path);
        }
    }

    fn enter_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.refresh_entries();
    }

    fn current(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }
}

impl EventHandler for FilePickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::InputChar('u') | TuiEvent::OpenFilePicker => {
                Some(PickerEvent::Confirm(self.selected.clone()))
            }
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(parent) = self.current_dir.parent() {
                    let parent = parent.to_path_buf();
                    self.enter_dir(parent);
                }
                None
            }
            TuiEvent::Submit => {
                let entry = self.current()?.clone();
                if entry.is_dir {
                    self.enter_dir(entry.path);
                } else if entry.is_pdf {
                    self.toggle(entry.path);
                }
                None
            }
            TuiEvent::InputChar(' ') => {
                let entry = self.current()?.clone();
                if entry.is_pdf {
                    self.toggle(entry.path);
                }
                None
            }
            _ => None,
        }
    }
}

/// Centered modal rendering a [`FilePickerState`].
pub struct FilePicker<'a> {
    pub state: &'a FilePickerState,
    pub theme: Theme,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a FilePickerState, theme: Theme) -> Self {
        Self { state, theme }
    }

    /// Rect for the modal: 80% x 80% of `area`.
    pub fn modal_area(area: Rect) -> Rect {
        let [_, middle, _] = Layout::vertical([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .areas(middle);
        center
    }

    fn entry_item(&self, entry: &FileEntry) -> ListItem<'static> {
        let theme = &self.theme;
        let (marker, style) = if entry.is_dir {
            ("▸ ", theme.base_style().fg(theme.focus))
        } else if entry.is_pdf && self.state.is_selected(&entry.path) {
            ("✓ ", theme.base_style().fg(theme.focus).add_modifier(Modifier::BOLD))
        } else if entry.is_pdf {
            ("  ", theme.base_style())
        } else {
            ("  ", theme.dim_style())
        };
        ListItem::new(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(entry.name.clone(), style),
        ]))
    }
}

impl Component for FilePicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let modal = Self::modal_area(area);
        frame.render_widget(Clear, modal);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style(true))
            .style(self.theme.base_style())
            .title(" Select PDFs ");
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let [dir_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                self.state.current_dir.display().to_string(),
                self.theme.dim_style(),
            )),
            dir_area,
        );

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .map(|e| self.entry_item(e))
            .collect();
        let list = List::new(items).highlight_style(self.theme.highlight_style());
        let mut list_state = ListState::default();
        if !self.state.entries.is_empty() {
            list_state.select(Some(self.state.cursor));
        }
        frame.render_stateful_widget(list, list_area, &mut list_state);

        let footer = vec![
            Line::from(Span::styled(
                format!("{} file(s) selected", self.state.selected.len()),
                self.theme.base_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enter open/mark · Space mark · Backspace up · u upload · Esc close",
                self.theme.dim_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::create_dir(dir.path().join(".hidden")).unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"").unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        dir
    }

    fn names(state: &FilePickerState) -> Vec<&str> {
        state.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_entries_dirs_first_hidden_skipped() {
        let dir = fixture();
        let state = FilePickerState::new(Some(dir.path()));
        assert_eq!(
            names(&state),
            vec!["..", "alpha", "Zeta", "a.pdf", "b.PDF", "notes.txt"]
        );
        assert!(state.entries[4].is_pdf);
        assert!(!state.entries[5].is_pdf);
    }

    #[test]
    fn test_mark_and_confirm() {
        let dir = fixture();
        let mut state = FilePickerState::new(Some(dir.path()));
        // Move to a.pdf
        for _ in 0..3 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        state.handle_event(&TuiEvent::Submit);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::InputChar(' '));
        // notes.txt cannot be marked
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::InputChar(' '));

        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('u')),
            Some(PickerEvent::Confirm(vec![
                dir.path().join("a.pdf"),
                dir.path().join("b.PDF"),
            ]))
        );
    }

    #[test]
    fn test_unmark() {
        let dir = fixture();
        let mut state = FilePickerState::new(Some(dir.path()));
        for _ in 0..3 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        state.handle_event(&TuiEvent::InputChar(' '));
        state.handle_event(&TuiEvent::InputChar(' '));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_navigate_into_and_out_of_directory() {
        let dir = fixture();
        std::fs::write(dir.path().join("alpha").join("inner.pdf"), b"").unwrap();
        let mut state = FilePickerState::new(Some(dir.path()));

        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.current_dir, dir.path().join("alpha"));
        assert_eq!(names(&state), vec!["..", "inner.pdf"]);

        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.current_dir, dir.path());
    }

    #[test]
    fn test_escape_dismisses() {
        let dir = fixture();
        let mut state = FilePickerState::new(Some(dir.path()));
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(PickerEvent::Dismiss)
        );
    }

    #[test]
    fn test_render_shows_selection_count() {
        let dir = fixture();
        let state = FilePickerState::new(Some(dir.path()));
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                FilePicker::new(&state, Theme::dark()).render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Select PDFs"));
        assert!(text.contains("0 file(s) selected"));
        assert!(text.contains("a.pdf"));
    }
}
