//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields and are rebuilt each frame:
//! - `TitleBar`: Top bar with backend address and status line
//! - `UploadPanel`: Drop target whose caption follows the upload phase
//! - `Message`: A single chat bubble, with its citation block
//! - `Notice`: Error toast
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own state across frames and emit high-level events:
//! - `InputBox`: Question field
//! - `MessageList` / `MessageListState`: Scrollable transcript with layout caching
//! - `DocumentList` / `DocumentListState`: Uploaded PDFs with two-step delete
//! - `FilePicker` / `FilePickerState`: Modal file browser
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into `App`:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! TitleBar::new(app.backend.base_url(), &app.status_message, theme).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top bar)
//! ├── upload_panel.rs   (Drop target)
//! ├── document_list.rs  (Uploaded PDFs)
//! ├── message.rs        (Single chat bubble)
//! ├── message_list.rs   (Scrollable transcript)
//! ├── input_box.rs      (Question field)
//! ├── file_picker.rs    (Modal file browser)
//! └── notice.rs         (Error toast)
//! ```

pub mod document_list;
pub mod file_picker;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod notice;
pub mod title_bar;
pub mod upload_panel;

pub use document_list::{DocumentEvent, DocumentList, DocumentListState};
pub use file_picker::{FilePicker, FilePickerState, PickerEvent};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use notice::Notice;
pub use title_bar::TitleBar;
pub use upload_panel::{UploadEvent, UploadPanel, UploadPanelHandler};
