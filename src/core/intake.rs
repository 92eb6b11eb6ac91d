//! # Upload Intake
//!
//! Presentation phase of the upload surface, the PDF filter applied to
//! candidate files, and the single transient error notice.
//!
//! ```text
//!   Idle ◀──▶ DragOver        (picker open / files poised)
//!     │          │
//!     └────┬─────┘
//!          ▼
//!      Uploading ──▶ Idle     (response or error)
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Message shown when a drop contains no acceptable files.
pub const NO_PDFS_MESSAGE: &str = "Please select PDF files only";
/// Fallback when an upload fails without any message at all.
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Failed to upload PDFs";

pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakePhase {
    #[default]
    Idle,
    DragOver,
    Uploading,
}

/// An auto-dismissing error message. At most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Intake {
    pub phase: IntakePhase,
    pub notice: Option<Notice>,
    pub notice_duration: Duration,
}

impl Default for Intake {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl Intake {
    pub fn new(notice_duration: Duration) -> Self {
        Self {
            phase: IntakePhase::Idle,
            notice: None,
            notice_duration,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == IntakePhase::Uploading
    }

    /// Show a notice, replacing whatever was showing.
    pub fn raise(&mut self, message: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once it has been visible for `notice_duration`.
    /// Returns true if something was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self.notice.as_ref().is_some_and(|n| {
            now.saturating_duration_since(n.raised_at) >= self.notice_duration
        });
        if expired {
            self.notice = None;
        }
        expired
    }
}

/// True for paths carrying a `.pdf` extension (any case).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Split candidates into (accepted PDFs, rejected others), order preserved.
pub fn partition_pdfs(paths: impl IntoIterator<Item = PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    paths.into_iter().partition(|p| is_pdf_path(p))
}
