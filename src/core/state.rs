//! # Application State
//!
//! Core business state for pdfchat. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn Backend>     // remote service
//! ├── registry: Registry            // uploaded documents (shared list)
//! ├── conversation: Conversation    // transcript + busy flag
//! ├── intake: Intake                // upload phase + error notice
//! ├── status_message: String        // status bar text
//! ├── theme: ThemeMode              // light / dark
//! └── refreshing: bool              // GET /pdfs outstanding
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::ThemeMode;
use crate::backend::Backend;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;
use crate::core::intake::Intake;
use crate::core::registry::Registry;

pub struct App {
    pub backend: Arc<dyn Backend>,
    pub registry: Registry,
    pub conversation: Conversation,
    pub intake: Intake,
    pub status_message: String,
    pub theme: ThemeMode,
    pub refreshing: bool,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            registry: Registry::new(),
            conversation: Conversation::new(),
            intake: Intake::default(),
            status_message: String::from("Ready"),
            theme: ThemeMode::default(),
            refreshing: false,
        }
    }

    pub fn from_config(backend: Arc<dyn Backend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend);
        app.theme = config.theme;
        app.intake = Intake::new(config.notice_duration);
        app
    }
}

#[cfg(test)]
mod tests {
    use crate::core::intake::IntakePhase;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert!(app.registry.is_empty());
        assert!(app.conversation.turns().is_empty());
        assert!(!app.conversation.is_busy());
        assert_eq!(app.intake.phase, IntakePhase::Idle);
        assert!(app.intake.notice.is_none());
        assert_eq!(app.backend.base_url(), "http://noop.test");
    }
}
