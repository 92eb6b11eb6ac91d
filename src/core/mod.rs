//! # Core Application Logic
//!
//! This module contains pdfchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Backend   │
//!             │  Adapter   │─Effect──▶│  (reqwest) │
//!             │ (ratatui)  │◀─Action──│            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`registry`]: The list of uploaded documents
//! - [`conversation`]: Transcript and the one-request-at-a-time guard
//! - [`intake`]: Upload phase, PDF filter, error notice
//! - [`types`]: Document, ChatTurn, Citation
//! - [`config`]: Settings file and override resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod intake;
pub mod registry;
pub mod state;
pub mod types;
