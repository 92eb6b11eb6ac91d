//! # Backend
//!
//! Everything the client knows about the question-answering service: the
//! `Backend` trait the event loop calls through, the error type, and the
//! wire types for the endpoints.
//!
//! | Call   | Request                    | Used by          |
//! |--------|----------------------------|------------------|
//! | Upload | `POST /upload` (multipart) | upload panel     |
//! | Delete | `DELETE /pdf/{name}`       | document list    |
//! | Chat   | `POST /chat` (JSON)        | conversation     |
//! | List   | `GET /pdfs`                | refresh (Ctrl+L) |
//!
//! Each call is one request and one response. Nothing is retried.

pub mod http;
pub mod types;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::types::Document;
pub use http::HttpBackend;
pub use types::{ChatRequest, ChatResponse, UploadResponse, UploadedFile};

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Client misconfigured (unparseable base URL, bad header).
    Config(String),
    /// The request never got a response (refused, timeout, DNS).
    Network(String),
    /// The server answered with a non-2xx status. `message` is whatever
    /// explanation the body carried.
    Api {
        status: u16,
        message: Option<String>,
    },
    /// The response body was not what we expected.
    Parse(String),
    /// A local file could not be read for upload.
    Io(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => match message {
                Some(message) => write!(f, "API error (HTTP {status}): {message}"),
                None => write!(f, "Request failed with status code {status}"),
            },
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
            BackendError::Io(msg) => write!(f, "file error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl BackendError {
    /// Text to show a user: the server's own message if it sent one, else
    /// the transport-level description, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = match self {
            BackendError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

/// The remote service, as seen by the event loop.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Base address requests are sent to (shown in the title bar).
    fn base_url(&self) -> &str;

    /// Send the files as one multipart request with a `files` field each.
    async fn upload(&self, files: &[PathBuf]) -> Result<UploadResponse, BackendError>;

    /// Remove a document by display name. The response body is ignored.
    async fn delete(&self, name: &str) -> Result<(), BackendError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    /// Documents the backend currently has, sorted by name.
    async fn list(&self) -> Result<Vec<Document>, BackendError>;
}
