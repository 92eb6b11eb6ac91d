//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{Backend, BackendError, ChatRequest, ChatResponse, UploadResponse};
use crate::core::types::Document;

/// A backend for tests that never touch the network. Every call succeeds
/// with an empty answer.
pub struct NoopBackend;

#[async_trait]
impl Backend for NoopBackend {
    fn base_url(&self) -> &str {
        "http://noop.test"
    }

    async fn upload(&self, _files: &[PathBuf]) -> Result<UploadResponse, BackendError> {
        Ok(UploadResponse {
            success: true,
            ..Default::default()
        })
    }

    async fn delete(&self, _name: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        Ok(ChatResponse {
            response: String::new(),
            sources: None,
        })
    }

    async fn list(&self) -> Result<Vec<Document>, BackendError> {
        Ok(Vec::new())
    }
}

/// Creates a test App with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend))
}
