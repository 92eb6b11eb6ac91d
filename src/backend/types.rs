//! Wire types for the question-answering backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Citation, Document};

/// One file record in an upload response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub id: String,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UploadedFile {
    pub fn to_document(&self) -> Document {
        Document {
            name: self.filename.clone(),
            id: self.id.clone(),
            pages: self.pages,
        }
    }
}

/// Body of `POST /upload`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body sent to `POST /chat`. An empty `pdf_ids` means "search every document".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub text: String,
    pub pdf_ids: Vec<String>,
}

impl ChatRequest {
    pub fn all_documents(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pdf_ids: Vec::new(),
        }
    }
}

/// Body of `POST /chat`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Option<Vec<Citation>>,
}

/// Per-document metadata in the `GET /pdfs` listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PdfInfo {
    pub id: String,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `GET /pdfs`, keyed by filename.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ListResponse {
    #[serde(default)]
    pub pdfs: BTreeMap<String, PdfInfo>,
}

impl ListResponse {
    /// Documents sorted by filename.
    pub fn into_documents(self) -> Vec<Document> {
        self.pdfs
            .into_iter()
            .map(|(name, info)| Document {
                name,
                id: info.id,
                pages: info.pages,
            })
            .collect()
    }
}

/// Shapes servers use to report errors: FastAPI's `detail`, or `error`/`message`.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    error: Option<String>,
    message: Option<String>,
}

/// Pull a human-readable message out of an error response body, if it has one.
pub fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = parsed.detail.and_then(|d| match d {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        // FastAPI validation errors come back as a list of objects
        other => Some(other.to_string()),
    });
    detail
        .or(parsed.error)
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}
