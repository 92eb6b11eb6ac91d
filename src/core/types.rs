//! # Domain Types
//!
//! The three records the client deals in: documents known to the backend,
//! turns in the conversation, and the citations attached to answers.

use serde::{Deserialize, Serialize};

/// Fixed assistant text used when a chat request fails.
pub const CHAT_FAILURE_TEXT: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// A PDF registered with the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    /// Display filename. Not necessarily unique.
    pub name: String,
    /// Backend-assigned identifier. Unique within the registry.
    pub id: String,
    /// Page count, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl Document {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            pages: None,
        }
    }
}

/// A supporting excerpt returned alongside an answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Citation {
    pub text: String,
    pub page: u32,
    pub pdf_name: String,
    pub similarity: f64,
}

impl Citation {
    /// The one-line attribution shown under an answer, e.g. `x.pdf (Page 3)`.
    pub fn label(&self) -> String {
        format!("{} (Page {})", self.pdf_name, self.page)
    }
}

/// One message in the transcript. Never mutated after it is pushed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub text: String,
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Citation>>,
    /// Set on the synthesized turn that stands in for a failed request.
    #[serde(default)]
    pub failed: bool,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            sources: None,
            failed: false,
        }
    }

    pub fn assistant(text: impl Into<String>, sources: Option<Vec<Citation>>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            sources,
            failed: false,
        }
    }

    pub fn failure() -> Self {
        Self {
            text: CHAT_FAILURE_TEXT.to_string(),
            is_user: false,
            sources: None,
            failed: true,
        }
    }

    /// Citation lines in receipt order (empty when the turn has none).
    pub fn citation_labels(&self) -> Vec<String> {
        self.sources
            .iter()
            .flatten()
            .map(Citation::label)
            .collect()
    }
}
