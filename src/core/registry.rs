//! # Document Registry
//!
//! The client-held list of documents the backend knows about. Owned by
//! `App`; upload and delete results reach it only through the reducer.

use log::{debug, warn};

use crate::core::types::Document;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    documents: Vec<Document>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Append a batch in order. An entry whose id is already present
    /// replaces the earlier one in place, so ids stay unique.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Document>) {
        for doc in batch {
            if let Some(existing) = self.documents.iter_mut().find(|d| d.id == doc.id) {
                warn!("Document id {} already registered, replacing entry", doc.id);
                *existing = doc;
            } else {
                self.documents.push(doc);
            }
        }
    }

    /// Remove every entry with the given display name. Returns how many went.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.documents.len();
        self.documents.retain(|d| d.name != name);
        let removed = before - self.documents.len();
        debug!("Removed {} registry entries named {}", removed, name);
        removed
    }

    /// Replace the whole set (used by the backend listing).
    pub fn replace(&mut self, documents: Vec<Document>) {
        self.documents.clear();
        self.extend(documents);
    }
}
