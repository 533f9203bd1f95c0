//! Data models for skriv
//!
//! Defines the document structures exchanged with the backend. Backends
//! disagree about field naming and response envelopes; the `api` module
//! normalizes all of that before these types are produced.

use serde::{Deserialize, Serialize};

/// A document as seen by every consumer of this crate
///
/// The `id` is always a non-empty string, regardless of which identifier
/// field the backend used in its own representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Canonical identifier
    pub id: String,
    /// Display title, may be empty
    #[serde(default)]
    pub title: String,
    /// Body content, may be empty
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Create a document with the given id and fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Title to display, falling back to a placeholder for empty titles
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}

/// Payload for creating or updating a document
///
/// The backend assigns the id; a draft never carries one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
}

impl DocumentDraft {
    /// Create a draft with the given title and content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<Document> for DocumentDraft {
    fn from(doc: Document) -> Self {
        Self {
            title: doc.title,
            content: doc.content,
        }
    }
}
