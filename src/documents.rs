//! In-memory store of open documents.
//!
//! The server runs full document sync: every change notification carries the
//! complete new text, so the store is a plain uri → text map with
//! latest-write-wins semantics. URIs are opaque keys; no normalization.

use crate::types::TextDocumentContentChangeEvent;
use std::collections::HashMap;

/// The set of documents the client currently has open.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, String>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, silently replacing any previous text for the URI.
    pub fn open(&mut self, uri: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(uri.into(), text.into());
    }

    /// Replace a document's text wholesale.
    ///
    /// Under full sync exactly one change event carrying the complete new text
    /// is expected; if the client sends more, only the first is applied.
    /// Incremental diffs are not supported.
    pub fn change(&mut self, uri: impl Into<String>, changes: &[TextDocumentContentChangeEvent]) {
        if let Some(change) = changes.first() {
            self.documents.insert(uri.into(), change.text.clone());
        }
    }

    /// Remove a document. Closing an unknown URI is a no-op.
    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
    }

    /// The current text of a document, or the empty string for unknown URIs.
    pub fn get(&self, uri: &str) -> &str {
        self.documents.get(uri).map_or("", String::as_str)
    }
}
