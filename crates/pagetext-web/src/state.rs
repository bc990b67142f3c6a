use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use pagetext_core::models::config::PagetextConfig;
use pagetext_core::{DocumentStats, Extraction, TextEngine};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub config: PagetextConfig,
    pub documents: Mutex<DocumentStore>,
}

impl AppState {
    pub fn new(config: PagetextConfig) -> Self {
        let documents = Mutex::new(DocumentStore::new(config.server.max_documents));
        Self { config, documents }
    }

    pub fn documents(&self) -> MutexGuard<'_, DocumentStore> {
        // A panic while holding the lock leaves the map itself intact
        self.documents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// An uploaded PDF together with its full extraction.
pub struct StoredDocument {
    pub file_name: String,
    /// Original bytes, reopened for page-range extraction.
    pub data: Vec<u8>,
    pub engine: TextEngine,
    pub extraction: Extraction,
    pub stats: DocumentStats,
    pub uploaded_at: DateTime<Utc>,
}

/// Uploaded documents, oldest first, capped at `capacity`.
pub struct DocumentStore {
    capacity: usize,
    next_id: u64,
    entries: VecDeque<(u64, Arc<StoredDocument>)>,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            next_id: 1,
            entries: VecDeque::new(),
        }
    }

    /// Store a document and return its id, evicting the oldest when full.
    pub fn insert(&mut self, document: StoredDocument) -> u64 {
        while self.entries.len() >= self.capacity {
            if let Some((evicted, doc)) = self.entries.pop_front() {
                debug!(id = evicted, file = %doc.file_name, "Evicting stored document");
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back((id, Arc::new(document)));
        debug!(id, stored = self.entries.len(), "Stored document");
        id
    }

    pub fn get(&self, id: u64) -> Option<Arc<StoredDocument>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, doc)| Arc::clone(doc))
    }
}
