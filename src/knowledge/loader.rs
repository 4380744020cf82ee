//! Knowledge base loader.
//!
//! Reads the fixed set of legal knowledge documents from the knowledge
//! directory. A missing file degrades to a present-but-empty document so
//! the rest of the pipeline never sees a missing key; any other I/O failure
//! is an error.

use crate::types::{KnowledgeDocument, Result};
use std::path::Path;
use tracing::warn;

/// Fixed document set: (document key, file name).
///
/// The build batch is assembled in this order, so it must stay stable.
pub const KNOWLEDGE_SOURCES: &[(&str, &str)] = &[
    ("villa_leasehold", "villa_leasehold.md"),
    ("condo_rules", "condo_rules.md"),
    ("costs_fees", "costs_fees.md"),
];

/// The loaded knowledge base: every key from [`KNOWLEDGE_SOURCES`] is
/// present, in declaration order.
pub struct KnowledgeBase {
    documents: Vec<KnowledgeDocument>,
}

impl KnowledgeBase {
    /// Load all knowledge documents from `dir`.
    pub async fn load(dir: &Path) -> Result<Self> {
        let mut documents = Vec::with_capacity(KNOWLEDGE_SOURCES.len());

        for (key, file_name) in KNOWLEDGE_SOURCES {
            let path = dir.join(file_name);
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(key, path = ?path, "Knowledge file missing; loading as empty");
                    String::new()
                }
                Err(e) => return Err(e.into()),
            };

            documents.push(KnowledgeDocument {
                key: key.to_string(),
                text,
            });
        }

        Ok(Self { documents })
    }

    /// Get a document's text by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.text.as_str())
    }

    /// All documents in declaration order.
    pub fn documents(&self) -> &[KnowledgeDocument] {
        &self.documents
    }
}
