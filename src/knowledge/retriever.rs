//! Retrieval orchestrator.
//!
//! [`KnowledgeRetriever`] owns the lifecycle of the similarity store for the
//! process: constructed once at startup, handed by reference into request
//! handlers, restoring the persisted index lazily on first use. When no
//! index has been built it falls back to rule-based whole-document
//! selection; that is the only failure it converts into fallback behavior -
//! embedding errors and index corruption surface to the caller.

use crate::knowledge::loader::KnowledgeBase;
use crate::property::{PropertyKind, PropertyRecord};
use crate::rag::embeddings::Embedder;
use crate::rag::store::KnowledgeStore;
use crate::types::{AppError, Result};
use crate::utils::config::RetrievalConfig;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Orchestrates retrieval of knowledge relevant to a property question.
pub struct KnowledgeRetriever {
    config: RetrievalConfig,
    embedder: Arc<dyn Embedder>,
    /// Lazily restored store. `OnceCell` is the single-flight guard:
    /// concurrent first requests restore at most once and never observe a
    /// partially-restored index. `None` inside means "no index built yet".
    store: OnceCell<Option<Arc<KnowledgeStore>>>,
}

impl KnowledgeRetriever {
    /// Create a retriever. No I/O happens until the first retrieval call.
    pub fn new(embedder: Arc<dyn Embedder>, config: RetrievalConfig) -> Self {
        Self {
            config,
            embedder,
            store: OnceCell::new(),
        }
    }

    /// Produce the knowledge text relevant to a question about a property.
    ///
    /// With `use_vector_search` and a restorable index: embeds a query built
    /// from the property type and the question, and joins the `top_k`
    /// nearest chunk texts with a blank line (possibly empty). Otherwise
    /// falls back to [`Self::fallback_knowledge`]. An absent index is not an
    /// error; anything else that fails on the way is.
    #[instrument(skip(self, property, question), fields(kind = %property.kind()))]
    pub async fn get_relevant_knowledge(
        &self,
        property: &PropertyRecord,
        question: &str,
        use_vector_search: bool,
    ) -> Result<String> {
        if use_vector_search {
            if let Some(store) = self.store().await? {
                let query = format!(
                    "Property type: {}\nQuestion: {}",
                    property.kind(),
                    question
                );
                let hits = store.search(&query, self.config.top_k).await?;
                debug!(hits = hits.len(), "Vector search selected chunks");

                let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
                return Ok(texts.join("\n\n"));
            }
        }

        self.fallback_knowledge(property, question).await
    }

    /// Rule-based whole-document selection, used when no index exists.
    ///
    /// Type rules are exclusive (villa-or-land vs condo); the cost/fee rule
    /// is additive on top of either. No rule matching yields an empty
    /// string.
    async fn fallback_knowledge(
        &self,
        property: &PropertyRecord,
        question: &str,
    ) -> Result<String> {
        let knowledge = KnowledgeBase::load(&self.config.knowledge_dir).await?;
        let mut relevant: Vec<&str> = Vec::new();

        if property.kind() == PropertyKind::Villa || property.has_land {
            relevant.push(knowledge.get("villa_leasehold").unwrap_or_default());
        } else if property.kind() == PropertyKind::Condo {
            relevant.push(knowledge.get("condo_rules").unwrap_or_default());
        }

        let question = question.to_lowercase();
        if question.contains("cost") || question.contains("fee") {
            relevant.push(knowledge.get("costs_fees").unwrap_or_default());
        }

        debug!(documents = relevant.len(), "Fallback selected documents");
        Ok(relevant.join("\n\n"))
    }

    /// Get the restored store, attempting the restore on first call.
    async fn store(&self) -> Result<Option<&Arc<KnowledgeStore>>> {
        let slot = self
            .store
            .get_or_try_init(|| async {
                match KnowledgeStore::restore(
                    self.embedder.clone(),
                    &self.config.index_dir,
                    &self.config.index_name,
                )
                .await?
                {
                    Some(store) => Ok::<Option<Arc<KnowledgeStore>>, AppError>(Some(Arc::new(store))),
                    None => {
                        warn!(
                            name = %self.config.index_name,
                            path = ?self.config.index_dir,
                            "Similarity index absent; run nokor-indexer to build it. \
                             Falling back to document selection"
                        );
                        Ok(None)
                    }
                }
            })
            .await?;

        Ok(slot.as_ref())
    }
}
