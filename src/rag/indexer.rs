//! Offline index builder.
//!
//! One-shot pipeline: load documents, chunk each with the configured window,
//! embed every chunk, persist the index as a named artifact triple. Safe to
//! re-run; a rebuild fully replaces the previously persisted index.

use crate::knowledge::loader::KnowledgeBase;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::Embedder;
use crate::rag::store::KnowledgeStore;
use crate::types::{KnowledgeChunk, Result};
use crate::utils::config::RetrievalConfig;
use std::sync::Arc;
use tracing::{info, instrument};

/// What a build produced, for operator visibility. Observational only;
/// the persisted result does not depend on it.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Chunk count per document, in load order.
    pub per_document: Vec<(String, usize)>,
    /// Total chunks embedded and persisted.
    pub total_chunks: usize,
}

/// Build and persist the similarity index from the knowledge directory.
#[instrument(skip(embedder, config))]
pub async fn build_index(
    embedder: Arc<dyn Embedder>,
    config: &RetrievalConfig,
) -> Result<BuildReport> {
    let knowledge = KnowledgeBase::load(&config.knowledge_dir).await?;
    let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;

    let mut batch: Vec<KnowledgeChunk> = Vec::new();
    let mut per_document = Vec::new();

    for document in knowledge.documents() {
        let chunks = chunker.chunk(&document.text);
        info!(source = %document.key, chunks = chunks.len(), "Chunked document");
        per_document.push((document.key.clone(), chunks.len()));

        for (chunk_id, text) in chunks.into_iter().enumerate() {
            batch.push(KnowledgeChunk {
                text,
                source: document.key.clone(),
                chunk_id,
            });
        }
    }

    let total_chunks = batch.len();
    info!(total = total_chunks, "Embedding chunks");

    let mut store = KnowledgeStore::new(embedder)?;
    store.add_chunks(&batch).await?;
    store.persist(&config.index_dir, &config.index_name).await?;

    let stats = store.stats();
    info!(
        total = total_chunks,
        dimension = stats.dimension,
        approx_bytes = stats.memory_bytes,
        name = %config.index_name,
        "Index built and persisted"
    );

    Ok(BuildReport {
        per_document,
        total_chunks,
    })
}
