//! Knowledge store: an embedder paired with a flat vector index.
//!
//! [`KnowledgeStore`] owns the text-in / text-out surface of the similarity
//! index: it embeds chunk texts on ingest and query texts on search, and
//! delegates storage, ranking and persistence to [`FlatIndex`].

use crate::rag::embeddings::Embedder;
use crate::types::{KnowledgeChunk, Result};
use nokor_vector::{Error as IndexError, FlatIndex, IndexStats, MetadataValue, SearchHit, VectorMetadata};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// An embedding-backed similarity store over knowledge chunks.
pub struct KnowledgeStore {
    embedder: Arc<dyn Embedder>,
    index: FlatIndex,
}

impl KnowledgeStore {
    /// Create an empty store sized to the embedder's dimensionality.
    pub fn new(embedder: Arc<dyn Embedder>) -> Result<Self> {
        let index = FlatIndex::new(embedder.dimension())?;
        Ok(Self { embedder, index })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Embed and append a batch of chunks, preserving input order.
    ///
    /// Streaming-append model: if embedding chunk `i` fails, the operation
    /// aborts with exactly the chunks before `i` committed. There is no
    /// rollback of already-appended chunks; the parallel sequences stay
    /// aligned at every point. Returns the number of chunks appended.
    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn add_chunks(&mut self, chunks: &[KnowledgeChunk]) -> Result<usize> {
        for chunk in chunks {
            let vector = self.embedder.embed(&chunk.text).await?;
            let metadata = VectorMetadata::from_pairs([
                ("source", MetadataValue::String(chunk.source.clone())),
                ("chunk_id", MetadataValue::Int(chunk.chunk_id as i64)),
            ]);
            self.index.append(vector, chunk.text.clone(), metadata)?;
        }

        debug!(appended = chunks.len(), total = self.index.len(), "Added chunks");
        Ok(chunks.len())
    }

    /// Embed the query text and return the `k` nearest chunks, ascending by
    /// distance. Embedding failures propagate; an empty store returns an
    /// empty result.
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed(query).await?;
        let hits = self.index.search(&vector, k)?;
        debug!(hits = hits.len(), "Search completed");
        Ok(hits)
    }

    /// Persist the index under `dir` as the named artifact triple.
    pub async fn persist(&self, dir: &Path, name: &str) -> Result<()> {
        self.index.persist(dir, name).await?;
        Ok(())
    }

    /// Restore a persisted store.
    ///
    /// `Ok(None)` when no index was built yet; corruption fails loudly, as
    /// does a persisted dimensionality that disagrees with the embedder.
    pub async fn restore(
        embedder: Arc<dyn Embedder>,
        dir: &Path,
        name: &str,
    ) -> Result<Option<Self>> {
        let Some(index) = FlatIndex::restore(dir, name).await? else {
            return Ok(None);
        };

        if index.dimension() != embedder.dimension() {
            return Err(IndexError::Persistence(format!(
                "Persisted index '{}' is {}-dimensional but the embedder \
                 produces {}-dimensional vectors",
                name,
                index.dimension(),
                embedder.dimension()
            ))
            .into());
        }

        Ok(Some(Self { embedder, index }))
    }

    /// Statistics of the underlying index.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
