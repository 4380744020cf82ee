//! Flat exact-search index.
//!
//! Stores vectors, source texts, and metadata as three parallel
//! insertion-ordered sequences and answers k-nearest-neighbor queries by
//! scanning every stored vector. Exact search is the right trade at
//! knowledge-base scale (hundreds of chunks); there is no graph to maintain
//! and results are fully deterministic.

use crate::distance::squared_euclidean;
use crate::error::{Error, Result};
use crate::types::{SearchHit, VectorMetadata};
use crate::IndexStats;
use std::path::Path;
use tracing::trace;

/// A flat vector index over three parallel sequences.
///
/// Invariant: `vectors`, `texts` and `metadata` always have equal length;
/// position `i` in each refers to the same logical entry. The index is
/// append-only while being built and read-only while serving, so `search`
/// takes `&self` and needs no internal locking.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    texts: Vec<String>,
    metadata: Vec<VectorMetadata>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if `dimension` is zero.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::Configuration(
                "Dimensions must be > 0".to_string(),
            ));
        }

        Ok(Self {
            dimension,
            vectors: Vec::new(),
            texts: Vec::new(),
            metadata: Vec::new(),
        })
    }

    /// Get the vector dimensionality.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the number of entries in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append one entry to the index.
    ///
    /// The vector, its source text and its metadata land at the same position
    /// in the three parallel sequences.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the vector has the wrong length,
    /// or `Error::InvalidVector` if it contains NaN or Inf.
    pub fn append(
        &mut self,
        vector: Vec<f32>,
        text: String,
        metadata: VectorMetadata,
    ) -> Result<()> {
        self.validate(&vector)?;

        self.vectors.push(vector);
        self.texts.push(text);
        self.metadata.push(metadata);

        trace!(position = self.vectors.len() - 1, "Appended entry");
        Ok(())
    }

    /// Search for the `k` nearest entries to the query vector.
    ///
    /// Results are ordered by ascending squared Euclidean distance; ties are
    /// broken by insertion order (earlier-inserted wins). If the index holds
    /// fewer than `k` entries, all of them are returned. An empty index
    /// yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` or `Error::InvalidVector` for a
    /// malformed query vector.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        self.validate(query)?;

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, squared_euclidean(query, v)))
            .collect();

        // Stored vectors and the query are validated finite, so total_cmp
        // gives a total order; the index tiebreak keeps earlier entries first.
        scored.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, distance)| SearchHit {
                text: self.texts[i].clone(),
                metadata: self.metadata[i].clone(),
                distance,
            })
            .collect())
    }

    /// Persist the index as a named artifact triple under `dir`.
    ///
    /// See [`crate::persistence::save_index`].
    pub async fn persist(&self, dir: &Path, name: &str) -> Result<()> {
        crate::persistence::save_index(dir, name, self).await
    }

    /// Restore a previously persisted index.
    ///
    /// Returns `Ok(None)` when any of the three expected artifacts is absent
    /// (no index built yet); a present-but-corrupt triple fails loudly.
    ///
    /// See [`crate::persistence::load_index`].
    pub async fn restore(dir: &Path, name: &str) -> Result<Option<Self>> {
        crate::persistence::load_index(dir, name).await
    }

    /// Get index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entry_count: self.len(),
            dimension: self.dimension,
            memory_bytes: self.memory_usage(),
        }
    }

    fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        if vector.iter().any(|v| v.is_nan() || v.is_infinite()) {
            return Err(Error::InvalidVector(
                "Vector contains NaN or Inf".to_string(),
            ));
        }

        Ok(())
    }

    /// Estimate memory usage in bytes.
    fn memory_usage(&self) -> usize {
        let vector_bytes: usize = self.vectors.iter().map(|v| v.len() * 4).sum();
        let text_bytes: usize = self.texts.iter().map(|t| t.len()).sum();
        let meta_bytes: usize = self.metadata.len() * 100; // Rough estimate

        vector_bytes + text_bytes + meta_bytes
    }

    pub(crate) fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub(crate) fn texts(&self) -> &[String] {
        &self.texts
    }

    pub(crate) fn metadata(&self) -> &[VectorMetadata] {
        &self.metadata
    }

    /// Rebuild an index from persisted parts.
    ///
    /// The caller (persistence layer) is responsible for having verified that
    /// the three sequences are aligned.
    pub(crate) fn from_parts(
        dimension: usize,
        vectors: Vec<Vec<f32>>,
        texts: Vec<String>,
        metadata: Vec<VectorMetadata>,
    ) -> Self {
        debug_assert_eq!(vectors.len(), texts.len());
        debug_assert_eq!(vectors.len(), metadata.len());

        Self {
            dimension,
            vectors,
            texts,
            metadata,
        }
    }
}
