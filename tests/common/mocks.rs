//! Mock implementations for testing.
//!
//! Provides a deterministic mock embedder so retrieval behavior can be
//! tested without a network round-trip to the real embedding service.

use async_trait::async_trait;
use nokor::types::{AppError, Result};
use nokor::Embedder;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock embedder with configurable, fully deterministic vectors.
///
/// Texts registered via [`MockEmbedder::with_vectors`] embed to exactly the
/// registered vector; any other text embeds to a vector derived from its
/// bytes, so repeated calls always agree. Can also be configured to fail
/// after a fixed number of calls to exercise partial-failure paths.
///
/// # Examples
///
/// ```ignore
/// // Deterministic embedder
/// let embedder = MockEmbedder::new(4);
///
/// // Pin specific texts to specific points in the space
/// let embedder = MockEmbedder::with_vectors(4, [("query", vec![1.0, 0.0, 0.0, 0.0])]);
///
/// // Fail on the third call
/// let embedder = MockEmbedder::failing_after(4, 2);
/// ```
pub struct MockEmbedder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Create a mock that derives a deterministic vector for every text.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock with pinned vectors for specific texts.
    pub fn with_vectors<I, S>(dimension: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        Self {
            dimension,
            vectors: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that succeeds for the first `n` calls, then fails.
    pub fn failing_after(dimension: usize, n: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
            fail_after: Some(n),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that fails on every call.
    pub fn failing(dimension: usize) -> Self {
        Self::failing_after(dimension, 0)
    }

    fn derive_vector(&self, text: &str) -> Vec<f32> {
        // FNV-style mixing of the text bytes, one lane per dimension.
        (0..self.dimension)
            .map(|lane| {
                let mut hash: u32 = 2166136261_u32.wrapping_add(lane as u32);
                for byte in text.bytes() {
                    hash ^= byte as u32;
                    hash = hash.wrapping_mul(16777619);
                }
                (hash % 1000) as f32 / 1000.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(n) = self.fail_after {
            if call >= n {
                return Err(AppError::Embedding("Mock embedding failure".to_string()));
            }
        }

        if let Some(vector) = self.vectors.get(text) {
            return Ok(vector.clone());
        }
        Ok(self.derive_vector(text))
    }
}
