//! # nokor-vector
//!
//! A pure-Rust embedded flat vector index with exact nearest-neighbor search.
//!
//! ## Features
//!
//! - **Pure Rust**: No native dependencies, compiles anywhere Rust does
//! - **Exact search**: Brute-force squared-L2 scan, fully deterministic
//! - **Parallel storage**: Vectors, source texts and metadata kept aligned
//! - **Atomic persistence**: Named artifact triple written as a unit
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nokor_vector::{FlatIndex, VectorMetadata};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nokor_vector::Error> {
//!     // Create an index for 1536-dimensional vectors
//!     let mut index = FlatIndex::new(1536)?;
//!
//!     // Append an entry (vector + source text + metadata)
//!     let embedding = vec![0.1f32; 1536];
//!     index.append(embedding, "chunk text".into(), VectorMetadata::new())?;
//!
//!     // Search for the k nearest entries
//!     let query = vec![0.1f32; 1536];
//!     let hits = index.search(&query, 3)?;
//!
//!     // Persist and restore as a named artifact triple
//!     index.persist("data/index".as_ref(), "knowledge_base").await?;
//!     let restored = FlatIndex::restore("data/index".as_ref(), "knowledge_base").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! At knowledge-base scale (hundreds of chunks) an exact scan answers in
//! microseconds; there is no approximate index to tune and search results
//! are reproducible bit-for-bit across persist/restore.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;
pub mod persistence;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use index::FlatIndex;
pub use types::{MetadataValue, SearchHit, VectorMetadata};

/// Statistics about an index.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IndexStats {
    /// Number of entries in the index.
    pub entry_count: usize,
    /// Dimensionality of vectors.
    pub dimension: usize,
    /// Approximate memory usage in bytes.
    pub memory_bytes: usize,
}
