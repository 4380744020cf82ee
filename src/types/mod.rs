//! Core types (knowledge chunks, documents, errors).

use serde::{Deserialize, Serialize};

// ============= Knowledge Types =============

/// A named knowledge document loaded from the knowledge directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Stable document key (e.g. `villa_leasehold`).
    pub key: String,
    /// Full document text; empty when the backing file was absent.
    pub text: String,
}

/// A word-window slice of a knowledge document, the unit of indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// The chunk text (non-empty).
    pub text: String,
    /// Key of the originating document.
    pub source: String,
    /// 0-based sequence number within the source document. Traceability
    /// only; never used for lookup.
    pub chunk_id: usize,
}

// ============= Error Types =============

/// Application error type for the retrieval engine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad caller-supplied parameters (e.g. chunk overlap >= chunk size).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The embedding service failed or returned a malformed response.
    /// Never silently substituted with a zero vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Error from the vector index (dimension mismatch, persistence
    /// corruption, I/O).
    #[error("Vector index error: {0}")]
    Index(#[from] nokor_vector::Error),

    /// Knowledge base could not be read.
    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
