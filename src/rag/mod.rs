//! Retrieval pipeline components.
//!
//! # Module Structure
//!
//! - [`chunker`] - Overlapping word-window chunking of documents
//! - [`embeddings`] - Embedding service client ([`embeddings::Embedder`] seam)
//! - [`store`] - Embedder + flat index composed into a text-level store
//! - [`indexer`] - Offline build pipeline (load, chunk, embed, persist)
//!
//! # Pipeline
//!
//! 1. **Ingestion** (offline) - Documents are chunked and embedded
//! 2. **Storage** - Embeddings persisted as a named artifact triple
//! 3. **Retrieval** (serving) - Query embedded, nearest chunks returned

pub mod chunker;
pub mod embeddings;
pub mod indexer;
pub mod store;
