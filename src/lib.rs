//! # Nokor
//!
//! Retrieval engine for answering foreign-ownership questions about
//! Cambodian real-estate listings. Combines structured listing attributes
//! with retrieval-augmented generation over a static legal knowledge base.
//!
//! ## Overview
//!
//! The crate covers the retrieval core of the system:
//!
//! - an offline **index build**: knowledge documents are split into
//!   overlapping word-window chunks, embedded, and persisted as a flat
//!   similarity index (`nokor-indexer` binary);
//! - an online **retrieval path**: per request, a query built from the
//!   property type and the user's question is embedded and the nearest
//!   chunks are returned as one context string;
//! - a **fallback path**: when no index has been built, whole documents are
//!   selected by property-type and question-keyword rules.
//!
//! The HTTP layer, listing scraper and answer generator are collaborators
//! that sit outside this crate: they hand in a [`PropertyRecord`] plus a
//! question string and consume the returned knowledge text.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use nokor::{Config, KnowledgeRetriever, OpenAiEmbedder, PropertyListing, PropertyRecord};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nokor::AppError> {
//!     let config = Config::from_env()?;
//!     let embedder = Arc::new(OpenAiEmbedder::from_config(&config.embedding));
//!
//!     // Construct once at startup; share the handle with request handlers.
//!     let retriever = KnowledgeRetriever::new(embedder, config.retrieval);
//!
//!     let property = PropertyRecord::derive(PropertyListing {
//!         kind: "villa".parse().unwrap(),
//!         ..Default::default()
//!     });
//!     let knowledge = retriever
//!         .get_relevant_knowledge(&property, "Can a foreigner buy this villa?", true)
//!         .await?;
//!     println!("{}", knowledge);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`knowledge`] - Knowledge base loading and retrieval orchestration
//! - [`property`] - Property records and eligibility derivation
//! - [`rag`] - Chunking, embedding, similarity store, index builder
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration

#![warn(missing_docs)]

/// Knowledge base loading and retrieval orchestration.
pub mod knowledge;
/// Property records and foreign-ownership eligibility.
pub mod property;
/// Retrieval pipeline components (chunking, embeddings, store, builder).
pub mod rag;
/// Core types (requests, chunks, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use knowledge::{KnowledgeBase, KnowledgeRetriever};
pub use property::{OwnershipStructure, PropertyKind, PropertyListing, PropertyRecord};
pub use rag::embeddings::{Embedder, OpenAiEmbedder};
pub use rag::indexer::{build_index, BuildReport};
pub use types::{AppError, Result};
pub use utils::config::Config;
