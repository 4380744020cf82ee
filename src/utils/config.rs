//! Environment-driven application configuration.

use crate::types::{AppError, Result};
use std::env;
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding service settings.
    pub embedding: EmbeddingConfig,
    /// Retrieval and index-build settings.
    pub retrieval: RetrievalConfig,
}

/// Embedding service settings.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// API key for the embedding service.
    pub api_key: String,
    /// Optional API base override (compatible gateways, tests).
    pub api_base: Option<String>,
    /// Embedding model identifier.
    pub model: String,
    /// Dimensionality of the model's vectors.
    pub dimension: usize,
}

/// Retrieval and index-build settings.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Directory holding the knowledge documents.
    pub knowledge_dir: PathBuf,
    /// Directory holding the persisted index artifacts.
    pub index_dir: PathBuf,
    /// Base name of the persisted index artifact triple.
    pub index_name: String,
    /// Number of nearest chunks returned per query.
    pub top_k: usize,
    /// Chunk window size in words.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in words.
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: PathBuf::from("knowledge"),
            index_dir: PathBuf::from("data/index"),
            index_name: "knowledge_base".to_string(),
            top_k: 3,
            chunk_size: 400,
            chunk_overlap: 50,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// `OPENAI_API_KEY` is required; everything else has defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = RetrievalConfig::default();

        Ok(Config {
            embedding: EmbeddingConfig {
                api_key: env::var("OPENAI_API_KEY").map_err(|_| {
                    AppError::InvalidConfiguration("OPENAI_API_KEY is not set".to_string())
                })?,
                api_base: env::var("OPENAI_API_BASE").ok(),
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                dimension: parse_var("EMBEDDING_DIMENSION", 1536)?,
            },
            retrieval: RetrievalConfig {
                knowledge_dir: env::var("KNOWLEDGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.knowledge_dir),
                index_dir: env::var("INDEX_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.index_dir),
                index_name: env::var("INDEX_NAME").unwrap_or(defaults.index_name),
                top_k: parse_var("RETRIEVAL_TOP_K", defaults.top_k)?,
                chunk_size: parse_var("CHUNK_SIZE", defaults.chunk_size)?,
                chunk_overlap: parse_var("CHUNK_OVERLAP", defaults.chunk_overlap)?,
            },
        })
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            AppError::InvalidConfiguration(format!("{} must be an integer, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
