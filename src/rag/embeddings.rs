//! Embedding client for the external embedding service.
//!
//! [`Embedder`] is the seam the rest of the pipeline is written against;
//! [`OpenAiEmbedder`] is the production implementation. The primitive is
//! single-attempt: a failed round-trip surfaces as [`AppError::Embedding`]
//! and is never papered over with a zero vector, which would silently
//! corrupt nearest-neighbor ranking.

use crate::types::{AppError, Result};
use crate::utils::config::EmbeddingConfig;
use async_openai::{config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;

/// Maps a text string to a fixed-dimension dense vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Dimensionality of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed a single text. One round-trip, no internal retries.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Embedder backed by the OpenAI embeddings API.
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    /// Create an embedder for the given model and expected dimensionality.
    ///
    /// `api_base` overrides the API endpoint (compatible gateways, tests).
    pub fn new(api_key: &str, api_base: Option<&str>, model: &str, dimension: usize) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            dimension,
        }
    }

    /// Create an embedder from application configuration.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            &config.api_key,
            config.api_base.as_deref(),
            &config.model,
            config.dimension,
        )
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(text)
            .build()
            .map_err(|e| AppError::Embedding(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| AppError::Embedding(format!("Embedding API error: {}", e)))?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AppError::Embedding("Empty embedding response".to_string()))?;

        if embedding.len() != self.dimension {
            return Err(AppError::Embedding(format!(
                "Expected a {}-dimensional embedding, got {}",
                self.dimension,
                embedding.len()
            )));
        }

        Ok(embedding)
    }
}
