//! Embedding client tests against a mocked OpenAI-compatible endpoint.

use nokor::types::AppError;
use nokor::{Embedder, OpenAiEmbedder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn embedding_body(embedding: &[f32]) -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "data": [{
            "object": "embedding",
            "index": 0,
            "embedding": embedding,
        }],
        "model": "text-embedding-3-small",
        "usage": {"prompt_tokens": 8, "total_tokens": 8}
    })
}

#[tokio::test]
async fn test_embed_returns_service_vector() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_body(&[0.1, 0.2, 0.3, 0.4])))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new("test-key", Some(&server.uri()), "text-embedding-3-small", 4);
    let vector = embedder.embed("leasehold terms").await.unwrap();

    assert_eq!(vector, vec![0.1, 0.2, 0.3, 0.4]);
    assert_eq!(embedder.dimension(), 4);
}

#[tokio::test]
async fn test_service_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "Invalid input",
                "type": "invalid_request_error",
                "param": null,
                "code": null
            }
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new("test-key", Some(&server.uri()), "text-embedding-3-small", 4);
    let result = embedder.embed("leasehold terms").await;

    assert!(matches!(result, Err(AppError::Embedding(_))));
}

#[tokio::test]
async fn test_wrong_dimension_response_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_body(&[0.1, 0.2])))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new("test-key", Some(&server.uri()), "text-embedding-3-small", 4);
    let result = embedder.embed("leasehold terms").await;

    // A vector of the wrong length must never reach the index.
    assert!(matches!(result, Err(AppError::Embedding(_))));
}

#[tokio::test]
async fn test_empty_data_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 0, "total_tokens": 0}
        })))
        .mount(&server)
        .await;

    let embedder = OpenAiEmbedder::new("test-key", Some(&server.uri()), "text-embedding-3-small", 4);
    let result = embedder.embed("leasehold terms").await;

    assert!(matches!(result, Err(AppError::Embedding(_))));
}
