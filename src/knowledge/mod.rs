//! Knowledge base loading and retrieval orchestration.

pub mod loader;
pub mod retriever;

pub use loader::{KnowledgeBase, KNOWLEDGE_SOURCES};
pub use retriever::KnowledgeRetriever;
