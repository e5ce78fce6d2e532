//! Context retriever port - best-effort reference snippet lookup.

use async_trait::async_trait;
use thiserror::Error;

/// Port for retrieving reference snippets used to enrich generative
/// prompts.
///
/// Retrieval is best-effort: an empty result is valid, and callers must
/// proceed without context when the backend fails.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Returns up to `k` snippets ranked by relevance to `query`.
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError>;
}

/// Failures of the retrieval backend.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    #[error("Retrieval backend unavailable: {0}")]
    Unavailable(String),
}
