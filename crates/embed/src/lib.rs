//! MedSecure text embeddings
//!
//! One `Embedder` trait with two backends: Ollama for real sentence
//! embeddings and a deterministic local projection for offline use.

mod client;
mod embedder;
mod local;
mod types;

use medsecure_common::{AppConfig, EmbeddingBackend, Result};
use std::sync::Arc;
use tracing::info;

pub use client::OllamaEmbedder;
pub use embedder::{cosine_similarity, Embedder};
pub use local::{LocalEmbedder, LOCAL_MODEL_NAME};
pub use types::{EmbedRequest, EmbedResponse};

/// Build the configured embedder; called once at startup and shared
pub fn create_embedder(config: &AppConfig) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match config.embedding_backend {
        EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(
            &config.ollama_base_url,
            &config.embedding_model,
            config.embedding_dim,
        )?),
        EmbeddingBackend::Local => Arc::new(LocalEmbedder::new(config.embedding_dim)?),
    };

    info!(
        "Embedder ready - backend={:?}, model={}, dim={}",
        config.embedding_backend,
        embedder.model_name(),
        embedder.dimension()
    );
    Ok(embedder)
}
