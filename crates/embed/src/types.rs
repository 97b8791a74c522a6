use serde::{Deserialize, Serialize};

/// Ollama `/api/embed` request
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    /// Model name (e.g., "all-minilm")
    pub model: String,

    /// Texts to embed, one vector per entry
    pub input: Vec<String>,
}

/// Ollama `/api/embed` response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// Model name echoed by the server
    #[serde(default)]
    pub model: String,

    /// One embedding per input
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}
