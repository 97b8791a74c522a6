use async_trait::async_trait;
use medsecure_common::{MedSecureError, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::embedder::{non_empty_inputs, scatter, zero_vector, Embedder};
use crate::types::{EmbedRequest, EmbedResponse};

/// Embedder backed by an Ollama server (`/api/embed`)
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    dimension: usize,
    max_retries: u32,
    client: Client,
}

impl OllamaEmbedder {
    /// Create new Ollama embedder
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| MedSecureError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama embedder initialized: {} (model={}, dim={})", base_url, model, dimension);
        Ok(Self {
            base_url,
            model,
            dimension,
            max_retries: 3,
            client,
        })
    }

    /// Override the number of attempts per request (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await
            .map_err(|e| MedSecureError::network(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }

    /// Embed non-empty inputs with retry
    async fn embed_with_retry(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);
        let expected = input.len();

        debug!("Generating embeddings - Model: {}, Inputs: {}", self.model, expected);

        let request = EmbedRequest {
            model: self.model.clone(),
            input,
        };

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_embed(&url, &request).await {
                Ok(embeddings) => return self.check_response(embeddings, expected),
                Err(e) => {
                    if attempt < self.max_retries {
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                        tracing::warn!(
                            "Embedding request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt,
                            self.max_retries,
                            e,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| MedSecureError::network("All retries failed")))
    }

    /// Single attempt to generate embeddings
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<Vec<f32>>> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| MedSecureError::network(format!("Failed to send embedding request: {}", e)))?
            .error_for_status()
            .map_err(|e| MedSecureError::network(format!("Ollama embedding API error: {}", e)))?;

        let result: EmbedResponse = response.json().await
            .map_err(|e| MedSecureError::embedding(format!("Failed to parse embedding response: {}", e)))?;

        Ok(result.embeddings)
    }

    /// Backend output must have one vector per input, each of the configured dimension
    fn check_response(&self, embeddings: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>> {
        if embeddings.len() != expected {
            return Err(MedSecureError::embedding(format!(
                "Expected {} embeddings from Ollama, got {}",
                expected,
                embeddings.len()
            )));
        }

        if let Some(bad) = embeddings.iter().find(|e| e.len() != self.dimension) {
            return Err(MedSecureError::embedding(format!(
                "Model {} returned dimension {}, configured {}",
                self.model,
                bad.len(),
                self.dimension
            )));
        }

        debug!("Received {} embedding(s) - Dimension: {}", embeddings.len(), self.dimension);
        Ok(embeddings)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Ok(zero_vector(self.dimension));
        }

        let mut embeddings = self.embed_with_retry(vec![text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| MedSecureError::embedding("Empty embedding from Ollama"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let (positions, input) = non_empty_inputs(texts);
        if input.is_empty() {
            return Ok(scatter(texts.len(), self.dimension, &positions, Vec::new()));
        }

        info!("Generating embeddings for {} texts...", texts.len());
        let computed = self.embed_with_retry(input).await?;
        Ok(scatter(texts.len(), self.dimension, &positions, computed))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) refuses connections on test hosts, so any request fails fast
    fn unreachable() -> OllamaEmbedder {
        OllamaEmbedder::new("http://127.0.0.1:9/", "all-minilm", 384)
            .unwrap()
            .with_max_retries(1)
    }

    #[test]
    fn test_embedder_creation() {
        let embedder = unreachable();
        assert_eq!(embedder.base_url, "http://127.0.0.1:9");
        assert_eq!(embedder.model_name(), "all-minilm");
        assert_eq!(embedder.dimension(), 384);
    }

    #[tokio::test]
    async fn test_empty_text_skips_backend() {
        let embedding = unreachable().embed("").await.unwrap();
        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let embedder = unreachable();
        assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());

        let zeros = embedder
            .embed_batch(&[String::new(), String::new()])
            .await
            .unwrap();
        assert_eq!(zeros.len(), 2);
        assert!(zeros.iter().all(|v| v.len() == 384 && v.iter().all(|x| *x == 0.0)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let err = unreachable().embed("headache").await.unwrap_err();
        assert!(matches!(err, MedSecureError::Network(_)));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let embedder = unreachable();
        assert!(embedder.check_response(vec![vec![0.0; 384]], 1).is_ok());
        assert!(embedder.check_response(vec![vec![0.0; 768]], 1).is_err());
        assert!(embedder.check_response(vec![], 1).is_err());
    }
}
