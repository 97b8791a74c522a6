//! Deterministic, model-free embedder
//!
//! Harmonic token projection: each token is read as a base-2^16 integer, reduced
//! modulo a series of primes, and every residue is placed on the unit circle as
//! `(sin, cos)`. Token vectors are mean-pooled and L2-normalised.

use async_trait::async_trait;
use medsecure_common::{MedSecureError, Result};
use std::f64::consts::PI;

use crate::embedder::{zero_vector, Embedder};

/// Maximum token length (Unicode code points)
const MAX_TOKEN_LENGTH: usize = 64;

/// Model name reported for the local backend
pub const LOCAL_MODEL_NAME: &str = "local-htp";

/// First `n` primes, used as pairwise-coprime moduli
fn first_primes(n: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(n);
    let mut candidate = 2u64;
    while primes.len() < n {
        if primes
            .iter()
            .take_while(|p| *p * *p <= candidate)
            .all(|p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

/// Lowercased words split on whitespace and ASCII punctuation
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// In-process embedder with a fixed output dimension
#[derive(Debug, Clone)]
pub struct LocalEmbedder {
    moduli: Vec<u64>,
    dimension: usize,
}

impl LocalEmbedder {
    /// Create an embedder producing `dimension`-length vectors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(MedSecureError::config("Embedding dimension cannot be 0"));
        }

        Ok(Self {
            moduli: first_primes(dimension.div_ceil(2)),
            dimension,
        })
    }

    /// Synchronous embedding used by both trait methods
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return zero_vector(self.dimension);
        }

        let mut sum = vec![0.0f64; self.dimension];
        for token in &tokens {
            for (slot, value) in sum.iter_mut().zip(self.project_token(token)) {
                *slot += value;
            }
        }

        let count = tokens.len() as f64;
        for value in &mut sum {
            *value /= count;
        }

        let norm: f64 = sum.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            sum.iter().map(|x| (*x / norm) as f32).collect()
        } else {
            sum.iter().map(|x| *x as f32).collect()
        }
    }

    fn project_token(&self, token: &str) -> impl Iterator<Item = f64> + '_ {
        let n = token
            .chars()
            .take(MAX_TOKEN_LENGTH)
            .fold(0u64, |acc, c| acc.wrapping_mul(65536).wrapping_add(c as u64));

        self.moduli
            .iter()
            .flat_map(move |&m| {
                let theta = 2.0 * PI * ((n % m) as f64) / (m as f64);
                [theta.sin(), theta.cos()]
            })
            .take(self.dimension)
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_sync(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        LOCAL_MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::cosine_similarity;

    #[test]
    fn test_first_primes() {
        assert_eq!(first_primes(6), vec![2, 3, 5, 7, 11, 13]);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(LocalEmbedder::new(0).is_err());
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = LocalEmbedder::new(384).unwrap();
        let v = embedder.embed("").await.unwrap();
        assert_eq!(v.len(), 384);
        assert!(v.iter().all(|x| *x == 0.0));

        // punctuation-only input has no tokens either
        let v = embedder.embed(" ,. ").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn test_fixed_dimension() {
        let embedder = LocalEmbedder::new(384).unwrap();
        for text in [
            "Patient presents with headache and fever",
            "Cough and sore throat for 3 days",
            "x",
        ] {
            assert_eq!(embedder.embed(text).await.unwrap().len(), 384);
        }

        let odd = LocalEmbedder::new(7).unwrap();
        assert_eq!(odd.embed("fever").await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_deterministic_and_normalized() {
        let embedder = LocalEmbedder::new(384).unwrap();
        let a = embedder.embed("High blood pressure and dizziness").await.unwrap();
        let b = embedder.embed("High blood pressure and dizziness").await.unwrap();
        assert_eq!(a, b);

        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_case_insensitive_similarity() {
        let embedder = LocalEmbedder::new(384).unwrap();
        let a = embedder.embed("Headache and Fever").await.unwrap();
        let b = embedder.embed("headache and fever").await.unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = LocalEmbedder::new(384).unwrap();
        let texts = vec!["chest pain".to_string(), String::new()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("chest pain").await.unwrap());
        assert!(batch[1].iter().all(|x| *x == 0.0));
    }
}
