use async_trait::async_trait;
use medsecure_common::Result;

/// Maps text to a fixed-length vector
///
/// Implementations must return `dimension()` floats for every input, and the
/// zero vector for an empty string, without consulting the backend.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts together; output order matches input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Length of every produced vector
    fn dimension(&self) -> usize;

    /// Model identifier reported to callers
    fn model_name(&self) -> &str;
}

/// Zero vector of the given dimension
pub fn zero_vector(dimension: usize) -> Vec<f32> {
    vec![0.0; dimension]
}

/// Split a batch into the non-empty texts that need the backend and their positions
pub(crate) fn non_empty_inputs(texts: &[String]) -> (Vec<usize>, Vec<String>) {
    texts
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_empty())
        .map(|(i, t)| (i, t.clone()))
        .unzip()
}

/// Reassemble a batch: computed vectors go back to their positions, the rest stay zero
pub(crate) fn scatter(
    len: usize,
    dimension: usize,
    positions: &[usize],
    computed: Vec<Vec<f32>>,
) -> Vec<Vec<f32>> {
    let mut out = vec![zero_vector(dimension); len];
    for (pos, vector) in positions.iter().zip(computed) {
        out[*pos] = vector;
    }
    out
}

/// Cosine similarity between two embeddings; 0.0 on length mismatch or zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}
