use medsecure_clinical::{TriageResult, Urgency};
use medsecure_phi::Finding;
use medsecure_vector::SearchHit;
use serde::{Deserialize, Serialize};

/// Text-only request body
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Redaction response
#[derive(Debug, Serialize)]
pub struct RedactResponse {
    pub text: String,
    pub findings: Vec<Finding>,
}

/// Single text or batch
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmbedInput {
    One(String),
    Many(Vec<String>),
}

/// Embedding request
#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub input: EmbedInput,
}

/// Embedding response; always a list, one vector per input
#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub model: String,
    pub dimension: usize,
    pub embeddings: Vec<Vec<f32>>,
}

/// New record submitted for storage
#[derive(Debug, Deserialize)]
pub struct AddRecordRequest {
    /// Free text, may contain PHI; redacted before storage
    pub text: String,

    /// Diagnosis category
    #[serde(default = "default_diagnosis")]
    pub diagnosis: String,

    /// Urgency level
    #[serde(default = "default_urgency")]
    pub urgency: Urgency,

    /// Keep the unredacted text in metadata (`original_text`)
    #[serde(default)]
    pub store_original: bool,
}

fn default_diagnosis() -> String {
    "Other".to_string()
}

fn default_urgency() -> Urgency {
    Urgency::Low
}

/// Stored record confirmation
#[derive(Debug, Serialize)]
pub struct AddRecordResponse {
    pub id: String,
    pub stored_text: String,
    pub findings: Vec<Finding>,
}

/// Result of seeding sample or demo cases
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub added: usize,
    pub ids: Vec<String>,
    pub total_records: usize,
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    pub q: String,

    /// Top K results
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    5
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Symptom analysis request
#[derive(Debug, Deserialize)]
pub struct SymptomRequest {
    pub symptoms: String,

    /// Patient age (0-120)
    pub age: Option<u8>,

    /// Patient gender
    pub gender: Option<String>,
}

/// Symptom analysis result; never echoes the unredacted input
#[derive(Debug, Serialize)]
pub struct SymptomResponse {
    pub redacted_text: String,
    pub findings: Vec<Finding>,
    pub embedding_dimension: usize,
    pub triage: TriageResult,
    pub similar_cases: Vec<SearchHit>,

    /// Set when the record store could not be searched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_cases_error: Option<String>,
}

/// Medication list to check
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    /// Comma-separated medication names
    pub medications: String,
}

/// Generic success message
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_input_untagged() {
        let one: EmbedRequest = serde_json::from_str(r#"{"input":"fever"}"#).unwrap();
        assert!(matches!(one.input, EmbedInput::One(ref s) if s == "fever"));

        let many: EmbedRequest = serde_json::from_str(r#"{"input":["a","b"]}"#).unwrap();
        assert!(matches!(many.input, EmbedInput::Many(ref v) if v.len() == 2));
    }

    #[test]
    fn test_add_record_defaults() {
        let req: AddRecordRequest = serde_json::from_str(r#"{"text":"cough"}"#).unwrap();
        assert_eq!(req.diagnosis, "Other");
        assert_eq!(req.urgency, Urgency::Low);
        assert!(!req.store_original);

        let bad = serde_json::from_str::<AddRecordRequest>(r#"{"text":"x","urgency":"critical"}"#);
        assert!(bad.is_err());
    }
}
