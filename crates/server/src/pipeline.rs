use medsecure_clinical::{seed_urgency, triage, Urgency};
use medsecure_common::{MedSecureError, Result};
use medsecure_phi::Redaction;
use medsecure_vector::{Metadata, RecordStore};
use tracing::{info, warn};

use crate::error::FEATURE_UNAVAILABLE;
use crate::state::AppState;
use crate::types::{AddRecordRequest, SeedResponse, SymptomRequest, SymptomResponse};

/// Similar cases shown alongside a symptom analysis
pub const SIMILAR_CASES_TOP_K: usize = 3;

/// Oldest accepted patient age
const MAX_PATIENT_AGE: u8 = 120;

const GENDERS: &[&str] = &["male", "female", "other"];

/// Which seed set to insert
#[derive(Debug, Clone, Copy)]
enum SeedKind {
    Sample,
    Demo,
}

impl SeedKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Demo => "demo",
        }
    }
}

fn record_metadata(diagnosis: &str, urgency: Urgency, category: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("diagnosis".to_string(), diagnosis.to_string());
    metadata.insert("urgency".to_string(), urgency.to_string());
    metadata.insert("category".to_string(), category.to_string());
    metadata
}

fn validate_patient(request: &SymptomRequest) -> Result<()> {
    if let Some(age) = request.age {
        if age > MAX_PATIENT_AGE {
            return Err(MedSecureError::invalid_input(format!(
                "age must be between 0 and {}",
                MAX_PATIENT_AGE
            )));
        }
    }

    if let Some(gender) = &request.gender {
        if !GENDERS.contains(&gender.trim().to_lowercase().as_str()) {
            return Err(MedSecureError::invalid_input(
                "gender must be one of male, female, other",
            ));
        }
    }

    Ok(())
}

/// Redact → embed → triage → search for similar cases
///
/// Triage reads the original text so that a keyword hidden inside an
/// identifier span still counts; everything returned is redacted. An
/// unavailable store only drops the similar cases.
pub async fn analyze_symptoms(state: &AppState, request: &SymptomRequest) -> Result<SymptomResponse> {
    if request.symptoms.trim().is_empty() {
        return Err(MedSecureError::invalid_input("Please enter symptoms to analyze"));
    }
    validate_patient(request)?;

    let redaction = state.redactor.redact_with_report(&request.symptoms);
    let embedding = state.embedder.embed(&redaction.text).await?;
    let triage = triage(&request.symptoms, &state.clinical);

    let (similar_cases, similar_cases_error) = match state.store() {
        Ok(store) => (
            store.read().await.search(&redaction.text, SIMILAR_CASES_TOP_K),
            None,
        ),
        Err(e) if e.is_store_unavailable() => {
            warn!("Similar-case search skipped: {}", e);
            (Vec::new(), Some(FEATURE_UNAVAILABLE.to_string()))
        }
        Err(e) => return Err(e),
    };

    info!(
        "Symptom analysis - triage={}, redacted_spans={}, similar_cases={}",
        triage.level,
        redaction.total_redacted(),
        similar_cases.len()
    );

    Ok(SymptomResponse {
        redacted_text: redaction.text,
        findings: redaction.findings,
        embedding_dimension: embedding.len(),
        triage,
        similar_cases,
        similar_cases_error,
    })
}

/// Redact and store a user-submitted record
pub async fn add_record(state: &AppState, request: &AddRecordRequest) -> Result<(String, Redaction)> {
    if request.text.trim().is_empty() {
        return Err(MedSecureError::invalid_input("Please enter medical text"));
    }

    let redaction = state.redactor.redact_with_report(&request.text);
    let mut metadata = record_metadata(&request.diagnosis, request.urgency, "custom");
    if request.store_original {
        metadata.insert("original_text".to_string(), request.text.clone());
    }

    let id = state
        .store()?
        .write()
        .await
        .store(redaction.text.clone(), metadata);

    info!("Custom record stored: {} ({} spans redacted)", id, redaction.total_redacted());
    Ok((id, redaction))
}

/// Insert cases under an already-held write lock
fn insert_cases(state: &AppState, store: &mut RecordStore, cases: &[String], kind: SeedKind) -> Vec<String> {
    cases
        .iter()
        .map(|case| {
            let text = state.redactor.redact(case);
            let metadata = record_metadata(kind.label(), seed_urgency(case), kind.label());
            store.store(text, metadata)
        })
        .collect()
}

/// Add every sample case
pub async fn add_samples(state: &AppState) -> Result<SeedResponse> {
    let mut store = state.store()?.write().await;
    let ids = insert_cases(state, &mut store, &state.clinical.sample_cases, SeedKind::Sample);

    info!("Added {} sample cases", ids.len());
    Ok(SeedResponse {
        added: ids.len(),
        total_records: store.len(),
        ids,
    })
}

/// Reset the store and seed the demo cases, under one write lock
pub async fn reset_with_demo(state: &AppState) -> Result<SeedResponse> {
    let mut store = state.store()?.write().await;
    store.reset();
    let ids = insert_cases(state, &mut store, &state.clinical.demo_cases, SeedKind::Demo);

    info!("Store reset with {} demo cases", ids.len());
    Ok(SeedResponse {
        added: ids.len(),
        total_records: store.len(),
        ids,
    })
}
