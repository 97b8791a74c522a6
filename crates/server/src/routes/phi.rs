use actix_web::{post, web, HttpResponse};
use medsecure_common::MedSecureError;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{EmbedInput, EmbedRequest, EmbedResponse, RedactResponse, TextRequest};

/// Redact PHI from free text
#[post("/redact")]
pub async fn redact(
    req: web::Json<TextRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let redaction = state.redactor.redact_with_report(&req.text);
    debug!("Redacted {} chars, {} spans", req.text.len(), redaction.total_redacted());

    Ok(HttpResponse::Ok().json(RedactResponse {
        text: redaction.text,
        findings: redaction.findings,
    }))
}

/// Embed one text or a batch; inputs are redacted first
#[post("/embed")]
pub async fn embed(
    req: web::Json<EmbedRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let texts: Vec<String> = match &req.input {
        EmbedInput::One(text) => vec![state.redactor.redact(text)],
        EmbedInput::Many(texts) => texts.iter().map(|t| state.redactor.redact(t)).collect(),
    };

    let embeddings = state.embedder.embed_batch(&texts).await?;
    if embeddings.len() != texts.len() {
        return Err(MedSecureError::embedding("Embedding count does not match input count").into());
    }

    Ok(HttpResponse::Ok().json(EmbedResponse {
        model: state.embedder.model_name().to_string(),
        dimension: state.embedder.dimension(),
        embeddings,
    }))
}
