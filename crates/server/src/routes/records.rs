use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::pipeline;
use crate::state::AppState;
use crate::types::{AddRecordRequest, AddRecordResponse, SuccessResponse};

/// Redact and store a record
#[post("/records")]
pub async fn add_record(
    req: web::Json<AddRecordRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let (id, redaction) = pipeline::add_record(&state, &req).await?;

    Ok(HttpResponse::Created().json(AddRecordResponse {
        id,
        stored_text: redaction.text,
        findings: redaction.findings,
    }))
}

/// All records as display rows, insertion order
#[get("/records")]
pub async fn list_records(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let rows = state.store()?.read().await.records_list();
    Ok(HttpResponse::Ok().json(rows))
}

/// Plain-text listing
#[get("/records/summary")]
pub async fn records_summary(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let summary = state.store()?.read().await.summary();
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(summary))
}

/// Delete every record
#[post("/reset")]
pub async fn reset(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    state.store()?.write().await.reset();
    info!("All records deleted");

    Ok(HttpResponse::Ok().json(SuccessResponse {
        success: true,
        message: Some("All records have been deleted".to_string()),
    }))
}

/// Add the sample cases
#[post("/samples")]
pub async fn add_samples(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let seeded = pipeline::add_samples(&state).await?;
    Ok(HttpResponse::Ok().json(seeded))
}

/// Reset and seed the demo cases
#[post("/reset_demo")]
pub async fn reset_demo(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let seeded = pipeline::reset_with_demo(&state).await?;
    Ok(HttpResponse::Ok().json(seeded))
}
