use actix_web::{post, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::pipeline;
use crate::state::AppState;
use crate::types::SymptomRequest;

#[post("/symptoms/analyze")]
pub async fn analyze(
    req: web::Json<SymptomRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let report = pipeline::analyze_symptoms(&state, &req).await?;
    Ok(HttpResponse::Ok().json(report))
}
