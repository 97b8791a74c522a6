use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;

/// Liveness probe
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "store_available": state.store().is_ok(),
        "embedding_model": state.embedder.model_name(),
    }))
}

/// Store statistics
#[get("/info")]
pub async fn info(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let info = state.store()?.read().await.info();
    Ok(HttpResponse::Ok().json(info))
}
