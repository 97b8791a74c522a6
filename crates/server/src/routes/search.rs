use actix_web::{get, web, HttpResponse};
use medsecure_common::MedSecureError;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{SearchQuery, SearchResponse};

/// Keyword-overlap search; a blank query yields an empty result
#[get("/search")]
pub async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    if query.top_k == 0 {
        return Err(MedSecureError::invalid_input("top_k must be at least 1").into());
    }

    let results = state.store()?.read().await.search(&query.q, query.top_k);

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: query.q.clone(),
        count: results.len(),
        results,
    }))
}
