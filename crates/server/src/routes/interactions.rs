use actix_web::{post, web, HttpResponse};
use medsecure_clinical::check_interactions;
use medsecure_common::MedSecureError;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::InteractionRequest;

/// Pairwise interaction analysis of a comma-separated medication list
#[post("/interactions/check")]
pub async fn check(
    req: web::Json<InteractionRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    if req.medications.trim().is_empty() {
        return Err(MedSecureError::invalid_input("Please enter medications to check").into());
    }

    let report = check_interactions(&req.medications, &state.clinical.interactions);
    info!(
        "Interaction check - {} medications, {} dangerous, {} caution",
        report.medications.len(),
        report.dangerous.len(),
        report.caution.len()
    );

    Ok(HttpResponse::Ok().json(report))
}
