use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use medsecure_common::MedSecureError;
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// User-facing message for store-backed features while the store is down
pub const FEATURE_UNAVAILABLE: &str = "feature unavailable";

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// HTTP wrapper around `MedSecureError`
#[derive(Debug)]
pub struct ApiError(pub MedSecureError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<MedSecureError> for ApiError {
    fn from(err: MedSecureError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.0.is_store_unavailable() {
            warn!("Store-backed feature requested while store is down: {}", self.0);
            ErrorResponse {
                error: FEATURE_UNAVAILABLE.to_string(),
                details: Some(self.0.to_string()),
            }
        } else {
            if self.status_code().is_server_error() {
                error!("Request failed: {}", self.0);
            }
            ErrorResponse {
                error: self.0.to_string(),
                details: None,
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
