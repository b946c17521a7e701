//! Mapping from service errors to HTTP responses.

use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use clinic_core::{ClinicError, Entity};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Everything a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Clinic(#[from] ClinicError),
    /// The request body or query string could not be read.
    #[error("{0}")]
    BadRequest(String),
    /// A fault the caller cannot fix. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A lookup for an id that cannot exist, such as `0` or a non-numeric path segment.
    pub fn unknown(entity: Entity) -> Self {
        ApiError::Clinic(ClinicError::NotFound { entity, id: 0 })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Clinic(ClinicError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Clinic(ClinicError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Clinic(e) => e.to_string(),
            ApiError::BadRequest(reason) => reason.clone(),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorRes::new(message))).into_response()
    }
}
