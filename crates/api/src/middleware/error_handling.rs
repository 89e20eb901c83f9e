//! # Error Handling Middleware
//!
//! Central mapping from [`HospitalError`] to HTTP responses. Every failure
//! leaves the API as an [`ApiEnvelope`] so clients can rely on one body shape:
//!
//! | error        | status | message                                  |
//! |--------------|--------|------------------------------------------|
//! | `NotFound`   | 404    | the cause                                |
//! | `Validation` | 400    | `Validation Failed`, plus `errors`       |
//! | anything else| 500    | `An internal error occurred: <cause>`    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hospital_core::{errors::HospitalError, models::envelope::ApiEnvelope};

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `HospitalError` instances and implements
/// `IntoResponse` to convert them into enveloped HTTP responses.
#[derive(Debug)]
pub struct AppError(pub HospitalError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HospitalError::NotFound(_) => StatusCode::NOT_FOUND,
            HospitalError::Validation(_) => StatusCode::BAD_REQUEST,
            HospitalError::Database(_) | HospitalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let envelope = match self.0 {
            HospitalError::NotFound(message) => {
                ApiEnvelope::failure(status.as_u16(), message, None)
            }
            HospitalError::Validation(errors) => {
                ApiEnvelope::failure(status.as_u16(), "Validation Failed", Some(errors))
            }
            other => {
                tracing::error!("Request failed: {:?}", other);
                ApiEnvelope::failure(
                    status.as_u16(),
                    format!("An internal error occurred: {}", other),
                    None,
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

/// Allows `?` on `HospitalResult` inside handlers.
impl From<HospitalError> for AppError {
    fn from(err: HospitalError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(HospitalError::Database(err))
    }
}
