use axum::{extract::State, Json};
use hospital_core::models::{appointment::AppointmentResponse, envelope::ApiEnvelope};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// `GET /api/v1/appointments`
///
/// Every appointment with its patient's full name.
///
/// - `200` "Report generated", `data`: `[{id, patientFullName, startTime, notes}]`
/// - `500` storage failure
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiEnvelope<Vec<AppointmentResponse>>>, AppError> {
    let report = state.appointments.list_with_details().await?;

    Ok(Json(ApiEnvelope::success(report, "Report generated")))
}
