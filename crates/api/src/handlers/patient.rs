use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hospital_core::{
    errors::HospitalError,
    models::{
        envelope::ApiEnvelope,
        patient::{CreatePatientRequest, Patient},
    },
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    middleware::{error_handling::AppError, extract::ValidatedJson},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    fn required(self) -> Result<String, AppError> {
        match self.email {
            Some(email) if !email.trim().is_empty() => Ok(email),
            _ => Err(AppError(HospitalError::Validation(vec![
                "email: must not be blank".to_string(),
            ]))),
        }
    }
}

/// `GET /api/v1/patients/search?email=`
///
/// Exact, case-sensitive email lookup.
///
/// - `200` "Patient found" with the patient
/// - `400` `email` missing or blank
/// - `404` no patient with that email
#[axum::debug_handler]
pub async fn search_patient(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<ApiEnvelope<Patient>>, AppError> {
    let email = query.required()?;
    let patient = state.patients.find_by_email(&email).await?;

    Ok(Json(ApiEnvelope::success(patient, "Patient found")))
}

/// `POST /api/v1/patients`
///
/// Body: `{firstName, lastName, email}`.
///
/// - `201` "Patient registered" with the stored patient
/// - `400` unreadable body or one `"field: reason"` per invalid field
/// - `500` storage failure, including a duplicate email
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    ValidatedJson(payload): ValidatedJson<CreatePatientRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Patient>>), AppError> {
    let patient = state.patients.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::created(patient, "Patient registered")),
    ))
}

/// `GET /api/v1/patients/:id`
///
/// - `200` "Patient found"
/// - `404` unknown or malformed id
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<Patient>>, AppError> {
    let patient = state.patients.find_by_id(&id).await?;

    Ok(Json(ApiEnvelope::success(patient, "Patient found")))
}

/// `DELETE /api/v1/patients/:id`
///
/// - `200` "Patient deleted", no `data`
/// - `404` unknown or malformed id
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<()>>, AppError> {
    state.patients.delete_by_id(&id).await?;

    Ok(Json(ApiEnvelope::acknowledged("Patient deleted")))
}

/// `DELETE /api/v1/patients?email=`
///
/// - `200` "Patient deleted", no `data`
/// - `400` `email` missing or blank
/// - `404` no patient with that email
#[axum::debug_handler]
pub async fn delete_patient_by_email(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<ApiEnvelope<()>>, AppError> {
    let email = query.required()?;
    state.patients.delete_by_email(&email).await?;

    Ok(Json(ApiEnvelope::acknowledged("Patient deleted")))
}
