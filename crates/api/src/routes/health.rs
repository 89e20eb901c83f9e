use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    patients: i64,
    appointments: i64,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

/// Liveness plus row counts, so a reader can tell whether seeding ran.
/// A storage failure surfaces as a 500 envelope.
async fn health_check(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<HealthResponse>, AppError> {
    let patients = state.patients.count().await?;
    let appointments = state.appointments.count().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        patients,
        appointments,
    }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
