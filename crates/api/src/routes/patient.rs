use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/v1/patients",
            post(handlers::patient::create_patient)
                .delete(handlers::patient::delete_patient_by_email),
        )
        .route(
            "/api/v1/patients/search",
            get(handlers::patient::search_patient),
        )
        .route(
            "/api/v1/patients/:id",
            get(handlers::patient::get_patient).delete(handlers::patient::delete_patient),
        )
}
