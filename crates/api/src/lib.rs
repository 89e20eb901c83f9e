//! # Hospital API
//!
//! The API crate provides the web server for the patient and appointment
//! service.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into service calls
//! - **Services**: Patient lookup and appointment reporting logic
//! - **Middleware**: Error-to-envelope mapping and body extraction
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework; storage sits behind the
//! repository traits of `hospital-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling and request extraction
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Patient and appointment services
pub mod services;
/// Backend selection and repository wiring
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use services::{AppointmentService, PatientService};
use storage::Repositories;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub patients: PatientService,
    pub appointments: AppointmentService,
}

impl ApiState {
    /// Wires the services from an explicit set of repositories.
    pub fn new(repositories: Repositories) -> Self {
        let patients = PatientService::new(repositories.patients);
        let appointments = AppointmentService::new(repositories.appointments, patients.clone());

        Self {
            patients,
            appointments,
        }
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes and the given state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Patient registration and lookup endpoints
        .merge(routes::patient::routes())
        // Appointment report endpoint
        .merge(routes::appointment::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and state
///
/// Applies request tracing, the request timeout and, when origins are
/// configured, CORS, then serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            );

        app.layer(cors)
    } else {
        app
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
