use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use hospital_api::middleware::error_handling::AppError;
use hospital_core::errors::HospitalError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn render(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, body)
}

#[tokio::test]
async fn test_not_found_uses_cause_as_message() {
    let (status, body) = render(AppError(HospitalError::NotFound("Patient not found".into()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Patient not found");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_validation_lists_field_errors() {
    let errors = vec![
        "firstName: must not be blank".to_string(),
        "email: must be a well-formed email address".to_string(),
    ];

    let (status, body) = render(AppError(HospitalError::Validation(errors))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Failed");
    assert_eq!(
        body["errors"],
        json!([
            "firstName: must not be blank",
            "email: must be a well-formed email address",
        ])
    );
}

#[tokio::test]
async fn test_database_error_is_500_with_cause() {
    let (status, body) = render(eyre::eyre!("connection refused").into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(
        body["message"],
        "An internal error occurred: Database error: connection refused"
    );
}

#[tokio::test]
async fn test_internal_error_is_500() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk unavailable");

    let (status, body) = render(AppError(HospitalError::Internal(Box::new(io_error)))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("disk unavailable"));
}
