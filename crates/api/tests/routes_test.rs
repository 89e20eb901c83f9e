
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use hospital_db::{
    models::{NewAppointment, NewPatient},
    repositories::{AppointmentRepository, PatientRepository},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{memory_server, TestContext};

fn registration(email: &str) -> Value {
    json!({
        "firstName": "Grace",
        "lastName": "Hopper",
        "email": email,
    })
}

#[tokio::test]
async fn test_register_then_search_by_email() {
    let (server, _) = memory_server();

    let created = server
        .post("/api/v1/patients")
        .json(&registration("grace@hospital.com"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Patient registered");
    assert_eq!(body["data"]["firstName"], "Grace");

    let found = server
        .get("/api/v1/patients/search")
        .add_query_param("email", "grace@hospital.com")
        .await;
    found.assert_status_ok();
    let body = found.json::<Value>();
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Patient found");
    assert_eq!(body["data"]["email"], "grace@hospital.com");
    assert_eq!(body["data"]["lastName"], "Hopper");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_search_unknown_email_is_404_envelope() {
    let (server, _) = memory_server();

    let response = server
        .get("/api/v1/patients/search")
        .add_query_param("email", "nobody@hospital.com")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Patient not found with email: nobody@hospital.com");
    assert!(body.get("data").is_none());
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn test_search_requires_email() {
    let (server, _) = memory_server();

    let response = server
        .get("/api/v1/patients/search")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"],
        json!(["email: must not be blank"])
    );
}

#[tokio::test]
async fn test_register_blank_first_name_is_400() {
    let (server, repositories) = memory_server();

    let response = server
        .post("/api/v1/patients")
        .json(&json!({
            "firstName": "  ",
            "lastName": "Hopper",
            "email": "grace@hospital.com",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Validation Failed");
    assert_eq!(body["errors"], json!(["firstName: must not be blank"]));
    assert_eq!(repositories.patients.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_missing_fields_lists_each_field() {
    let (server, _) = memory_server();

    let response = server
        .post("/api/v1/patients")
        .json(&json!({}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"],
        json!([
            "email: must not be blank",
            "firstName: must not be blank",
            "lastName: must not be blank",
        ])
    );
}

#[tokio::test]
async fn test_register_malformed_body_is_400() {
    let (server, _) = memory_server();

    let response = server
        .post("/api/v1/patients")
        .text("this is not json")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Validation Failed");
    assert!(body["errors"][0].as_str().unwrap().starts_with("body: "));
}

#[tokio::test]
async fn test_register_duplicate_email_is_500() {
    let (server, _) = memory_server();

    server
        .post("/api/v1/patients")
        .json(&registration("grace@hospital.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/patients")
        .json(&registration("grace@hospital.com"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.json::<Value>()["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("An internal error occurred: "), "{}", message);
}

#[tokio::test]
async fn test_get_and_delete_by_id() {
    let (server, _) = memory_server();

    let created = server
        .post("/api/v1/patients")
        .json(&registration("grace@hospital.com"))
        .await
        .json::<Value>();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let found = server.get(&format!("/api/v1/patients/{}", id)).await;
    found.assert_status_ok();
    assert_eq!(found.json::<Value>()["data"]["id"], id.as_str());

    let deleted = server.delete(&format!("/api/v1/patients/{}", id)).await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["message"], "Patient deleted");

    server
        .get(&format!("/api/v1/patients/{}", id))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_malformed_id_is_404() {
    let (server, _) = memory_server();

    let response = server
        .get("/api/v1/patients/not-a-uuid")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Patient not found");
}

#[tokio::test]
async fn test_delete_by_email() {
    let (server, repositories) = memory_server();

    server
        .post("/api/v1/patients")
        .json(&registration("grace@hospital.com"))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete("/api/v1/patients")
        .add_query_param("email", "grace@hospital.com")
        .await
        .assert_status_ok();
    assert_eq!(repositories.patients.count().await.unwrap(), 0);

    server
        .delete("/api/v1/patients")
        .add_query_param("email", "grace@hospital.com")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_appointments_report() {
    let (server, repositories) = memory_server();

    repositories
        .patients
        .insert_batch(vec![
            NewPatient {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@hospital.com".to_string(),
            },
            NewPatient {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
                email: "alan@hospital.com".to_string(),
            },
        ])
        .await
        .unwrap();
    let ada = repositories
        .patients
        .find_by_email("ada@hospital.com")
        .await
        .unwrap()
        .unwrap();
    let alan = repositories
        .patients
        .find_by_email("alan@hospital.com")
        .await
        .unwrap()
        .unwrap();

    let start = Utc::now() + Duration::days(2);
    repositories
        .appointments
        .insert_batch(
            [ada.id, alan.id, ada.id]
                .into_iter()
                .map(|patient_id| NewAppointment {
                    patient_id,
                    appointment_time: start,
                    notes: "Routine check".to_string(),
                })
                .collect(),
        )
        .await
        .unwrap();

    let response = server.get("/api/v1/appointments").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Report generated");

    let rows = body["data"].as_array().unwrap();
    let names: Vec<&str> = rows
        .iter()
        .map(|row| row["patientFullName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Alan Turing", "Ada Lovelace"]);
    for row in rows {
        assert!(row["id"].is_string());
        assert!(row["startTime"].is_string());
        assert_eq!(row["notes"], "Routine check");
    }
}

#[tokio::test]
async fn test_list_appointments_empty() {
    let (server, _) = memory_server();

    let response = server.get("/api/v1/appointments").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], json!([]));
}

#[tokio::test]
async fn test_health_and_version() {
    let (server, repositories) = memory_server();
    repositories
        .patients
        .create(NewPatient {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@hospital.com".to_string(),
        })
        .await
        .unwrap();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(
        health.json::<Value>(),
        json!({ "status": "ok", "patients": 1, "appointments": 0 })
    );

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_reports_storage_failure() {
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_count()
        .returning(|| Err(eyre::eyre!("connection refused")));
    ctx.appointment_repo.expect_count().times(0);
    let server = ctx.into_server();

    let response = server.get("/health").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "An internal error occurred: Database error: connection refused");
}

#[tokio::test]
async fn test_invalid_registration_is_rejected_before_storage() {
    let mut ctx = TestContext::new();
    ctx.patient_repo.expect_create().times(0);
    let server = ctx.into_server();

    let response = server
        .post("/api/v1/patients")
        .json(&json!({ "firstName": "Grace", "lastName": "Hopper", "email": "nope" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"],
        json!(["email: must be a well-formed email address"])
    );
}
