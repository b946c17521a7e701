use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_rest::{build_router, AppState};
use clinic_core::{sample_data::seed_sample_data, ClinicService, CoreConfig};

fn app(seeded: bool) -> Router {
    let mut clinic = ClinicService::new();
    if seeded {
        seed_sample_data(&mut clinic).expect("seed should succeed");
    }
    let cfg = CoreConfig::from_values(None, None, Some("Test Clinic".into()))
        .expect("config should resolve");
    build_router(AppState::new(Arc::new(cfg), clinic))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body.map(|b| b.to_string())).await;
    let value = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, value)
}

fn error_text(body: &Value) -> &str {
    body["error"].as_str().expect("error body should carry a message")
}

#[tokio::test]
async fn test_health_names_clinic() {
    let app = app(false);
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "message": "Test Clinic is alive"}));
}

#[tokio::test]
async fn test_create_patient_returns_created_record() {
    let app = app(false);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/patients",
        Some(json!({"name": " Ahmed Ali ", "age": "30", "phone": "091-111-222"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Ahmed Ali", "age": "30", "phone": "091111222", "notes": ""})
    );

    let (status, listed) = send_json(&app, Method::GET, "/api/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invalid_patient_is_bad_request_with_reason() {
    let app = app(false);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/patients",
        Some(json!({"name": "Ahmed Ali", "age": "abc", "phone": "091111222"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Age must be a valid number"}));
}

#[tokio::test]
async fn test_missing_patient_is_not_found() {
    let app = app(true);

    for uri in ["/api/patients/99", "/api/patients/0", "/api/patients/abc"] {
        let (status, body) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"error": "Patient not found"}));
    }
}

#[tokio::test]
async fn test_update_patient_is_partial() {
    let app = app(true);
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/patients/2",
        Some(json!({"notes": "Follow-up due"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sara Omar");
    assert_eq!(body["notes"], "Follow-up due");

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/patients/2",
        Some(json!({"phone": "12"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Phone number is too short"}));
}

#[tokio::test]
async fn test_appointment_for_unknown_patient_is_not_found() {
    let app = app(true);

    for patient_id in [0, 42] {
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/appointments",
            Some(json!({"patient_id": patient_id, "date": "bad", "description": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Patient not found"}));
    }
}

#[tokio::test]
async fn test_create_and_search_appointments() {
    let app = app(true);
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/appointments",
        Some(json!({"patient_id": 2, "date": "2025-11-03", "description": "Dental CLEANING"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);

    let (_, all) = send_json(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
    assert_eq!(all[0]["patient"]["name"], "Ahmed Ali");

    let (_, found) = send_json(&app, Method::GET, "/api/appointments?search=cleaning", None).await;
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    assert_eq!(found[0]["patient_id"], 2);

    let (_, by_date) =
        send_json(&app, Method::GET, "/api/appointments?date=2025-10-22&patient_id=1", None).await;
    assert_eq!(by_date.as_array().map(Vec::len), Some(1));

    let (status, one) = send_json(&app, Method::GET, "/api/appointments/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["patient"]["name"], "Sara Omar");

    let (status, _) = send_json(&app, Method::GET, "/api/appointments/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = app(true);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/appointments",
        Some(json!({"patient_id": 1, "date": "2025-02-30", "description": "Checkup"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid date"}));
}

#[tokio::test]
async fn test_delete_patient_cascades() {
    let app = app(true);
    let (status, body) = send_json(&app, Method::DELETE, "/api/patients/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "appointments_removed": 1}));

    let (_, all) = send_json(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(all, json!([]));

    let (status, _) = send_json(&app, Method::GET, "/api/patients/1/appointments", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, Method::DELETE, "/api/patients/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_patients_csv() {
    let app = app(true);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/export/patients")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"patients.csv\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .expect("header should be text")
        .starts_with("text/csv"));

    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let csv = String::from_utf8(body.to_vec()).expect("csv should be utf-8");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "ID,Name,Age,Phone,Notes");
    assert_eq!(lines[1], "1,Ahmed Ali,30,091111222,Regular patient");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app(false);
    let (status, doc) = send_json(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/patients/{id}"].is_object());
}

#[tokio::test]
async fn test_wrongly_typed_field_is_json_bad_request() {
    let app = app(false);
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/patients",
        Some(json!({"name": "Ahmed Ali", "age": 30, "phone": "091111222"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&body).is_empty());

    let (_, listed) = send_json(&app, Method::GET, "/api/patients", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_json_bad_request() {
    let app = app(true);

    for (method, uri) in [
        (Method::POST, "/api/patients"),
        (Method::PUT, "/api/patients/1"),
        (Method::POST, "/api/appointments"),
    ] {
        let (status, bytes) = send(&app, method, uri, Some("{\"name\": ".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = serde_json::from_slice(&bytes).expect("response should be JSON");
        assert!(!error_text(&body).is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_non_numeric_patient_filter_is_json_bad_request() {
    let app = app(true);
    let (status, body) =
        send_json(&app, Method::GET, "/api/appointments?patient_id=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&body).is_empty());
}

#[tokio::test]
async fn test_blank_search_values_are_ignored() {
    let app = app(true);

    for uri in [
        "/api/appointments?search=%20%20",
        "/api/appointments?search=&date=%20",
        "/api/appointments?date=%202025-10-22%20",
        "/api/appointments?search=%20checkup%20",
    ] {
        let (status, found) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(found.as_array().map(Vec::len), Some(1), "{uri}");
    }

    let (_, none) = send_json(&app, Method::GET, "/api/appointments?date=2030-01-01", None).await;
    assert_eq!(none, json!([]));
}
