//! # API REST
//!
//! REST API implementation for the clinic.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, status codes, CORS)
//!
//! Uses `api-shared` for request/response bodies and `clinic-core` for all business rules.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CreateAppointmentReq, CreatePatientReq, DeletePatientRes, ErrorRes, HealthRes,
    UpdatePatientReq,
};
use clinic_core::{Appointment, AppointmentWithPatient, ClinicService, CoreConfig, Patient};

pub use error::ApiError;

/// Application state shared across REST API handlers
///
/// Holds the resolved configuration and the single clinic store. Every request locks the
/// store for the duration of its (synchronous) work.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    clinic: Arc<Mutex<ClinicService>>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, clinic: ClinicService) -> Self {
        Self {
            cfg,
            clinic: Arc::new(Mutex::new(clinic)),
        }
    }

    /// Lock the store. A poisoned lock is reported as an internal error.
    pub fn clinic(&self) -> Result<MutexGuard<'_, ClinicService>, ApiError> {
        self.clinic
            .lock()
            .map_err(|_| ApiError::Internal("clinic store lock poisoned".into()))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::update_patient,
        handlers::delete_patient,
        handlers::patient_appointments,
        handlers::export_patients,
        handlers::list_appointments,
        handlers::get_appointment,
        handlers::create_appointment,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        CreatePatientReq,
        UpdatePatientReq,
        DeletePatientRes,
        CreateAppointmentReq,
        Patient,
        Appointment,
        AppointmentWithPatient,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/api/patients/:id",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .route(
            "/api/patients/:id/appointments",
            get(handlers::patient_appointments),
        )
        .route("/api/export/patients", get(handlers::export_patients))
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/api/appointments/:id", get(handlers::get_appointment))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

