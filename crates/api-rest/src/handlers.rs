//! HTTP handlers.
//!
//! Each handler takes the store lock once, does its work synchronously and releases the lock
//! before the response is built. Nothing here awaits while holding the guard.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};

use api_shared::{
    AppointmentSearchParams, CreateAppointmentReq, CreatePatientReq, DeletePatientRes, ErrorRes,
    HealthRes, HealthService, UpdatePatientReq,
};
use clinic_core::{
    constants::PATIENT_EXPORT_FILENAME, export::patients_to_csv, Appointment, AppointmentId,
    AppointmentQuery, AppointmentWithPatient, Entity, NewAppointment, NewPatient, Patient,
    PatientId, PatientUpdate,
};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::AppState;

fn parse_patient_id(raw: &str) -> Result<PatientId, ApiError> {
    raw.parse().map_err(|_| ApiError::unknown(Entity::Patient))
}

fn parse_appointment_id(raw: &str) -> Result<AppointmentId, ApiError> {
    raw.parse().map_err(|_| ApiError::unknown(Entity::Appointment))
}

// Blank query values count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not touch the store.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.cfg.clinic_name()))
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "All patients in insertion order", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let clinic = state.clinic()?;
    Ok(Json(clinic.list_patients()))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// Name, age and phone are validated in that order and the first failure is returned as a
/// 400 with its reason.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePatientReq>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let mut clinic = state.clinic()?;
    let patient = clinic.create_patient(NewPatient::new(req.name, req.age, req.phone, req.notes))?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_patient_id(&id)?;
    let clinic = state.clinic()?;
    Ok(Json(clinic.find_patient(id)?))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Partially update a patient
///
/// Only the fields present in the body are validated and written.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdatePatientReq>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_patient_id(&id)?;
    let update = PatientUpdate {
        name: req.name,
        age: req.age,
        phone: req.phone,
        notes: req.notes,
    };

    let mut clinic = state.clinic()?;
    Ok(Json(clinic.update_patient(id, update)?))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient and appointments removed", body = DeletePatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Delete a patient and every appointment booked for them
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePatientRes>, ApiError> {
    let id = parse_patient_id(&id)?;

    let mut clinic = state.clinic()?;
    let appointments_removed = clinic.delete_patient(id)?;

    Ok(Json(DeletePatientRes {
        success: true,
        appointments_removed,
    }))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}/appointments",
    params(("id" = u64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient appointments", body = [AppointmentWithPatient]),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn patient_appointments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AppointmentWithPatient>>, ApiError> {
    let id = parse_patient_id(&id)?;
    let clinic = state.clinic()?;
    Ok(Json(clinic.appointments_for_patient(id)?))
}

#[utoipa::path(
    get,
    path = "/api/export/patients",
    responses(
        (
            status = 200,
            description = "Patient list as a CSV attachment",
            content_type = "text/csv",
            body = String
        ),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Download every patient as CSV
#[axum::debug_handler]
pub async fn export_patients(State(state): State<AppState>) -> Result<Response, ApiError> {
    let csv = {
        let clinic = state.clinic()?;
        patients_to_csv(clinic.patients().iter())
    };

    let disposition = format!("attachment; filename=\"{PATIENT_EXPORT_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentSearchParams),
    responses(
        (status = 200, description = "Matching appointments", body = [AppointmentWithPatient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List or search appointments
///
/// Without query parameters every appointment is returned. With any of `search`, `date` or
/// `patient_id` only appointments matching all supplied criteria are returned. `search` and
/// `date` are trimmed, and a blank value is ignored.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AppointmentSearchParams>,
) -> Result<Json<Vec<AppointmentWithPatient>>, ApiError> {
    let search = non_blank(params.search);
    let date = non_blank(params.date);

    if search.is_none() && date.is_none() && params.patient_id.is_none() {
        let clinic = state.clinic()?;
        return Ok(Json(clinic.get_appointments_with_patients()));
    }

    let patient_id = match params.patient_id {
        // No appointment can reference patient 0.
        Some(raw) => match PatientId::new(raw) {
            Ok(id) => Some(id),
            Err(_) => return Ok(Json(Vec::new())),
        },
        None => None,
    };

    let criteria = AppointmentQuery {
        query: search,
        patient_id,
        date,
    };

    let clinic = state.clinic()?;
    Ok(Json(clinic.search_appointments(&criteria)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = u64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentWithPatient),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentWithPatient>, ApiError> {
    let id = parse_appointment_id(&id)?;
    let clinic = state.clinic()?;
    Ok(Json(clinic.find_appointment(id)?))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Book an appointment
///
/// The patient is checked before the date and description, so an unknown patient is always
/// reported as a 404.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAppointmentReq>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let patient_id =
        PatientId::new(req.patient_id).map_err(|_| ApiError::unknown(Entity::Patient))?;

    let mut clinic = state.clinic()?;
    let appointment =
        clinic.create_appointment(NewAppointment::new(patient_id, req.date, req.description))?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
