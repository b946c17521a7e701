//! JSON request and response bodies.
//!
//! Request bodies are lenient: missing create fields default to an empty string so the
//! validators, not the JSON parser, report what is wrong.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every non-2xx JSON response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

/// Partial patient update. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentReq {
    #[serde(default)]
    pub patient_id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletePatientRes {
    pub success: bool,
    pub appointments_removed: usize,
}

/// Query string of `GET /api/appointments`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentSearchParams {
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
    /// Exact `YYYY-MM-DD` date.
    pub date: Option<String>,
    pub patient_id: Option<u64>,
}
