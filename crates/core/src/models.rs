//! Patient and appointment records, plus the input types the service layer accepts.
//!
//! The serialised shapes are the boundary contract for the JSON API and the CSV export:
//!
//! ```text
//! Patient               {id, name, age, phone, notes}
//! Appointment           {id, patient_id, date, description}
//! enriched Appointment  {id, patient_id, date, description, patient?}
//! ```
//!
//! The `patient` key of an enriched appointment is omitted entirely when the referenced patient
//! no longer exists.

use crate::{AppointmentId, PatientId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A patient known to the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    #[schema(value_type = u64, example = 1)]
    pub id: PatientId,
    #[schema(example = "Ahmed Ali")]
    pub name: String,
    /// Kept as text so blank or legacy values survive a round trip.
    #[schema(example = "30")]
    pub age: String,
    #[schema(example = "091111222")]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

/// An appointment booked for a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    #[schema(value_type = u64, example = 1)]
    pub id: AppointmentId,
    #[schema(value_type = u64, example = 1)]
    pub patient_id: PatientId,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(example = "2025-10-22")]
    pub date: String,
    #[schema(example = "General Checkup")]
    pub description: String,
}

impl Appointment {
    /// Attaches a copy of the referenced patient, if it still exists.
    pub fn with_patient(self, patient: Option<Patient>) -> AppointmentWithPatient {
        AppointmentWithPatient {
            appointment: self,
            patient,
        }
    }
}

/// An appointment with its patient record embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentWithPatient {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
}

/// Raw input for creating a patient. Nothing here has been validated or trimmed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: String,
    pub phone: String,
    pub notes: String,
}

impl NewPatient {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        phone: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            phone: phone.into(),
            notes: notes.into(),
        }
    }
}

/// A partial patient update.
///
/// `None` leaves a field untouched. `Some` replaces it, including `Some(String::new())`,
/// which validation may then reject (name, age, phone) or accept (notes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl PatientUpdate {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.phone.is_none() && self.notes.is_none()
    }
}

/// Raw input for booking an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: PatientId,
    pub date: String,
    pub description: String,
}

impl NewAppointment {
    pub fn new(
        patient_id: PatientId,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            date: date.into(),
            description: description.into(),
        }
    }
}

/// Appointment search criteria. Every supplied criterion must match; absent ones are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    /// Case-insensitive substring of the description.
    pub query: Option<String>,
    /// Exact patient match.
    pub patient_id: Option<PatientId>,
    /// Exact `YYYY-MM-DD` match.
    pub date: Option<String>,
}
