//! Clinic service.
//!
//! [`ClinicService`] is the only way callers should change clinic data. It runs the field
//! validators, checks that referenced records exist, and keeps the two repositories consistent
//! with each other:
//!
//! - an appointment can only be booked for a patient that exists at booking time;
//! - deleting a patient first removes all of that patient's appointments, then the patient.
//!
//! The service owns its repositories outright. Build one at startup and hand it to whichever
//! layer needs it; share it across threads by wrapping it in a lock (the REST API uses
//! `Arc<Mutex<ClinicService>>`).
//!
//! ## Cascade delete
//!
//! [`ClinicService::delete_patient`] is a two-step operation inside one `&mut self` call:
//! appointments are removed before the patient record. No other caller can observe the store
//! between the two steps. If the process dies between them, the patient survives with no
//! appointments; it never leaves appointments pointing at a deleted patient.

use crate::error::{ClinicError, ClinicResult, Entity};
use crate::models::{
    Appointment, AppointmentQuery, AppointmentWithPatient, NewAppointment, NewPatient, Patient,
    PatientUpdate,
};
use crate::repositories::{AppointmentRepository, PatientRepository};
use crate::validation::{
    normalize_phone, validate_age, validate_appointment_description, validate_date,
    validate_patient_name, validate_phone,
};
use crate::{AppointmentId, PatientId};

/// Validation and orchestration over the patient and appointment repositories.
#[derive(Clone, Debug, Default)]
pub struct ClinicService {
    patients: PatientRepository,
    appointments: AppointmentRepository,
}

impl ClinicService {
    /// Creates a service over two empty repositories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service over existing repositories.
    pub fn with_repositories(
        patients: PatientRepository,
        appointments: AppointmentRepository,
    ) -> Self {
        Self {
            patients,
            appointments,
        }
    }

    /// Read-only access to the patient repository.
    pub fn patients(&self) -> &PatientRepository {
        &self.patients
    }

    /// Read-only access to the appointment repository.
    pub fn appointments(&self) -> &AppointmentRepository {
        &self.appointments
    }

    /// Creates a patient after validating name, age and phone, in that order.
    ///
    /// All fields are trimmed before storage and the phone number is stored in its normalised,
    /// digits-only form.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] for the first field that fails its rules.
    pub fn create_patient(&mut self, input: NewPatient) -> ClinicResult<Patient> {
        validate_patient_name(&input.name)?;
        validate_age(&input.age)?;
        validate_phone(&input.phone)?;

        let patient = self.patients.create(
            input.name.trim(),
            input.age.trim(),
            normalize_phone(&input.phone),
            input.notes.trim(),
        );

        tracing::info!("patient created: id={}", patient.id);
        Ok(patient)
    }

    /// Applies a partial update to an existing patient.
    ///
    /// Only supplied fields are validated (name, age, phone, in that order) and written.
    /// An update with no fields is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the patient does not exist, checked before any
    /// field, or [`ClinicError::Validation`] for the first supplied field that fails.
    pub fn update_patient(
        &mut self,
        id: PatientId,
        update: PatientUpdate,
    ) -> ClinicResult<Patient> {
        if self.patients.find_by_id(id).is_none() {
            return Err(ClinicError::patient_not_found(id));
        }

        if let Some(name) = &update.name {
            validate_patient_name(name)?;
        }
        if let Some(age) = &update.age {
            validate_age(age)?;
        }
        if let Some(phone) = &update.phone {
            validate_phone(phone)?;
        }

        let update = PatientUpdate {
            name: update.name.map(|v| v.trim().to_string()),
            age: update.age.map(|v| v.trim().to_string()),
            phone: update.phone.map(|v| normalize_phone(&v)),
            notes: update.notes.map(|v| v.trim().to_string()),
        };

        let patient = self
            .patients
            .update(id, update)
            .ok_or_else(|| ClinicError::patient_not_found(id))?;

        tracing::info!("patient updated: id={}", id);
        Ok(patient)
    }

    /// Deletes a patient together with all of the patient's appointments.
    ///
    /// Appointments are removed first; see the module documentation. Returns how many
    /// appointments were removed along with the patient.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the patient does not exist.
    pub fn delete_patient(&mut self, id: PatientId) -> ClinicResult<usize> {
        if self.patients.find_by_id(id).is_none() {
            return Err(ClinicError::patient_not_found(id));
        }

        let removed = self.appointments.delete_by_patient_id(id);
        if !self.patients.delete(id) {
            return Err(ClinicError::patient_not_found(id));
        }

        tracing::info!(
            "patient deleted: id={} appointments_removed={}",
            id,
            removed
        );
        Ok(removed)
    }

    /// Books an appointment for an existing patient.
    ///
    /// The patient is looked up before any field is validated, so an unknown patient is
    /// reported even when the date and description are also invalid. Date and description are
    /// trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] for an unknown patient, otherwise
    /// [`ClinicError::Validation`] for the date or the description, in that order.
    pub fn create_appointment(&mut self, input: NewAppointment) -> ClinicResult<Appointment> {
        if self.patients.find_by_id(input.patient_id).is_none() {
            return Err(ClinicError::patient_not_found(input.patient_id));
        }

        validate_date(&input.date)?;
        validate_appointment_description(&input.description)?;

        let appointment = self.appointments.create(
            input.patient_id,
            input.date.trim(),
            input.description.trim(),
        );

        tracing::info!(
            "appointment created: id={} patient_id={}",
            appointment.id,
            appointment.patient_id
        );
        Ok(appointment)
    }

    /// Returns every appointment, each with its patient embedded when the patient still exists.
    pub fn get_appointments_with_patients(&self) -> Vec<AppointmentWithPatient> {
        self.enrich(self.appointments.get_all())
    }

    /// Searches appointments and embeds each match's patient.
    pub fn search_appointments(&self, criteria: &AppointmentQuery) -> Vec<AppointmentWithPatient> {
        tracing::debug!("searching appointments: {:?}", criteria);
        self.enrich(self.appointments.search(criteria))
    }

    /// Returns a snapshot of every patient in insertion order.
    pub fn list_patients(&self) -> Vec<Patient> {
        self.patients.get_all()
    }

    /// Looks up one patient.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the patient does not exist.
    pub fn find_patient(&self, id: PatientId) -> ClinicResult<Patient> {
        self.patients
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| ClinicError::patient_not_found(id))
    }

    /// Looks up one appointment, with its patient embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the appointment does not exist.
    pub fn find_appointment(&self, id: AppointmentId) -> ClinicResult<AppointmentWithPatient> {
        let appointment = self
            .appointments
            .find_by_id(id)
            .cloned()
            .ok_or(ClinicError::NotFound {
                entity: Entity::Appointment,
                id: id.get(),
            })?;

        let patient = self.patients.find_by_id(appointment.patient_id).cloned();
        Ok(appointment.with_patient(patient))
    }

    /// Returns the appointments booked for one patient.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the patient does not exist.
    pub fn appointments_for_patient(
        &self,
        id: PatientId,
    ) -> ClinicResult<Vec<AppointmentWithPatient>> {
        let patient = self.find_patient(id)?;
        Ok(self
            .appointments
            .find_by_patient_id(id)
            .into_iter()
            .map(|a| a.with_patient(Some(patient.clone())))
            .collect())
    }

    pub fn patient_count(&self) -> usize {
        self.patients.count()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.count()
    }

    // One linear patient lookup per appointment. Dangling references are left unenriched.
    fn enrich(&self, appointments: Vec<Appointment>) -> Vec<AppointmentWithPatient> {
        appointments
            .into_iter()
            .map(|a| {
                let patient = self.patients.find_by_id(a.patient_id).cloned();
                a.with_patient(patient)
            })
            .collect()
    }
}
