use crate::models::{Appointment, AppointmentQuery};
use crate::{AppointmentId, PatientId};

/// Storage for appointment records.
///
/// Ids come from a counter that only moves forward. Deriving the id from the current number of
/// appointments (`len + 1`) would hand out an id that is still in use as soon as a cascade
/// delete shrinks the collection, so that scheme is not used here.
#[derive(Clone, Debug)]
pub struct AppointmentRepository {
    appointments: Vec<Appointment>,
    next_id: AppointmentId,
}

impl Default for AppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentRepository {
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
            next_id: AppointmentId::FIRST,
        }
    }

    /// Appends a new appointment and returns a copy of it.
    ///
    /// Whether `patient_id` refers to an existing patient is the caller's concern.
    pub fn create(
        &mut self,
        patient_id: PatientId,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Appointment {
        let appointment = Appointment {
            id: self.next_id,
            patient_id,
            date: date.into(),
            description: description.into(),
        };
        self.next_id = self.next_id.next();
        self.appointments.push(appointment.clone());
        appointment
    }

    pub fn find_by_id(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Returns a snapshot of every appointment in insertion order.
    pub fn get_all(&self) -> Vec<Appointment> {
        self.appointments.clone()
    }

    pub fn find_by_patient_id(&self, patient_id: PatientId) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    /// Removes every appointment booked for `patient_id` and returns how many went.
    pub fn delete_by_patient_id(&mut self, patient_id: PatientId) -> usize {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.patient_id != patient_id);
        before - self.appointments.len()
    }

    /// Filters appointments by patient, then date, then description text.
    ///
    /// Criteria are ANDed. A criterion that is `None` or an empty string is skipped. The text
    /// match is a case-insensitive substring test against the description. Results keep
    /// insertion order.
    pub fn search(&self, criteria: &AppointmentQuery) -> Vec<Appointment> {
        let date = criteria.date.as_deref().filter(|d| !d.is_empty());
        let needle = criteria
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.appointments
            .iter()
            .filter(|a| criteria.patient_id.map_or(true, |id| a.patient_id == id))
            .filter(|a| date.map_or(true, |d| a.date == d))
            .filter(|a| {
                needle
                    .as_deref()
                    .map_or(true, |q| a.description.to_lowercase().contains(q))
            })
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.appointments.len()
    }
}
