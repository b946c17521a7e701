//! Demonstration records loaded at startup.

use crate::error::ClinicResult;
use crate::models::{NewAppointment, NewPatient};
use crate::service::ClinicService;

/// Seeds two patients and one appointment if the service holds no patients yet.
///
/// Returns `Ok(false)` without touching anything when patients already exist. The records go
/// through the normal service checks, so a seed that stopped passing validation would surface
/// here as an error rather than as bad data.
pub fn seed_sample_data(service: &mut ClinicService) -> ClinicResult<bool> {
    if service.patient_count() > 0 {
        tracing::warn!("sample data already present, skipping seed");
        return Ok(false);
    }

    let ahmed = service.create_patient(NewPatient::new(
        "Ahmed Ali",
        "30",
        "091-111-222",
        "Regular patient",
    ))?;
    service.create_patient(NewPatient::new(
        "Sara Omar",
        "25",
        "092-222-333",
        "New patient",
    ))?;
    service.create_appointment(NewAppointment::new(
        ahmed.id,
        "2025-10-22",
        "General Checkup",
    ))?;

    tracing::info!(
        "sample data seeded: patients={} appointments={}",
        service.patient_count(),
        service.appointment_count()
    );
    Ok(true)
}
