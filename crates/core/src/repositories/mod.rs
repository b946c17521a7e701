//! In-memory repositories.
//!
//! Each repository is the sole owner of the collection for one entity type. Records are kept
//! in insertion order and every lookup is a linear scan.
//!
//! Repositories do not validate input and do not know about each other. Cross-entity rules
//! (an appointment needs an existing patient, deleting a patient removes its appointments) are
//! enforced by [`crate::service::ClinicService`].

pub mod appointments;
pub mod patients;

pub use appointments::AppointmentRepository;
pub use patients::PatientRepository;
