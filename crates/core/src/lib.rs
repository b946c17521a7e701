//! # Clinic Core
//!
//! Core business logic for the clinic record system.
//!
//! This crate holds the patient and appointment records and everything that guards them:
//! - [`models`]: the records and the raw input types callers hand in
//! - [`repositories`]: in-memory storage with identity assignment and lookups
//! - [`validation`]: pure field checks with user-facing failure reasons
//! - [`service`]: [`ClinicService`], which validates input and keeps the repositories
//!   consistent with each other (existence checks, cascade delete, enrichment)
//! - [`export`] and [`sample_data`]: CSV rendering and demonstration records
//!
//! **No API concerns**: HTTP servers, request parsing and process setup belong in `api-rest`,
//! `api-shared`, the CLI, or the runner binary.

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod repositories;
pub mod sample_data;
pub mod service;
pub mod validation;

pub use clinic_types::{AppointmentId, IdError, PatientId};
pub use config::{ConfigError, CoreConfig};
pub use error::{ClinicError, ClinicResult, Entity};
pub use models::{
    Appointment, AppointmentQuery, AppointmentWithPatient, NewAppointment, NewPatient, Patient,
    PatientUpdate,
};
pub use service::ClinicService;
pub use validation::ValidationError;
