use crate::validation::ValidationError;
use std::fmt;

/// The kinds of record a lookup can fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Patient,
    Appointment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Patient => f.write_str("Patient"),
            Entity::Appointment => f.write_str("Appointment"),
        }
    }
}

/// Errors returned by the clinic service layer.
///
/// Only two kinds exist: a field failed validation, or a referenced record does not exist.
/// Both carry a message suitable for showing to the person who submitted the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClinicError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} not found")]
    NotFound { entity: Entity, id: u64 },
}

impl ClinicError {
    pub fn patient_not_found(id: impl Into<u64>) -> Self {
        ClinicError::NotFound {
            entity: Entity::Patient,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClinicError::NotFound { .. })
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
