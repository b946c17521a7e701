//! Identifier types shared across the clinic workspace.
//!
//! Patients and appointments are keyed by positive integers handed out by their repositories.
//! Wrapping each in its own type keeps a patient id from being passed where an appointment id
//! is expected, and rejects `0` at the boundary instead of deep inside a lookup.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when constructing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Identifiers start at 1.
    #[error("identifier must be a positive integer")]
    Zero,
    /// The input text was not an unsigned integer.
    #[error("identifier is not a valid number: {0}")]
    Parse(#[from] std::num::ParseIntError),
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "u64", into = "u64")]
        pub struct $name(u64);

        impl $name {
            /// The first identifier a repository hands out.
            pub const FIRST: Self = Self(1);

            /// Creates an identifier, rejecting zero.
            pub fn new(value: u64) -> Result<Self, IdError> {
                if value == 0 {
                    return Err(IdError::Zero);
                }
                Ok(Self(value))
            }

            /// Returns the raw integer value.
            pub fn get(self) -> u64 {
                self.0
            }

            /// Returns the identifier allocated after this one.
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl TryFrom<u64> for $name {
            type Error = IdError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: u64 = s.trim().parse()?;
                Self::new(value)
            }
        }
    };
}

record_id!(
    /// Identifier of a patient record.
    PatientId
);

record_id!(
    /// Identifier of an appointment record.
    AppointmentId
);
