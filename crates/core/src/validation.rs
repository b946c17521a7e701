//! Input validation utilities.
//!
//! Pure functions that check raw, user-supplied text against the field rules for patients and
//! appointments. They never touch storage. Each validator applies its rules in a fixed order and
//! reports the first one that fails; the error's `Display` output is the message shown to the
//! person who submitted the form.
//!
//! All length limits count characters of the trimmed input.

use crate::constants::{
    AGE_MAX, DATE_FORMAT, DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN, NAME_MAX_LEN, NAME_MIN_LEN,
    PHONE_MAX_DIGITS, PHONE_MIN_DIGITS, PHONE_SEPARATORS,
};
use chrono::{Datelike, NaiveDate};
use std::num::IntErrorKind;

/// A field that failed one of its validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Patient name is required")]
    NameRequired,
    #[error("Patient name must be at least {} characters", NAME_MIN_LEN)]
    NameTooShort,
    #[error("Patient name must be at most {} characters", NAME_MAX_LEN)]
    NameTooLong,

    #[error("Age is required")]
    AgeRequired,
    #[error("Age must be a valid number")]
    AgeNotANumber,
    #[error("Age cannot be negative")]
    AgeNegative,
    #[error("Age must be at most {}", AGE_MAX)]
    AgeTooLarge,

    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Phone number is too short")]
    PhoneTooShort,
    #[error("Phone number is too long")]
    PhoneTooLong,
    #[error("Phone number must contain only digits")]
    PhoneNotDigits,

    #[error("Date is required")]
    DateRequired,
    #[error("Date must be in YYYY-MM-DD format")]
    DateFormat,
    #[error("Invalid date")]
    DateInvalid,

    #[error("Description is required")]
    DescriptionRequired,
    #[error("Description must be at least {} characters", DESCRIPTION_MIN_LEN)]
    DescriptionTooShort,
    #[error("Description must be at most {} characters", DESCRIPTION_MAX_LEN)]
    DescriptionTooLong,
}

pub type ValidationResult = Result<(), ValidationError>;

/// Validates a patient name.
///
/// Rules, in order: non-blank, at least [`NAME_MIN_LEN`] characters, at most
/// [`NAME_MAX_LEN`] characters.
pub fn validate_patient_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if len > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong);
    }

    Ok(())
}

/// Validates a patient age given as text.
///
/// Rules, in order: non-blank, parses as an integer, not negative, at most [`AGE_MAX`].
/// Integers too wide for `i64` still get the negative / too-large reason rather than
/// "not a number".
pub fn validate_age(age: &str) -> ValidationResult {
    let trimmed = age.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AgeRequired);
    }

    let value = match trimmed.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => ValidationError::AgeTooLarge,
                IntErrorKind::NegOverflow => ValidationError::AgeNegative,
                _ => ValidationError::AgeNotANumber,
            })
        }
    };

    if value < 0 {
        return Err(ValidationError::AgeNegative);
    }
    if value > AGE_MAX {
        return Err(ValidationError::AgeTooLarge);
    }

    Ok(())
}

/// Strips whitespace and the separators in [`PHONE_SEPARATORS`] from a phone number.
///
/// The result is not checked; see [`validate_phone`].
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !PHONE_SEPARATORS.contains(c))
        .collect()
}

/// Validates a phone number.
///
/// Rules, in order: non-blank, something remains after stripping separators, at least
/// [`PHONE_MIN_DIGITS`] characters, at most [`PHONE_MAX_DIGITS`] characters, only ASCII digits.
/// Letters and `+` are rejected by the last rule, after the length checks.
pub fn validate_phone(phone: &str) -> ValidationResult {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneRequired);
    }

    let cleaned = normalize_phone(phone);
    if cleaned.is_empty() {
        return Err(ValidationError::PhoneRequired);
    }

    let len = cleaned.chars().count();
    if len < PHONE_MIN_DIGITS {
        return Err(ValidationError::PhoneTooShort);
    }
    if len > PHONE_MAX_DIGITS {
        return Err(ValidationError::PhoneTooLong);
    }

    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PhoneNotDigits);
    }

    Ok(())
}

/// Validates an appointment date.
///
/// The trimmed input must have the literal shape `DDDD-DD-DD` and name a real calendar day
/// from year 1 onwards, so `2025-02-30` is rejected even though its shape is fine.
pub fn validate_date(date: &str) -> ValidationResult {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::DateRequired);
    }

    if !has_date_shape(trimmed) {
        return Err(ValidationError::DateFormat);
    }

    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(parsed) if parsed.year() >= 1 => Ok(()),
        _ => Err(ValidationError::DateInvalid),
    }
}

fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Validates an appointment description.
///
/// Rules, in order: non-blank, at least [`DESCRIPTION_MIN_LEN`] characters, at most
/// [`DESCRIPTION_MAX_LEN`] characters.
pub fn validate_appointment_description(description: &str) -> ValidationResult {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    let len = trimmed.chars().count();
    if len < DESCRIPTION_MIN_LEN {
        return Err(ValidationError::DescriptionTooShort);
    }
    if len > DESCRIPTION_MAX_LEN {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(())
}
