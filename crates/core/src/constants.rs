//! Constants used throughout the clinic core crate.
//!
//! Field limits live here so the validators, the API documentation and the tests agree on the
//! same numbers.

/// Address the REST API binds to when `CLINIC_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "127.0.0.1:5001";

/// Display name used in health responses when `CLINIC_NAME` is not set.
pub const DEFAULT_CLINIC_NAME: &str = "Clinic";

/// Minimum patient name length, in characters, after trimming.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum patient name length, in characters, after trimming.
pub const NAME_MAX_LEN: usize = 100;

/// Largest accepted age in years.
pub const AGE_MAX: i64 = 150;

/// Minimum number of digits in a phone number once separators are stripped.
pub const PHONE_MIN_DIGITS: usize = 7;

/// Maximum number of digits in a phone number once separators are stripped.
pub const PHONE_MAX_DIGITS: usize = 15;

/// Characters removed from a phone number before it is checked. Whitespace is stripped too.
pub const PHONE_SEPARATORS: [char; 3] = ['-', '(', ')'];

/// `chrono` format string for appointment dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum appointment description length, in characters, after trimming.
pub const DESCRIPTION_MIN_LEN: usize = 3;

/// Maximum appointment description length, in characters, after trimming.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Filename suggested to browsers for the patient CSV export.
pub const PATIENT_EXPORT_FILENAME: &str = "patients.csv";

/// Header row of the patient CSV export.
pub const PATIENT_EXPORT_HEADER: [&str; 5] = ["ID", "Name", "Age", "Phone", "Notes"];
