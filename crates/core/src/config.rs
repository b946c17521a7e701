//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed to whatever needs it. Core
//! services never read process-wide environment variables themselves, which keeps them
//! deterministic under test harnesses and multi-threaded runtimes.

use crate::constants::{DEFAULT_CLINIC_NAME, DEFAULT_REST_ADDR};
use std::net::SocketAddr;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("clinic name cannot be empty")]
    EmptyClinicName,
    #[error("invalid REST address '{value}': {source}")]
    InvalidRestAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid boolean '{0}' (expected true/false, yes/no, 1/0, on/off)")]
    InvalidFlag(String),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: SocketAddr,
    seed_sample_data: bool,
    clinic_name: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The clinic name is trimmed and must not be blank.
    pub fn new(
        rest_addr: SocketAddr,
        seed_sample_data: bool,
        clinic_name: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let clinic_name = clinic_name.as_ref().trim();
        if clinic_name.is_empty() {
            return Err(ConfigError::EmptyClinicName);
        }

        Ok(Self {
            rest_addr,
            seed_sample_data,
            clinic_name: clinic_name.to_owned(),
        })
    }

    /// Build a configuration from raw, optional values such as those read from the environment.
    ///
    /// Missing or blank values fall back to the defaults in [`crate::constants`].
    pub fn from_values(
        rest_addr: Option<String>,
        seed_sample_data: Option<String>,
        clinic_name: Option<String>,
    ) -> Result<Self, ConfigError> {
        let rest_addr = rest_addr_from_env_value(rest_addr)?;
        let seed_sample_data = flag_from_env_value(seed_sample_data, true)?;
        let clinic_name = non_blank(clinic_name).unwrap_or_else(|| DEFAULT_CLINIC_NAME.into());

        Self::new(rest_addr, seed_sample_data, clinic_name)
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn seed_sample_data(&self) -> bool {
        self.seed_sample_data
    }

    pub fn clinic_name(&self) -> &str {
        &self.clinic_name
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rest_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            seed_sample_data: true,
            clinic_name: DEFAULT_CLINIC_NAME.into(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the REST bind address from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(value: Option<String>) -> Result<SocketAddr, ConfigError> {
    let value = non_blank(value).unwrap_or_else(|| DEFAULT_REST_ADDR.into());
    value
        .parse()
        .map_err(|source| ConfigError::InvalidRestAddr { value, source })
}

/// Parse a boolean switch from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = non_blank(value) else {
        return Ok(default);
    };

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_uses_defaults_when_unset() {
        let cfg = CoreConfig::from_values(None, None, None).expect("defaults should resolve");
        assert_eq!(cfg.rest_addr().to_string(), DEFAULT_REST_ADDR);
        assert!(cfg.seed_sample_data());
        assert_eq!(cfg.clinic_name(), DEFAULT_CLINIC_NAME);
    }

    #[test]
    fn test_from_values_treats_blank_as_unset() {
        let cfg = CoreConfig::from_values(Some("  ".into()), Some("".into()), Some(" ".into()))
            .expect("blank values should fall back to defaults");
        assert_eq!(cfg.rest_addr().to_string(), DEFAULT_REST_ADDR);
        assert!(cfg.seed_sample_data());
        assert_eq!(cfg.clinic_name(), DEFAULT_CLINIC_NAME);
    }

    #[test]
    fn test_from_values_parses_overrides() {
        let cfg = CoreConfig::from_values(
            Some("0.0.0.0:8080".into()),
            Some("off".into()),
            Some("  Riverside Clinic ".into()),
        )
        .expect("overrides should parse");
        assert_eq!(cfg.rest_addr().port(), 8080);
        assert!(!cfg.seed_sample_data());
        assert_eq!(cfg.clinic_name(), "Riverside Clinic");
    }

    #[test]
    fn test_rejects_bad_address() {
        let err = rest_addr_from_env_value(Some("localhost".into()))
            .expect_err("hostname without port should be rejected");
        assert!(matches!(err, ConfigError::InvalidRestAddr { .. }));
    }

    #[test]
    fn test_rejects_unknown_flag() {
        let err = flag_from_env_value(Some("maybe".into()), true)
            .expect_err("unknown flag should be rejected");
        assert!(matches!(err, ConfigError::InvalidFlag(v) if v == "maybe"));
    }

    #[test]
    fn test_new_rejects_blank_clinic_name() {
        let err = CoreConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), false, "   ")
            .expect_err("blank clinic name should be rejected");
        assert!(matches!(err, ConfigError::EmptyClinicName));
    }
}
