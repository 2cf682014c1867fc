//! Configuration loading from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::identity::NearestEncodingResolver;

pub const RECORD_DIR_VAR: &str = "HOSTELGATE_RECORD_DIR";
pub const ROSTER_FILE_VAR: &str = "HOSTELGATE_ROSTER_FILE";
pub const BIND_ADDR_VAR: &str = "HOSTELGATE_BIND_ADDR";
pub const MATCH_TOLERANCE_VAR: &str = "HOSTELGATE_MATCH_TOLERANCE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}='{value}' is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration of the gate service.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding one `DD_MM_YYYY.json` file per day.
    pub record_dir: PathBuf,
    /// Roster snapshot (JSON array).
    pub roster_file: PathBuf,
    pub bind_addr: SocketAddr,
    /// Maximum face-encoding distance accepted as a match.
    pub match_tolerance: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            record_dir: PathBuf::from("Entry_Record"),
            roster_file: PathBuf::from("hostel_student_data.json"),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            match_tolerance: NearestEncodingResolver::DEFAULT_TOLERANCE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take defaults, set but
    /// unparseable keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(RECORD_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.record_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ROSTER_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            config.roster_file = PathBuf::from(file);
        }
        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: BIND_ADDR_VAR,
                    value: addr.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        match lookup(MATCH_TOLERANCE_VAR) {
            Some(raw) => config.match_tolerance = parse_tolerance(&raw)?,
            None => tracing::warn!(
                "{MATCH_TOLERANCE_VAR} not set; using default {}",
                config.match_tolerance
            ),
        }

        Ok(config)
    }
}

fn parse_tolerance(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: MATCH_TOLERANCE_VAR,
        value: raw.to_string(),
        reason,
    };
    let value: f32 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("must be a positive number".to_string()));
    }
    Ok(value)
}
