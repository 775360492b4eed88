// Error types: invalid environment settings, unknown sensitivity presets

use thiserror::Error;

/// Settings Errors
#[derive(Error, Debug, PartialEq, Clone)]
pub enum SettingsError {
    #[error("{name} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Minimum target distance must be a non-negative number, got {0}")]
    InvalidMinDistance(f64),
}

/// Sensitivity Errors
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SensitivityError {
    #[error("Unknown game '{0}' (expected one of: {1})")]
    UnknownGame(String, String),
}
