//! Error types shared by generators and their collaborators
//!
//! Intensity sources and session factories report failures through
//! [`WorkloadError`] as well, so the generator can forward them with `?`
//! without wrapping or translating them.

use thiserror::Error;

/// Errors that can occur while generating a workload
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("Period length must be finite and positive, got {0}")]
    InvalidPeriod(f64),

    #[error("Intensity unit must be finite and positive, got {0}")]
    InvalidUnit(f64),

    #[error("Intensity rate must be finite, got {0}")]
    InvalidRate(f64),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Intensity source error: {0}")]
    Intensity(String),

    #[error("Session factory error: {0}")]
    Factory(String),
}
