//! Error types for rotor construction.
//!
//! Every variant is a configuration error raised while an actuator is being
//! created. Per-step numeric edge cases are handled locally and never surface.

use rk_controls::ControlError;
use rk_core::RkError;
use rk_env::EnvError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RotorError {
    #[error("Environment provider is not bound")]
    MissingEnvironment,

    #[error("Invalid calibration table '{name}': {what}")]
    InvalidCalibration { name: String, what: &'static str },

    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Invalid rotor parameter: {what}")]
    InvalidParams { what: &'static str },

    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),
}

pub type RotorResult<T> = Result<T, RotorError>;

impl From<RotorError> for RkError {
    fn from(e: RotorError) -> Self {
        match e {
            RotorError::MissingEnvironment => RkError::Configuration {
                what: "environment provider is not bound",
            },
            RotorError::InvalidCalibration { what, .. }
            | RotorError::InvalidGeometry { what }
            | RotorError::InvalidParams { what } => RkError::Configuration { what },
            RotorError::Environment(e) => e.into(),
            RotorError::Control(_) => RkError::Configuration {
                what: "control signal filter",
            },
        }
    }
}
