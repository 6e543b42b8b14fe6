//! Error types for body operations.

use thiserror::Error;

/// Errors raised by the body-force accumulator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Duplicate contributor: {name}")]
    DuplicateContributor { name: String },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },
}

pub type BodyResult<T> = Result<T, BodyError>;

impl From<BodyError> for rk_core::RkError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::InvalidArg { what } => rk_core::RkError::InvalidArg { what },
            BodyError::DuplicateContributor { .. } => rk_core::RkError::Configuration {
                what: "duplicate contributor",
            },
            BodyError::NonPhysical { what } => rk_core::RkError::NonPhysical { what },
        }
    }
}
