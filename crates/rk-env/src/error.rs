//! Environment model errors.

use rk_core::RkError;
use thiserror::Error;

pub type EnvResult<T> = Result<T, EnvError>;

/// Failures of the atmosphere model or of a provider's configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// The model produced or was given air that cannot exist.
    #[error("Non-physical air state: {what}")]
    NonPhysical { what: &'static str },

    /// Outside the altitude band the model covers.
    #[error("{what} outside the modeled range")]
    OutOfRange { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<EnvError> for RkError {
    fn from(err: EnvError) -> Self {
        match err {
            EnvError::NonPhysical { what } => RkError::NonPhysical { what },
            EnvError::OutOfRange { what } => RkError::InvalidArg { what },
            EnvError::InvalidArg { what } => RkError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EnvError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn error_to_rk_error() {
        let err: RkError = EnvError::OutOfRange { what: "altitude" }.into();
        assert!(matches!(err, RkError::InvalidArg { .. }));
    }
}
