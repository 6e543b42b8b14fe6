//! Workspace-wide error type.
//!
//! Each crate keeps its own error enum and converts into [`RkError`] when a
//! caller wants one error type across rotor, environment and body code.

use thiserror::Error;

pub type RkResult<T> = Result<T, RkError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RkError {
    #[error("{what} is not finite: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Bad setup detected while building an actuator or body.
    #[error("Configuration error: {what}")]
    Configuration { what: &'static str },

    #[error("Non-physical state: {what}")]
    NonPhysical { what: &'static str },
}
