//! Filter configuration errors.

use thiserror::Error;

pub type ControlResult<T> = Result<T, ControlError>;

/// Raised when a filter is built with unusable settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    #[error("Invalid filter setting: {what}")]
    InvalidArg { what: &'static str },
}
