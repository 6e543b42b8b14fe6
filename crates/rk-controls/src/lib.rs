//! Control-signal conditioning for rotorkit actuators.
//!
//! Actuators do not respond instantly to a command: motor drivers and
//! propellers lag behind. This crate holds the signal-side models that sit
//! between the commanded value and the physical response.
//!
//! - Commands are normalized scalar `f64` values in `[0, 1]`
//! - Filters are advanced explicitly, once per simulation step

pub mod error;
pub mod filter;

pub use error::{ControlError, ControlResult};
pub use filter::FirstOrderFilter;
