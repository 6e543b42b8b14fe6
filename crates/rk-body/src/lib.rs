//! Rigid-body force accumulation for rotorkit vehicles.
//!
//! Provides:
//! - `RigidBody`: owns a set of physics contributors, drives their reset/update
//!   cycle in insertion order and sums their wrenches about the body origin
//! - `WrenchAccumulator`: the sink contributors push their per-step wrench into
//!
//! Integrating the body's motion is left to the caller.

pub mod body;
pub mod error;

pub use body::{RigidBody, WrenchAccumulator};
pub use error::{BodyError, BodyResult};
