//! rk-rotor: rotor actuator model.
//!
//! Converts a normalized control command into a wrench applied at a fixed
//! attachment point on the vehicle body:
//!
//! - control-signal lag through a first-order filter
//! - control-to-speed/thrust mapping through an empirical calibration table
//!   (or the idealized C_T/C_P model)
//! - torque reaction signed by spin direction
//! - force and torque scaled by ambient air density relative to sea level
//!
//! `RotorActuator` implements `rk_core::PhysicsContributor`, so a body-force
//! accumulator can drive rotors alongside any other force generator.
//!
//! # Example
//!
//! ```
//! use rk_core::Vec3;
//! use rk_env::Environment;
//! use rk_rotor::{RotorActuator, RotorGeometry, RotorParams, SpinDirection};
//!
//! let env = Environment::sea_level();
//! let geometry = RotorGeometry::new(Vec3::new(0.2, 0.2, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
//! let mut rotor =
//!     RotorActuator::new(geometry, SpinDirection::Clockwise, RotorParams::default(), &env).unwrap();
//!
//! rotor.set_control_signal(0.6);
//! for _ in 0..1000 {
//!     rotor.update(0.003);
//! }
//!
//! let out = rotor.output();
//! assert!(out.thrust > 0.0);
//! assert!(out.torque_scalar > 0.0);
//! ```

pub mod actuator;
pub mod calibration;
pub mod error;
pub mod params;
pub mod sampler;
pub mod wrench;

pub use actuator::{RotorActuator, RotorActuatorBuilder, RotorOutput};
pub use calibration::{
    CALIBRATION_GRAVITY, CalibrationEntry, CalibrationTable, Quantization, TableSample,
};
pub use error::{RotorError, RotorResult};
pub use params::{IdealRotorLimits, RotorGeometry, RotorParams, SpinDirection, ThrustModel};
pub use sampler::DensitySampler;
pub use wrench::compute_wrench;
