//! Wrench produced by a rotor.

use rk_core::{Vec3, Wrench};

/// Force and torque along the rotor normal, scaled by the air density ratio.
///
/// ```text
/// force  = normal * thrust        * ratio
/// torque = normal * torque_scalar * ratio
/// ```
pub fn compute_wrench(normal: &Vec3, thrust: f64, torque_scalar: f64, density_ratio: f64) -> Wrench {
    Wrench {
        force: normal * (thrust * density_ratio),
        torque: normal * (torque_scalar * density_ratio),
    }
}
