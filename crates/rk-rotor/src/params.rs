//! Rotor configuration: parameters, geometry and spin direction.

use crate::error::{RotorError, RotorResult};
use rk_core::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rotational sense of a rotor. Acts only as a `±1` multiplier on torque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn as_int(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }

    pub fn sign(self) -> f64 {
        self.as_int() as f64
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Which control-to-thrust mapping a rotor uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrustModel {
    /// Empirical speed/thrust table lookup.
    #[default]
    Calibrated,
    /// Thrust linear in the filtered signal, speed in its square root.
    Ideal,
}

/// Rotor parameters, fixed for the actuator's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotorParams {
    /// Time constant of the control-signal low-pass filter (s)
    pub control_signal_filter_tc: f64,
    /// Thrust coefficient C_T (dimensionless)
    pub thrust_coefficient: f64,
    /// Power coefficient C_P (dimensionless)
    pub power_coefficient: f64,
    /// Air density at which C_T and C_P were measured (kg/m³)
    pub air_density: f64,
    pub max_rpm: f64,
    /// Propeller diameter (m)
    pub propeller_diameter: f64,
    /// Propeller height (m)
    pub propeller_height: f64,
    pub thrust_model: ThrustModel,
}

impl Default for RotorParams {
    fn default() -> Self {
        Self {
            control_signal_filter_tc: 0.005,
            thrust_coefficient: 0.109_919,
            power_coefficient: 0.040_164,
            air_density: 1.225,
            max_rpm: 6_396.667,
            propeller_diameter: 0.2286,
            propeller_height: 0.01,
            thrust_model: ThrustModel::Calibrated,
        }
    }
}

impl RotorParams {
    pub fn validate(&self) -> RotorResult<()> {
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !finite_non_negative(self.control_signal_filter_tc) {
            return Err(RotorError::InvalidParams {
                what: "control_signal_filter_tc must be finite and non-negative",
            });
        }
        if !finite_non_negative(self.thrust_coefficient)
            || !finite_non_negative(self.power_coefficient)
        {
            return Err(RotorError::InvalidParams {
                what: "thrust/power coefficients must be finite and non-negative",
            });
        }
        if !(self.air_density.is_finite() && self.air_density > 0.0) {
            return Err(RotorError::InvalidParams {
                what: "air_density must be positive",
            });
        }
        if !finite_non_negative(self.max_rpm) {
            return Err(RotorError::InvalidParams {
                what: "max_rpm must be finite and non-negative",
            });
        }
        if !finite_non_negative(self.propeller_diameter)
            || !finite_non_negative(self.propeller_height)
        {
            return Err(RotorError::InvalidParams {
                what: "propeller dimensions must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// Limits derived from [`RotorParams`] for the idealized thrust model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealRotorLimits {
    /// rad/s
    pub max_speed: f64,
    pub max_speed_square: f64,
    /// N
    pub max_thrust: f64,
    /// N·m
    pub max_torque: f64,
}

impl IdealRotorLimits {
    /// ```text
    /// n          = max_rpm / 60                 (rev/s)
    /// max_speed  = 2 π n                        (rad/s)
    /// max_thrust = C_T ρ n² D⁴
    /// max_torque = C_P ρ n² D⁵ / 2π
    /// ```
    pub fn from_params(params: &RotorParams) -> Self {
        let revolutions_per_second = params.max_rpm / 60.0;
        let max_speed = revolutions_per_second * 2.0 * PI;
        let n_squared = revolutions_per_second * revolutions_per_second;
        let d = params.propeller_diameter;
        Self {
            max_speed,
            max_speed_square: max_speed * max_speed,
            max_thrust: params.thrust_coefficient * params.air_density * n_squared * d.powi(4),
            max_torque: params.power_coefficient * params.air_density * n_squared * d.powi(5)
                / (2.0 * PI),
        }
    }
}

/// Attachment point and outward normal, fixed by the owning body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotorGeometry {
    pub position: Vec3,
    /// Unit length
    pub normal: Vec3,
}

impl RotorGeometry {
    /// Create geometry; `normal` is normalized.
    ///
    /// # Errors
    ///
    /// Returns error if any component is non-finite or `normal` has zero length.
    pub fn new(position: Vec3, normal: Vec3) -> RotorResult<Self> {
        if !position.iter().all(|v| v.is_finite()) {
            return Err(RotorError::InvalidGeometry {
                what: "position must be finite",
            });
        }
        if !normal.iter().all(|v| v.is_finite()) {
            return Err(RotorError::InvalidGeometry {
                what: "normal must be finite",
            });
        }
        let normal = normal
            .try_normalize(1e-12)
            .ok_or(RotorError::InvalidGeometry {
                what: "normal must be non-zero",
            })?;
        Ok(Self { position, normal })
    }
}
