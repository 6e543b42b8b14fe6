//! Reference environment providers.

use std::cell::Cell;

use crate::atmosphere::StandardAtmosphere;
use crate::error::{EnvError, EnvResult};
use crate::provider::{EnvironmentProvider, EnvironmentState};
use rk_core::units::{Density, Length};

/// Standard atmosphere evaluated at the vehicle's current altitude.
///
/// The altitude is updated through a shared reference so the owner can move
/// the vehicle between steps while actuators keep borrowing the environment.
#[derive(Debug)]
pub struct Environment {
    state: Cell<EnvironmentState>,
}

impl Environment {
    pub fn at_altitude(altitude: Length) -> EnvResult<Self> {
        Ok(Self {
            state: Cell::new(StandardAtmosphere::state_at(altitude)?),
        })
    }

    pub fn sea_level() -> Self {
        Self {
            state: Cell::new(StandardAtmosphere::sea_level()),
        }
    }

    pub fn altitude(&self) -> Length {
        self.state.get().altitude
    }

    /// Move the vehicle to `altitude`. On error the previous state is kept.
    pub fn set_altitude(&self, altitude: Length) -> EnvResult<()> {
        self.state.set(StandardAtmosphere::state_at(altitude)?);
        Ok(())
    }
}

impl EnvironmentProvider for Environment {
    fn name(&self) -> &str {
        "standard-atmosphere"
    }

    fn state(&self) -> EnvironmentState {
        self.state.get()
    }
}

/// Fixed air density, everything else at standard sea level.
#[derive(Clone, Copy, Debug)]
pub struct ConstantDensity {
    state: EnvironmentState,
}

impl ConstantDensity {
    pub fn new(density: Density) -> EnvResult<Self> {
        if !(density.value.is_finite() && density.value > 0.0) {
            return Err(EnvError::NonPhysical {
                what: "air density must be positive and finite",
            });
        }
        let mut state = StandardAtmosphere::sea_level();
        state.air_density = density;
        Ok(Self { state })
    }
}

impl EnvironmentProvider for ConstantDensity {
    fn name(&self) -> &str {
        "constant-density"
    }

    fn state(&self) -> EnvironmentState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_core::units::{kgpm3, m};

    #[test]
    fn environment_tracks_altitude() {
        let env = Environment::sea_level();
        let rho0 = env.air_density();
        env.set_altitude(m(1_500.0)).unwrap();
        assert_eq!(env.altitude(), m(1_500.0));
        assert!(env.air_density() < rho0);
    }

    #[test]
    fn failed_move_keeps_previous_state() {
        let env = Environment::at_altitude(m(100.0)).unwrap();
        let before = env.state();
        assert!(env.set_altitude(m(1.0e6)).is_err());
        assert_eq!(env.state(), before);
    }

    #[test]
    fn constant_density_reports_its_density() {
        let env = ConstantDensity::new(kgpm3(2.45)).unwrap();
        assert_eq!(env.air_density(), kgpm3(2.45));
        assert!((env.sea_level_density().value - 1.225).abs() < 1e-3);
    }

    #[test]
    fn constant_density_rejects_bad_values() {
        assert!(ConstantDensity::new(kgpm3(0.0)).is_err());
        assert!(ConstantDensity::new(kgpm3(-1.0)).is_err());
        assert!(ConstantDensity::new(kgpm3(f64::NAN)).is_err());
    }
}
