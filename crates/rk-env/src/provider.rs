//! Environment provider interface.

use crate::atmosphere::StandardAtmosphere;
use rk_core::units::{Density, Length, Pressure, Temperature};

/// Snapshot of the ambient air at the vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentState {
    /// Geometric altitude above mean sea level
    pub altitude: Length,
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub air_density: Density,
}

/// Source of ambient air properties at the vehicle's current state.
///
/// Actuators hold a shared borrow of a provider and query it once per step.
/// How the provider computes its values (altitude model, weather, ...) is its
/// own concern.
pub trait EnvironmentProvider {
    /// Model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Full snapshot at the current state.
    fn state(&self) -> EnvironmentState;

    /// Ambient air density at the current state.
    fn air_density(&self) -> Density {
        self.state().air_density
    }

    /// Reference density used to normalize generated forces.
    ///
    /// Defaults to the standard atmosphere at sea level.
    fn sea_level_density(&self) -> Density {
        StandardAtmosphere::sea_level().air_density
    }
}
