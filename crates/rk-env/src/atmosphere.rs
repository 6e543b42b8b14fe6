//! Standard atmosphere by altitude.
//!
//! Layered model (geopotential height `h` in km):
//!
//! | layer | h (km) | temperature (K) | pressure (Pa) |
//! |---|---|---|---|
//! | troposphere | `h <= 11` | `288.15 - 6.5 h` | `101325 (288.15 / T)^-5.255877` |
//! | tropopause | `11 < h <= 20` | `216.65` | `22632.06 exp(-0.1577 (h - 11))` |
//! | stratosphere | `20 < h <= 32` | `196.65 + h` | `5474.889 (216.65 / T)^34.16319` |
//!
//! Density follows the ideal gas law with `R = 287.05 J/(kg·K)`.

use crate::error::{EnvError, EnvResult};
use crate::provider::EnvironmentState;
use rk_core::units::{Length, k, kgpm3, m, pa};
use uom::si::length::{kilometer, meter};

pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
/// Specific gas constant of dry air (J/(kg·K))
pub const AIR_GAS_CONSTANT: f64 = 287.05;
pub const EARTH_RADIUS_KM: f64 = 6_378.137;

/// Lowest altitude accepted by the model (m).
pub const MIN_ALTITUDE_M: f64 = -5_000.0;
/// Highest altitude accepted by the model (m).
pub const MAX_ALTITUDE_M: f64 = 32_000.0;

/// Stateless standard atmosphere model.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardAtmosphere;

impl StandardAtmosphere {
    /// Geopotential height (km) for a geometric altitude (km).
    pub fn geopotential_km(altitude_km: f64) -> f64 {
        (altitude_km * EARTH_RADIUS_KM) / (altitude_km + EARTH_RADIUS_KM)
    }

    /// Standard temperature (K) at geopotential height `h` (km).
    pub fn temperature_k(h: f64) -> f64 {
        if h <= 11.0 {
            SEA_LEVEL_TEMPERATURE_K - 6.5 * h
        } else if h <= 20.0 {
            216.65
        } else {
            196.65 + h
        }
    }

    /// Standard pressure (Pa) at geopotential height `h` (km).
    pub fn pressure_pa(h: f64) -> f64 {
        let t = Self::temperature_k(h);
        if h <= 11.0 {
            SEA_LEVEL_PRESSURE_PA * (SEA_LEVEL_TEMPERATURE_K / t).powf(-5.255_877)
        } else if h <= 20.0 {
            22_632.06 * (-0.1577 * (h - 11.0)).exp()
        } else {
            5_474.889 * (216.65 / t).powf(34.163_19)
        }
    }

    /// Ideal-gas density (kg/m³).
    pub fn density_kgpm3(pressure_pa: f64, temperature_k: f64) -> f64 {
        pressure_pa / (AIR_GAS_CONSTANT * temperature_k)
    }

    /// Full snapshot at sea level.
    pub fn sea_level() -> EnvironmentState {
        EnvironmentState {
            altitude: m(0.0),
            temperature: k(SEA_LEVEL_TEMPERATURE_K),
            pressure: pa(SEA_LEVEL_PRESSURE_PA),
            air_density: kgpm3(Self::density_kgpm3(
                SEA_LEVEL_PRESSURE_PA,
                SEA_LEVEL_TEMPERATURE_K,
            )),
        }
    }

    /// Full snapshot at a geometric altitude.
    ///
    /// # Errors
    ///
    /// Returns error if `altitude` is not finite or outside
    /// `[MIN_ALTITUDE_M, MAX_ALTITUDE_M]`.
    pub fn state_at(altitude: Length) -> EnvResult<EnvironmentState> {
        let alt_m = altitude.get::<meter>();
        if !alt_m.is_finite() {
            return Err(EnvError::InvalidArg {
                what: "altitude must be finite",
            });
        }
        if !(MIN_ALTITUDE_M..=MAX_ALTITUDE_M).contains(&alt_m) {
            return Err(EnvError::OutOfRange { what: "altitude" });
        }

        let h = Self::geopotential_km(altitude.get::<kilometer>());
        let t = Self::temperature_k(h);
        let p = Self::pressure_pa(h);
        let rho = Self::density_kgpm3(p, t);
        if !(rho.is_finite() && rho > 0.0) {
            return Err(EnvError::NonPhysical { what: "air density" });
        }

        Ok(EnvironmentState {
            altitude,
            temperature: k(t),
            pressure: pa(p),
            air_density: kgpm3(rho),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_density() {
        let s = StandardAtmosphere::sea_level();
        assert!((s.air_density.value - 1.225).abs() < 1e-3);
        let at0 = StandardAtmosphere::state_at(m(0.0)).unwrap();
        assert!((at0.air_density.value - s.air_density.value).abs() < 1e-12);
    }

    #[test]
    fn tropopause_values() {
        let s = StandardAtmosphere::state_at(m(11_019.0)).unwrap();
        // 11 km geopotential is slightly above 11 km geometric
        assert!((s.temperature.value - 216.65).abs() < 0.1);
        assert!((s.pressure.value - 22_632.0).abs() < 50.0);
    }

    #[test]
    fn pressure_is_continuous_at_layer_edges() {
        for h in [11.0, 20.0] {
            let below = StandardAtmosphere::pressure_pa(h - 1e-9);
            let above = StandardAtmosphere::pressure_pa(h + 1e-9);
            assert!((below - above).abs() / below < 1e-3, "jump at {h} km");
        }
    }

    #[test]
    fn density_decreases_with_altitude() {
        let mut last = f64::INFINITY;
        for alt in (0..=30_000).step_by(1_000) {
            let rho = StandardAtmosphere::state_at(m(alt as f64))
                .unwrap()
                .air_density
                .value;
            assert!(rho < last, "density not decreasing at {alt} m");
            last = rho;
        }
    }

    #[test]
    fn rejects_out_of_range_altitude() {
        assert!(StandardAtmosphere::state_at(m(40_000.0)).is_err());
        assert!(StandardAtmosphere::state_at(m(-6_000.0)).is_err());
        assert!(StandardAtmosphere::state_at(m(f64::NAN)).is_err());
    }

    #[test]
    fn altitude_units_are_converted() {
        use uom::si::thermodynamic_temperature::kelvin;
        let metres = StandardAtmosphere::state_at(m(5_000.0)).unwrap();
        let kms = StandardAtmosphere::state_at(Length::new::<kilometer>(5.0)).unwrap();
        assert_eq!(metres.air_density, kms.air_density);
        // 5 km geometric is about 4.996 km geopotential: 288.15 - 6.5 * 4.996
        assert!((kms.temperature.get::<kelvin>() - 255.68).abs() < 0.05);
        assert!(StandardAtmosphere::state_at(Length::new::<kilometer>(40.0)).is_err());
    }

    #[test]
    fn below_sea_level_is_denser() {
        let s = StandardAtmosphere::state_at(m(-400.0)).unwrap();
        assert!(s.air_density.value > 1.225);
    }
}
