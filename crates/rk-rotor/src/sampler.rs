//! Air density ratio sampling.

use core::fmt;

use crate::error::{RotorError, RotorResult};
use rk_core::units::Density;
use rk_env::{EnvError, EnvironmentProvider};
use tracing::warn;

/// Borrowed view of the environment that yields `density / sea_level_density`.
///
/// The sea-level reference is read once at construction; the ratio itself is
/// recomputed on every [`refresh`](Self::refresh) and never carried over
/// without one.
pub struct DensitySampler<'env> {
    provider: &'env dyn EnvironmentProvider,
    sea_level_density: f64,
    ratio: f64,
}

impl<'env> DensitySampler<'env> {
    pub fn new(provider: &'env dyn EnvironmentProvider) -> RotorResult<Self> {
        let sea_level_density = provider.sea_level_density().value;
        if !(sea_level_density.is_finite() && sea_level_density > 0.0) {
            return Err(RotorError::Environment(EnvError::NonPhysical {
                what: "sea level air density must be positive",
            }));
        }
        let mut sampler = Self {
            provider,
            sea_level_density,
            ratio: 1.0,
        };
        sampler.refresh();
        Ok(sampler)
    }

    /// Query the provider and recompute the ratio.
    pub fn refresh(&mut self) -> f64 {
        let ratio = self.provider.air_density().value / self.sea_level_density;
        self.ratio = if ratio.is_finite() && ratio >= 0.0 {
            ratio
        } else {
            warn!(
                provider = self.provider.name(),
                ratio, "non-physical air density ratio, using 0"
            );
            0.0
        };
        self.ratio
    }

    /// Ratio from the last refresh.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn sea_level_density(&self) -> Density {
        rk_core::units::kgpm3(self.sea_level_density)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

impl fmt::Debug for DensitySampler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DensitySampler")
            .field("provider", &self.provider.name())
            .field("sea_level_density", &self.sea_level_density)
            .field("ratio", &self.ratio)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_core::units::{kgpm3, m};
    use rk_env::{ConstantDensity, Environment, EnvironmentState, StandardAtmosphere};

    #[test]
    fn sea_level_ratio_is_one() {
        let env = Environment::sea_level();
        let s = DensitySampler::new(&env).unwrap();
        assert!((s.ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_follows_provider_every_refresh() {
        let env = Environment::sea_level();
        let mut s = DensitySampler::new(&env).unwrap();
        env.set_altitude(m(3_000.0)).unwrap();
        // not refreshed yet
        assert!((s.ratio() - 1.0).abs() < 1e-12);
        let r = s.refresh();
        assert!(r < 1.0 && r > 0.5);
    }

    #[test]
    fn doubled_density_doubles_ratio() {
        let sea = StandardAtmosphere::sea_level().air_density.value;
        let env = ConstantDensity::new(kgpm3(2.0 * sea)).unwrap();
        let s = DensitySampler::new(&env).unwrap();
        assert!((s.ratio() - 2.0).abs() < 1e-12);
    }

    struct ZeroReference;

    impl EnvironmentProvider for ZeroReference {
        fn name(&self) -> &str {
            "zero-reference"
        }

        fn state(&self) -> EnvironmentState {
            StandardAtmosphere::sea_level()
        }

        fn sea_level_density(&self) -> Density {
            kgpm3(0.0)
        }
    }

    #[test]
    fn zero_reference_density_is_a_configuration_error() {
        assert!(matches!(
            DensitySampler::new(&ZeroReference),
            Err(RotorError::Environment(_))
        ));
    }
}
