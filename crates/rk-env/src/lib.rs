//! rk-env: ambient environment for rotorkit vehicles.
//!
//! Provides:
//! - `EnvironmentProvider` trait: the only view actuators have of the air around them
//! - `StandardAtmosphere`: temperature, pressure and density by altitude
//! - `Environment`: standard atmosphere at a settable vehicle altitude
//! - `ConstantDensity`: fixed density, for tests and what-if runs
//!
//! # Example
//!
//! ```
//! use rk_env::{Environment, EnvironmentProvider};
//! use rk_core::units::m;
//!
//! let env = Environment::at_altitude(m(0.0)).unwrap();
//! let rho = env.air_density();
//! assert!((rho.value - 1.225).abs() < 1e-3);
//!
//! env.set_altitude(m(2_000.0)).unwrap();
//! assert!(env.air_density() < rho);
//! ```

pub mod atmosphere;
pub mod environment;
pub mod error;
pub mod provider;

pub use atmosphere::StandardAtmosphere;
pub use environment::{ConstantDensity, Environment};
pub use error::{EnvError, EnvResult};
pub use provider::{EnvironmentProvider, EnvironmentState};
