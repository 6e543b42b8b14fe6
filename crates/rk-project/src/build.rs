//! Assemble runtime objects from a validated [`VehicleDef`].

use crate::schema::{EnvironmentDef, VehicleDef};
use crate::validate::validate_vehicle;
use crate::ProjectResult;
use rk_body::RigidBody;
use rk_core::units::{kgpm3, m, Length};
use rk_core::{RotorId, Vec3};
use rk_env::{ConstantDensity, EnvResult, Environment, EnvironmentProvider, EnvironmentState};
use rk_rotor::{RotorActuator, RotorGeometry};

/// Environment described by a vehicle file.
#[derive(Debug)]
pub enum VehicleEnvironment {
    Standard(Environment),
    Constant(ConstantDensity),
}

impl VehicleEnvironment {
    /// Move the vehicle. A pinned density ignores altitude.
    pub fn set_altitude(&self, altitude: Length) -> EnvResult<()> {
        match self {
            Self::Standard(env) => env.set_altitude(altitude),
            Self::Constant(_) => Ok(()),
        }
    }
}

impl EnvironmentProvider for VehicleEnvironment {
    fn name(&self) -> &str {
        match self {
            Self::Standard(env) => env.name(),
            Self::Constant(env) => env.name(),
        }
    }

    fn state(&self) -> EnvironmentState {
        match self {
            Self::Standard(env) => env.state(),
            Self::Constant(env) => env.state(),
        }
    }
}

pub fn build_environment(def: &EnvironmentDef) -> ProjectResult<VehicleEnvironment> {
    let env = match def.air_density_kgpm3 {
        Some(rho) => VehicleEnvironment::Constant(ConstantDensity::new(kgpm3(rho))?),
        None => VehicleEnvironment::Standard(Environment::at_altitude(m(def.altitude_m))?),
    };
    Ok(env)
}

/// Build a rigid body carrying one actuator per rotor entry.
///
/// Actuators are named after their rotor id and numbered in file order.
pub fn build_rigid_body<'env>(
    vehicle: &VehicleDef,
    environment: &'env dyn EnvironmentProvider,
) -> ProjectResult<RigidBody<RotorActuator<'env>>> {
    validate_vehicle(vehicle)?;

    let mut body = RigidBody::new(vehicle.name.clone());
    for (i, rotor) in vehicle.rotors.iter().enumerate() {
        let geometry = RotorGeometry::new(Vec3::from(rotor.position_m), Vec3::from(rotor.normal))?;
        let table = rotor
            .calibration
            .as_ref()
            .unwrap_or(&vehicle.calibration)
            .resolve();
        let actuator = RotorActuator::builder()
            .id(RotorId::from_index(i as u32))
            .name(rotor.id.clone())
            .geometry(geometry)
            .spin_direction(rotor.spin)
            .params(rotor.params.clone())
            .table(table)
            .environment(environment)
            .build()?;
        body.add_contributor(actuator)?;
    }

    tracing::debug!(
        vehicle = %vehicle.name,
        rotors = body.len(),
        environment = environment.name(),
        "built rigid body"
    );
    Ok(body)
}
