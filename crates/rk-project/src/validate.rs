//! Vehicle validation logic.

use crate::schema::{CalibrationDef, EnvironmentDef, RotorDef, VehicleDef};
use rk_core::units::m;
use rk_core::Vec3;
use rk_env::StandardAtmosphere;
use rk_rotor::RotorGeometry;
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_vehicle(vehicle: &VehicleDef) -> Result<(), ValidationError> {
    if vehicle.version == 0 || vehicle.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: vehicle.version,
        });
    }

    validate_environment(&vehicle.environment)?;
    validate_calibration(&vehicle.calibration, "vehicle calibration")?;

    let mut rotor_ids = HashSet::new();
    for rotor in &vehicle.rotors {
        if !rotor_ids.insert(&rotor.id) {
            return Err(ValidationError::DuplicateId {
                id: rotor.id.clone(),
                context: format!("vehicle '{}' rotors", vehicle.name),
            });
        }
        validate_rotor(rotor)?;
    }

    Ok(())
}

fn validate_environment(env: &EnvironmentDef) -> Result<(), ValidationError> {
    if let Err(e) = StandardAtmosphere::state_at(m(env.altitude_m)) {
        return Err(ValidationError::InvalidValue {
            field: "environment altitude_m".to_string(),
            value: env.altitude_m.to_string(),
            reason: e.to_string(),
        });
    }

    if let Some(rho) = env.air_density_kgpm3
        && (!rho.is_finite() || rho <= 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: "environment air_density_kgpm3".to_string(),
            value: rho.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    Ok(())
}

fn validate_calibration(def: &CalibrationDef, field: &str) -> Result<(), ValidationError> {
    if let CalibrationDef::Inline { table } = def
        && let Err(e) = table.validate()
    {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: table.name.clone(),
            reason: e.to_string(),
        });
    }
    Ok(())
}

fn validate_rotor(rotor: &RotorDef) -> Result<(), ValidationError> {
    if rotor.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "rotor id".to_string(),
            value: rotor.id.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    if let Err(e) = RotorGeometry::new(Vec3::from(rotor.position_m), Vec3::from(rotor.normal)) {
        return Err(ValidationError::InvalidValue {
            field: format!("rotor '{}' geometry", rotor.id),
            value: format!("position={:?} normal={:?}", rotor.position_m, rotor.normal),
            reason: e.to_string(),
        });
    }

    if let Err(e) = rotor.params.validate() {
        return Err(ValidationError::InvalidValue {
            field: format!("rotor '{}' params", rotor.id),
            value: format!("{:?}", rotor.params),
            reason: e.to_string(),
        });
    }

    if let Some(calibration) = &rotor.calibration {
        validate_calibration(calibration, &format!("rotor '{}' calibration", rotor.id))?;
    }

    Ok(())
}
