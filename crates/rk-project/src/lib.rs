//! rk-project: vehicle file format, validation and assembly.

pub mod build;
pub mod schema;
pub mod validate;

pub use build::{VehicleEnvironment, build_environment, build_rigid_body};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_vehicle};

use rk_body::BodyError;
use rk_env::EnvError;
use rk_rotor::RotorError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rotor error: {0}")]
    Rotor(#[from] RotorError),

    #[error("Body error: {0}")]
    Body(#[from] BodyError),

    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),
}

/// Parse and validate a vehicle from YAML text.
pub fn parse_yaml(content: &str) -> ProjectResult<VehicleDef> {
    let vehicle: VehicleDef = serde_yaml::from_str(content)?;
    validate_vehicle(&vehicle)?;
    Ok(vehicle)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<VehicleDef> {
    let content = std::fs::read_to_string(path)?;
    let vehicle = parse_yaml(&content)?;
    tracing::debug!(path = %path.display(), rotors = vehicle.rotors.len(), "loaded vehicle");
    Ok(vehicle)
}

pub fn save_yaml(path: &std::path::Path, vehicle: &VehicleDef) -> ProjectResult<()> {
    validate_vehicle(vehicle)?;
    let content = serde_yaml::to_string(vehicle)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<VehicleDef> {
    let content = std::fs::read_to_string(path)?;
    let vehicle: VehicleDef = serde_json::from_str(&content)?;
    validate_vehicle(&vehicle)?;
    Ok(vehicle)
}

pub fn save_json(path: &std::path::Path, vehicle: &VehicleDef) -> ProjectResult<()> {
    validate_vehicle(vehicle)?;
    let content = serde_json::to_string_pretty(vehicle)?;
    std::fs::write(path, content)?;
    Ok(())
}
