//! Vehicle file schema definitions.

use rk_rotor::{CalibrationTable, RotorParams, SpinDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleDef {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub environment: EnvironmentDef,
    /// Table used by every rotor without its own override.
    #[serde(default)]
    pub calibration: CalibrationDef,
    #[serde(default)]
    pub rotors: Vec<RotorDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EnvironmentDef {
    /// Initial altitude above mean sea level
    #[serde(default)]
    pub altitude_m: f64,
    /// Pin the air density instead of using the standard atmosphere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_density_kgpm3: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum CalibrationDef {
    /// Built-in 51-level bench table
    #[default]
    Reference,
    Inline {
        table: CalibrationTable,
    },
}

impl CalibrationDef {
    pub fn resolve(&self) -> CalibrationTable {
        match self {
            Self::Reference => CalibrationTable::reference(),
            Self::Inline { table } => table.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotorDef {
    pub id: String,
    /// Attachment point in the body frame
    pub position_m: [f64; 3],
    /// Outward normal in the body frame; normalized on load
    pub normal: [f64; 3],
    pub spin: SpinDirection,
    #[serde(default)]
    pub params: RotorParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<CalibrationDef>,
}
