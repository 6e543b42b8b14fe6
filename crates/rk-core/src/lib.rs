//! rk-core: shared vocabulary for rotorkit.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (clipping and ratio helpers)
//! - ids (rotor identifiers for diagnostics)
//! - wrench (force/torque pair and vector alias)
//! - report (key/value diagnostics sink)
//! - contributor (capability of anything that pushes a wrench into a body)
//! - error (workspace-wide error type)

pub mod contributor;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod report;
pub mod units;
pub mod wrench;

pub use contributor::{PhysicsContributor, WrenchSink};
pub use error::{RkError, RkResult};
pub use ids::RotorId;
pub use numeric::*;
pub use report::{RecordingReporter, ReportValue, StateReporter, TracingReporter};
pub use units::*;
pub use wrench::{Vec3, Wrench};
