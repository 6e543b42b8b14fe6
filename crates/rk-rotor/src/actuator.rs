//! Rotor actuator lifecycle.
//!
//! Each step runs in a fixed order inside [`RotorActuator::update`]:
//!
//! 1. refresh the air density ratio from the environment
//! 2. compute the output-of-record from the filter's current output
//! 3. compute the wrench from that output
//! 4. advance the control-signal filter
//!
//! The filter is advanced last, so the value driving step `N` is the one
//! produced by step `N - 1`, and the output reported right after a reset is
//! the zero-signal steady state.

use core::fmt;

use crate::calibration::CalibrationTable;
use crate::error::{RotorError, RotorResult};
use crate::params::{IdealRotorLimits, RotorGeometry, RotorParams, SpinDirection, ThrustModel};
use crate::sampler::DensitySampler;
use crate::wrench::compute_wrench;
use rk_controls::FirstOrderFilter;
use rk_core::{PhysicsContributor, ReportValue, RotorId, StateReporter, Vec3, Wrench, WrenchSink};
use rk_env::EnvironmentProvider;
use tracing::debug;

/// Output-of-record for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotorOutput {
    /// N, before density scaling
    pub thrust: f64,
    /// N·m, signed by spin direction, before density scaling
    pub torque_scalar: f64,
    /// RPM for calibrated rotors, rad/s for ideal rotors
    pub speed: f64,
    pub spin_direction: SpinDirection,
    pub control_signal_filtered: f64,
    pub control_signal_input: f64,
}

/// A rotor attached to a rigid body.
///
/// Borrows its environment provider for `'env`; the provider must outlive the
/// actuator.
pub struct RotorActuator<'env> {
    id: Option<RotorId>,
    name: String,
    geometry: RotorGeometry,
    spin_direction: SpinDirection,
    params: RotorParams,
    ideal: IdealRotorLimits,
    table: CalibrationTable,
    filter: FirstOrderFilter,
    sampler: DensitySampler<'env>,
    output: RotorOutput,
}

impl<'env> RotorActuator<'env> {
    /// Create a rotor using the reference calibration table.
    pub fn new(
        geometry: RotorGeometry,
        spin_direction: SpinDirection,
        params: RotorParams,
        environment: &'env dyn EnvironmentProvider,
    ) -> RotorResult<Self> {
        Self::builder()
            .geometry(geometry)
            .spin_direction(spin_direction)
            .params(params)
            .environment(environment)
            .build()
    }

    pub fn builder() -> RotorActuatorBuilder<'env> {
        RotorActuatorBuilder::default()
    }

    pub fn id(&self) -> Option<RotorId> {
        self.id
    }

    pub fn geometry(&self) -> &RotorGeometry {
        &self.geometry
    }

    pub fn spin_direction(&self) -> SpinDirection {
        self.spin_direction
    }

    pub fn params(&self) -> &RotorParams {
        &self.params
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Density ratio from the most recent reset/update.
    pub fn density_ratio(&self) -> f64 {
        self.sampler.ratio()
    }

    /// Command in `[0, 1]`; values outside are clipped.
    pub fn set_control_signal(&mut self, control_signal: f64) {
        self.filter.set_input(control_signal);
    }

    pub fn output(&self) -> RotorOutput {
        self.output
    }

    /// Zero the filter and report the zero-signal output.
    pub fn reset(&mut self) {
        self.sampler.refresh();
        self.filter.reset();
        self.output = self.compute_output();
        debug!(rotor = %self.name, ratio = self.sampler.ratio(), "rotor reset");
    }

    /// Run one step of `dt` seconds and return the wrench it produced.
    pub fn update(&mut self, dt: f64) -> Wrench {
        self.sampler.refresh();
        self.output = self.compute_output();
        let wrench = self.wrench();
        self.filter.advance(dt);
        wrench
    }

    /// Wrench for the current output-of-record and density ratio.
    pub fn wrench(&self) -> Wrench {
        compute_wrench(
            &self.geometry.normal,
            self.output.thrust,
            self.output.torque_scalar,
            self.sampler.ratio(),
        )
    }

    /// Write the output-of-record into `reporter`. Never mutates the rotor.
    pub fn report(&self, reporter: &mut dyn StateReporter) {
        reporter.begin_group(&self.name);
        reporter.write_value("Dir", ReportValue::Int(self.spin_direction.as_int() as i64));
        reporter.write_value("Ctrl-in", self.output.control_signal_input.into());
        reporter.write_value("Ctrl-fl", self.output.control_signal_filtered.into());
        reporter.write_value("speed", self.output.speed.into());
        reporter.write_value("thrust", self.output.thrust.into());
        reporter.write_value("torque", self.output.torque_scalar.into());
        reporter.end_group();
    }

    // Thrust and torque come from the same filter reading, so they always
    // belong to the same step.
    fn compute_output(&self) -> RotorOutput {
        let filtered = self.filter.output();
        let (speed, thrust, torque_scalar) = match self.params.thrust_model {
            ThrustModel::Calibrated => {
                let sample = self.table.lookup(filtered);
                let torque = self.table.torque(sample.thrust, self.spin_direction);
                (sample.speed, sample.thrust, torque)
            }
            ThrustModel::Ideal => (
                (filtered * self.ideal.max_speed_square).sqrt(),
                filtered * self.ideal.max_thrust,
                filtered * self.ideal.max_torque * self.spin_direction.sign(),
            ),
        };
        RotorOutput {
            thrust,
            torque_scalar,
            speed,
            spin_direction: self.spin_direction,
            control_signal_filtered: filtered,
            control_signal_input: self.filter.input(),
        }
    }
}

impl fmt::Debug for RotorActuator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotorActuator")
            .field("name", &self.name)
            .field("spin_direction", &self.spin_direction)
            .field("table", &self.table.name)
            .field("sampler", &self.sampler)
            .field("output", &self.output)
            .finish()
    }
}

impl PhysicsContributor for RotorActuator<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Vec3 {
        self.geometry.position
    }

    fn normal(&self) -> Vec3 {
        self.geometry.normal
    }

    fn compute_wrench(&self) -> Wrench {
        self.wrench()
    }

    fn on_reset(&mut self) {
        self.reset();
    }

    fn on_update(&mut self, dt: f64, sink: &mut dyn WrenchSink) {
        let wrench = self.update(dt);
        sink.contribute(&self.geometry.position, &wrench);
    }

    fn report(&self, reporter: &mut dyn StateReporter) {
        RotorActuator::report(self, reporter);
    }
}

/// Collects everything a rotor needs before it can run.
///
/// `build` fails fast when the environment, geometry or spin direction is
/// missing, or when parameters or the calibration table are malformed.
#[derive(Default)]
pub struct RotorActuatorBuilder<'env> {
    id: Option<RotorId>,
    name: Option<String>,
    geometry: Option<RotorGeometry>,
    spin_direction: Option<SpinDirection>,
    params: Option<RotorParams>,
    table: Option<CalibrationTable>,
    environment: Option<&'env dyn EnvironmentProvider>,
}

impl<'env> RotorActuatorBuilder<'env> {
    pub fn id(mut self, id: RotorId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn geometry(mut self, geometry: RotorGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn spin_direction(mut self, spin_direction: SpinDirection) -> Self {
        self.spin_direction = Some(spin_direction);
        self
    }

    pub fn params(mut self, params: RotorParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn table(mut self, table: CalibrationTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn environment(mut self, environment: &'env dyn EnvironmentProvider) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Bind everything and run the initial reset.
    pub fn build(self) -> RotorResult<RotorActuator<'env>> {
        let environment = self.environment.ok_or(RotorError::MissingEnvironment)?;
        let geometry = self.geometry.ok_or(RotorError::InvalidGeometry {
            what: "geometry not set",
        })?;
        let spin_direction = self.spin_direction.ok_or(RotorError::InvalidParams {
            what: "spin direction not set",
        })?;
        let params = self.params.unwrap_or_default();
        params.validate()?;
        let table = self.table.unwrap_or_default();
        table.validate()?;

        let name = match (self.name, self.id) {
            (Some(name), _) => name,
            (None, Some(id)) => format!("rotor{id}"),
            (None, None) => "rotor".to_string(),
        };
        let filter = FirstOrderFilter::zeroed(params.control_signal_filter_tc)?;
        let sampler = DensitySampler::new(environment)?;

        let mut rotor = RotorActuator {
            id: self.id,
            name,
            geometry,
            spin_direction,
            ideal: IdealRotorLimits::from_params(&params),
            params,
            table,
            filter,
            sampler,
            output: RotorOutput {
                thrust: 0.0,
                torque_scalar: 0.0,
                speed: 0.0,
                spin_direction,
                control_signal_filtered: 0.0,
                control_signal_input: 0.0,
            },
        };
        rotor.reset();
        debug!(
            rotor = %rotor.name,
            environment = rotor.sampler.provider_name(),
            table = %rotor.table.name,
            "rotor initialized"
        );
        Ok(rotor)
    }
}
