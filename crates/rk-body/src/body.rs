//! Body-force accumulator.

use crate::error::{BodyError, BodyResult};
use rk_core::{PhysicsContributor, ReportValue, StateReporter, Vec3, Wrench, WrenchSink};
use tracing::{debug, trace};

/// Sums contributed wrenches about the body origin.
///
/// A wrench applied at `r` adds its force unchanged and its torque plus the
/// lever-arm moment `r × F`.
#[derive(Clone, Debug, Default)]
pub struct WrenchAccumulator {
    total: Wrench,
    contributions: usize,
}

impl WrenchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.total = Wrench::zero();
        self.contributions = 0;
    }

    pub fn total(&self) -> Wrench {
        self.total
    }

    /// Number of contributions since the last clear.
    pub fn contributions(&self) -> usize {
        self.contributions
    }
}

impl WrenchSink for WrenchAccumulator {
    fn contribute(&mut self, position: &Vec3, wrench: &Wrench) {
        self.total += wrench.about_origin(position);
        self.contributions += 1;
    }
}

/// A rigid body driven by its physics contributors.
///
/// Contributors are reset and updated in insertion order; each update yields
/// the body's total wrench for that step.
#[derive(Debug)]
pub struct RigidBody<C> {
    name: String,
    contributors: Vec<C>,
    accumulator: WrenchAccumulator,
    steps: u64,
}

impl<C: PhysicsContributor> RigidBody<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contributors: Vec::new(),
            accumulator: WrenchAccumulator::new(),
            steps: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a contributor. Names must be unique within the body.
    pub fn add_contributor(&mut self, contributor: C) -> BodyResult<()> {
        if self
            .contributors
            .iter()
            .any(|c| c.name() == contributor.name())
        {
            return Err(BodyError::DuplicateContributor {
                name: contributor.name().to_string(),
            });
        }
        self.contributors.push(contributor);
        Ok(())
    }

    pub fn contributors(&self) -> &[C] {
        &self.contributors
    }

    pub fn contributors_mut(&mut self) -> &mut [C] {
        &mut self.contributors
    }

    pub fn contributor_mut(&mut self, name: &str) -> Option<&mut C> {
        self.contributors.iter_mut().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Steps run since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Reset every contributor and recompute the body wrench from their
    /// initial outputs.
    pub fn reset(&mut self) {
        self.accumulator.clear();
        for c in &mut self.contributors {
            c.on_reset();
            self.accumulator.contribute(&c.position(), &c.compute_wrench());
        }
        self.steps = 0;
        debug!(body = %self.name, contributors = self.contributors.len(), "body reset");
    }

    /// Run one step of `dt` seconds on every contributor and return the total
    /// wrench about the body origin.
    ///
    /// # Errors
    ///
    /// Returns error if `dt` is not positive and finite, if a contributor did
    /// not contribute exactly once, or if the total is not finite.
    pub fn update(&mut self, dt: f64) -> BodyResult<Wrench> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(BodyError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }

        // Rejected steps leave the previous wrench-of-record in place.
        let mut step = WrenchAccumulator::new();
        for c in &mut self.contributors {
            c.on_update(dt, &mut step);
        }

        if step.contributions() != self.contributors.len() {
            return Err(BodyError::NonPhysical {
                what: "each contributor must contribute exactly one wrench per step",
            });
        }
        let total = step.total();
        if !total.is_finite() {
            return Err(BodyError::NonPhysical {
                what: "body wrench is not finite",
            });
        }

        self.accumulator = step;
        self.steps += 1;
        trace!(
            body = %self.name,
            step = self.steps,
            fz = total.force.z,
            tz = total.torque.z,
            "body updated"
        );
        Ok(total)
    }

    /// Total wrench from the last reset/update.
    pub fn wrench(&self) -> Wrench {
        self.accumulator.total()
    }

    /// Body totals followed by every contributor's own report.
    pub fn report(&self, reporter: &mut dyn StateReporter) {
        let w = self.wrench();
        reporter.begin_group(&self.name);
        reporter.write_value("Fx", ReportValue::Real(w.force.x));
        reporter.write_value("Fy", ReportValue::Real(w.force.y));
        reporter.write_value("Fz", ReportValue::Real(w.force.z));
        reporter.write_value("Tx", ReportValue::Real(w.torque.x));
        reporter.write_value("Ty", ReportValue::Real(w.torque.y));
        reporter.write_value("Tz", ReportValue::Real(w.torque.z));
        reporter.end_group();
        for c in &self.contributors {
            c.report(reporter);
        }
    }
}
