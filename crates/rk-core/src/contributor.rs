//! Capability shared by everything that pushes a wrench into a rigid body.
//!
//! A body-force accumulator holds a collection of contributors (rotors, drag
//! plates, ...) and drives them uniformly; contributors hand their wrench back
//! through a [`WrenchSink`] once per step.

use crate::report::StateReporter;
use crate::wrench::{Vec3, Wrench};

/// Receiver of per-step wrench contributions.
pub trait WrenchSink {
    /// Accept `wrench` applied at `position` (body frame).
    fn contribute(&mut self, position: &Vec3, wrench: &Wrench);
}

/// A force generator attached at a fixed point of a rigid body.
pub trait PhysicsContributor {
    /// Name for diagnostics.
    fn name(&self) -> &str;

    /// Attachment point in the body frame.
    fn position(&self) -> Vec3;

    /// Outward unit normal at the attachment point.
    fn normal(&self) -> Vec3;

    /// Wrench for the current output-of-record. Must not mutate state.
    fn compute_wrench(&self) -> Wrench;

    /// Restore the contributor to its initial state.
    fn on_reset(&mut self);

    /// Advance one simulation step of `dt` seconds, contributing exactly one
    /// wrench to `sink`.
    fn on_update(&mut self, dt: f64, sink: &mut dyn WrenchSink);

    /// Read-only diagnostics.
    fn report(&self, reporter: &mut dyn StateReporter);
}

impl<T: PhysicsContributor + ?Sized> PhysicsContributor for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn normal(&self) -> Vec3 {
        (**self).normal()
    }

    fn compute_wrench(&self) -> Wrench {
        (**self).compute_wrench()
    }

    fn on_reset(&mut self) {
        (**self).on_reset()
    }

    fn on_update(&mut self, dt: f64, sink: &mut dyn WrenchSink) {
        (**self).on_update(dt, sink)
    }

    fn report(&self, reporter: &mut dyn StateReporter) {
        (**self).report(reporter)
    }
}
