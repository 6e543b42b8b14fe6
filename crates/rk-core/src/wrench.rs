//! Force/torque pair applied at a point on a rigid body.

use core::ops::{Add, AddAssign, Mul};
use nalgebra::Vector3;

use crate::numeric::Real;

/// Body-frame 3-vector.
pub type Vec3 = Vector3<Real>;

/// Combined force (N) and torque (N·m).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wrench {
    pub force: Vec3,
    pub torque: Vec3,
}

impl Wrench {
    pub fn new(force: Vec3, torque: Vec3) -> Self {
        Self { force, torque }
    }

    pub fn zero() -> Self {
        Self {
            force: Vec3::zeros(),
            torque: Vec3::zeros(),
        }
    }

    /// Wrench about the body origin for a wrench applied at `position`.
    ///
    /// Adds the lever-arm moment `r × F` to the applied torque.
    pub fn about_origin(&self, position: &Vec3) -> Self {
        Self {
            force: self.force,
            torque: self.torque + position.cross(&self.force),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.force.iter().chain(self.torque.iter()).all(|v| v.is_finite())
    }
}

impl Default for Wrench {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Wrench {
    type Output = Wrench;

    fn add(self, rhs: Wrench) -> Wrench {
        Wrench {
            force: self.force + rhs.force,
            torque: self.torque + rhs.torque,
        }
    }
}

impl AddAssign for Wrench {
    fn add_assign(&mut self, rhs: Wrench) {
        self.force += rhs.force;
        self.torque += rhs.torque;
    }
}

impl Mul<Real> for Wrench {
    type Output = Wrench;

    fn mul(self, rhs: Real) -> Wrench {
        Wrench {
            force: self.force * rhs,
            torque: self.torque * rhs,
        }
    }
}
