//! Diagnostic identifiers.

use core::fmt;
use core::num::NonZeroU32;

/// Position of a rotor within its vehicle, shown in reports and logs.
///
/// Stored one-based so `Option<RotorId>` is the same size as `RotorId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RotorId(NonZeroU32);

impl RotorId {
    /// Id of the rotor at 0-based `index`. Saturates at `u32::MAX - 1`.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RotorId({})", self.index())
    }
}

impl fmt::Display for RotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
