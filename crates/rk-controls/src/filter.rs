//! First-order low-pass filter for actuator commands.
//!
//! Models the response lag of a motor driver: a step command is smoothed into
//! an exponential approach with time constant `tau`:
//!
//! ```text
//! alpha  = exp(-dt / tau)
//! y[n+1] = alpha * y[n] + (1 - alpha) * u
//! ```
//!
//! This is the exact discretization of the continuous lag. With `tau == 0` the
//! filter is a pass-through.

use crate::error::{ControlError, ControlResult};
use rk_core::numeric::clip_unit;
use serde::{Deserialize, Serialize};

/// First-order low-pass filter over a normalized `[0, 1]` command.
///
/// # Example
///
/// ```
/// use rk_controls::FirstOrderFilter;
///
/// let mut filter = FirstOrderFilter::zeroed(0.05).unwrap();
/// filter.set_input(1.0);
///
/// // Ten time constants later the output has settled
/// for _ in 0..500 {
///     filter.advance(0.001);
/// }
///
/// assert!(filter.output() > 0.99);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FirstOrderFilter {
    /// Time constant (seconds), `>= 0`
    time_constant: f64,
    initial_input: f64,
    initial_output: f64,
    input: f64,
    output: f64,
}

impl FirstOrderFilter {
    /// Create a filter with explicit initial input and output.
    ///
    /// # Errors
    ///
    /// Returns error if `time_constant` is negative or not finite.
    pub fn new(time_constant: f64, initial_input: f64, initial_output: f64) -> ControlResult<Self> {
        if !time_constant.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "filter time constant must be finite",
            });
        }
        if time_constant < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "filter time constant cannot be negative",
            });
        }
        let initial_input = clip_unit(initial_input);
        let initial_output = clip_unit(initial_output);
        Ok(Self {
            time_constant,
            initial_input,
            initial_output,
            input: initial_input,
            output: initial_output,
        })
    }

    /// Create a filter that starts (and resets) at zero input and output.
    pub fn zeroed(time_constant: f64) -> ControlResult<Self> {
        Self::new(time_constant, 0.0, 0.0)
    }

    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Store the pending raw input, clipped to `[0, 1]`.
    pub fn set_input(&mut self, input: f64) {
        self.input = clip_unit(input);
    }

    /// Pending raw input.
    pub fn input(&self) -> f64 {
        self.input
    }

    /// Last computed filtered value.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Weight kept from the previous output after a step of `dt` seconds.
    pub fn alpha(&self, dt: f64) -> f64 {
        if self.time_constant == 0.0 {
            return 0.0;
        }
        if dt <= 0.0 || !dt.is_finite() {
            return 1.0;
        }
        (-dt / self.time_constant).exp()
    }

    /// Move the output one step of `dt` seconds toward the pending input.
    pub fn advance(&mut self, dt: f64) {
        let alpha = self.alpha(dt);
        self.output = self.output * alpha + (1.0 - alpha) * self.input;
    }

    /// Restore input and output to their initial values.
    pub fn reset(&mut self) {
        self.input = self.initial_input;
        self.output = self.initial_output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_input_clips() {
        let mut f = FirstOrderFilter::zeroed(0.1).unwrap();
        f.set_input(-0.5);
        assert_eq!(f.input(), 0.0);
        f.set_input(1.5);
        assert_eq!(f.input(), 1.0);
        f.set_input(0.0);
        assert_eq!(f.input(), 0.0);
        f.set_input(1.0);
        assert_eq!(f.input(), 1.0);
        f.set_input(0.3);
        assert_eq!(f.input(), 0.3);
    }

    #[test]
    fn step_response_matches_exponential() {
        let tau = 0.1;
        let dt = 0.01;
        let mut f = FirstOrderFilter::zeroed(tau).unwrap();
        f.set_input(1.0);
        for _ in 0..10 {
            f.advance(dt);
        }
        // After one time constant: 1 - e^-1
        let expected = 1.0 - (-1.0_f64).exp();
        assert!((f.output() - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_time_constant_passes_through() {
        let mut f = FirstOrderFilter::zeroed(0.0).unwrap();
        f.set_input(0.7);
        f.advance(0.001);
        assert_eq!(f.output(), 0.7);
        // even with a zero step
        f.set_input(0.2);
        f.advance(0.0);
        assert_eq!(f.output(), 0.2);
    }

    #[test]
    fn non_positive_dt_holds_output() {
        let mut f = FirstOrderFilter::zeroed(0.5).unwrap();
        f.set_input(1.0);
        f.advance(0.0);
        assert_eq!(f.output(), 0.0);
        f.advance(-1.0);
        assert_eq!(f.output(), 0.0);
    }

    #[test]
    fn reset_restores_zero() {
        let mut f = FirstOrderFilter::zeroed(0.01).unwrap();
        f.set_input(0.9);
        f.advance(0.1);
        assert!(f.output() > 0.0);
        f.reset();
        assert_eq!(f.input(), 0.0);
        assert_eq!(f.output(), 0.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(FirstOrderFilter::zeroed(-0.1).is_err());
        assert!(FirstOrderFilter::zeroed(f64::NAN).is_err());
        assert!(FirstOrderFilter::zeroed(f64::INFINITY).is_err());
        assert!(FirstOrderFilter::zeroed(0.0).is_ok());
    }
}
