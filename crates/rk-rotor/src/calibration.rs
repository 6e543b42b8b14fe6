//! Empirical speed/thrust calibration tables.
//!
//! A table is plain data: an ordered list of measured `(speed, thrust
//! coefficient)` pairs, the quantization that maps a filtered control value to
//! a row, and the torque-per-thrust constant. Swapping propellers means
//! swapping the table, never the lookup code.

use crate::error::{RotorError, RotorResult};
use crate::params::SpinDirection;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Gravity used to turn tabulated thrust coefficients (kgf) into newtons.
pub const CALIBRATION_GRAVITY: f64 = 9.8;

/// Torque reaction per newton of thrust for the reference rotor.
pub const REFERENCE_TORQUE_PER_THRUST: f64 = 12.0;

/// Measured rotational speed (RPM) at each of the 51 control levels.
const REFERENCE_SPEEDS: [f64; 51] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3753.0, 4601.0, 5322.0, 5995.0, 6752.0, 7466.0, 8103.0,
    8779.0, 9529.0, 10250.0, 10872.0, 11580.0, 12155.0, 12798.0, 13470.0, 14088.0, 14744.0,
    15305.0, 15771.0, 16240.0, 16690.0, 17102.0, 17591.0, 18090.0, 18598.0, 19236.0, 19660.0,
    20172.0, 20612.0, 21192.0, 21536.0, 19462.0, 22656.0, 22908.0, 23386.0, 23785.0, 24120.0,
    24498.0, 24890.0, 25223.0, 25545.0, 25853.0, 26024.0,
];

/// Measured thrust (kgf) at each of the 51 control levels.
const REFERENCE_THRUST_COEFFS: [f64; 51] = [
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.005_846_322_703_108_72,
    0.014_073_353_790_256_4,
    0.020_645_965_192_176_7,
    0.026_399_911_495_665,
    0.036_652_439_982_997_9,
    0.047_939_071_752_560_5,
    0.057_619_815_654_786_5,
    0.069_191_757_451_541,
    0.084_020_891_681_174_8,
    0.100_955_497_458_412,
    0.115_705_443_598_866,
    0.135_160_093_861_176,
    0.156_054_104_097_401,
    0.169_619_722_492_329,
    0.192_924_311_325_644,
    0.218_814_158_364_533,
    0.237_798_338_214_658,
    0.265_252_150_014_848,
    0.287_170_947_287_517,
    0.303_805_104_138_16,
    0.326_548_389_162_877,
    0.347_096_533_774_302,
    0.366_393_972_388_977,
    0.389_839_469_439_802,
    0.415_023_610_860_414,
    0.437_347_664_824_767,
    0.466_642_599_698_386,
    0.489_689_827_241_867,
    0.517_066_780_014_324,
    0.546_315_133_659_014,
    0.572_179_361_021_992,
    0.599_647_147_190_861,
    0.630_189_294_469_061,
    0.662_712_308_507_479,
    0.687_251_299_907_42,
    0.714_393_017_473_784,
    0.734_342_593_293_468,
    0.760_111_329_137_141,
    0.794_010_818_490_419,
    0.815_931_944_824_534,
    0.838_023_092_644_242,
    0.863_345_813_220_917,
    0.883_708_797_447_349,
    0.894_279_242_822_124,
];

/// One measured row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationEntry {
    /// Rotational speed (RPM)
    pub speed: f64,
    /// Thrust in kgf; multiplied by [`CALIBRATION_GRAVITY`] on lookup
    pub thrust_coefficient: f64,
}

/// Maps a filtered control value in `[0, 1]` to a table row.
///
/// The control value is first expressed as a pulse width
/// (`signal_offset + filtered * signal_span`), rounded up to the next multiple
/// of `stride` with the `(x + stride - 1) / stride * stride` pattern in real
/// arithmetic, then re-based and divided by `index_divisor`. The quotient is
/// truncated and clamped into the table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantization {
    pub signal_offset: f64,
    pub signal_span: f64,
    pub stride: f64,
    pub index_divisor: f64,
}

impl Default for Quantization {
    fn default() -> Self {
        Self {
            signal_offset: 1000.0,
            signal_span: 1000.0,
            stride: 20.0,
            index_divisor: 51.0,
        }
    }
}

impl Quantization {
    /// Row index for `filtered` in a table of `len` rows.
    pub fn index(&self, filtered: f64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let converted = self.signal_offset + filtered * self.signal_span;
        let rounded = ((converted + self.stride - 1.0) / self.stride) * self.stride;
        let raw = ((rounded - self.signal_offset) / self.index_divisor).trunc();
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        (raw as usize).min(len - 1)
    }
}

/// Result of a table lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableSample {
    pub index: usize,
    /// RPM
    pub speed: f64,
    /// N
    pub thrust: f64,
}

/// Versioned calibration data for one rotor/propeller type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub quantization: Quantization,
    #[serde(default = "default_torque_per_thrust")]
    pub torque_per_thrust: f64,
    pub entries: Vec<CalibrationEntry>,
}

fn default_torque_per_thrust() -> f64 {
    REFERENCE_TORQUE_PER_THRUST
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl CalibrationTable {
    /// The 51-level bench table shipped with rotorkit.
    pub fn reference() -> Self {
        let entries = REFERENCE_SPEEDS
            .iter()
            .zip(REFERENCE_THRUST_COEFFS.iter())
            .map(|(&speed, &thrust_coefficient)| CalibrationEntry {
                speed,
                thrust_coefficient,
            })
            .collect();
        Self {
            name: "reference-51".to_string(),
            version: 1,
            quantization: Quantization::default(),
            torque_per_thrust: REFERENCE_TORQUE_PER_THRUST,
            entries,
        }
    }

    /// Build a table from parallel speed and thrust columns.
    ///
    /// # Errors
    ///
    /// Returns error if the columns differ in length or the table does not
    /// pass [`Self::validate`].
    pub fn from_columns(
        name: impl Into<String>,
        version: u32,
        speeds: &[f64],
        thrust_coefficients: &[f64],
    ) -> RotorResult<Self> {
        let name = name.into();
        if speeds.len() != thrust_coefficients.len() {
            return Err(RotorError::InvalidCalibration {
                name,
                what: "speed and thrust columns differ in length",
            });
        }
        let table = Self {
            name,
            version,
            quantization: Quantization::default(),
            torque_per_thrust: REFERENCE_TORQUE_PER_THRUST,
            entries: speeds
                .iter()
                .zip(thrust_coefficients)
                .map(|(&speed, &thrust_coefficient)| CalibrationEntry {
                    speed,
                    thrust_coefficient,
                })
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the table is usable.
    ///
    /// Non-monotonic rows are accepted (bench data can dip) but logged.
    pub fn validate(&self) -> RotorResult<()> {
        let invalid = |what| RotorError::InvalidCalibration {
            name: self.name.clone(),
            what,
        };

        if self.entries.is_empty() {
            return Err(invalid("table has no entries"));
        }
        let q = &self.quantization;
        if ![q.signal_offset, q.signal_span, q.stride, q.index_divisor]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("quantization values must be finite"));
        }
        if q.stride <= 0.0 || q.index_divisor <= 0.0 {
            return Err(invalid("quantization stride and divisor must be positive"));
        }
        if !(self.torque_per_thrust.is_finite() && self.torque_per_thrust >= 0.0) {
            return Err(invalid("torque_per_thrust must be finite and non-negative"));
        }
        for entry in &self.entries {
            if !(entry.speed.is_finite() && entry.thrust_coefficient.is_finite()) {
                return Err(invalid("entries must be finite"));
            }
            if entry.speed < 0.0 || entry.thrust_coefficient < 0.0 {
                return Err(invalid("entries must be non-negative"));
            }
        }
        let first = self.entries[0];
        if first.speed != 0.0 || first.thrust_coefficient != 0.0 {
            return Err(invalid("lowest control level must be zero speed and zero thrust"));
        }

        for (i, pair) in self.entries.windows(2).enumerate() {
            if pair[1].speed < pair[0].speed || pair[1].thrust_coefficient < pair[0].thrust_coefficient
            {
                warn!(
                    table = %self.name,
                    index = i + 1,
                    "calibration table is not monotonic"
                );
            }
        }
        Ok(())
    }

    /// Speed and thrust for a filtered control value in `[0, 1]`.
    pub fn lookup(&self, filtered: f64) -> TableSample {
        let index = self.quantization.index(filtered, self.entries.len());
        match self.entries.get(index) {
            Some(entry) => TableSample {
                index,
                speed: entry.speed,
                thrust: CALIBRATION_GRAVITY * entry.thrust_coefficient,
            },
            None => TableSample {
                index: 0,
                speed: 0.0,
                thrust: 0.0,
            },
        }
    }

    /// Reaction torque scalar for `thrust`, signed by spin direction.
    pub fn torque(&self, thrust: f64, spin: SpinDirection) -> f64 {
        thrust * self.torque_per_thrust * spin.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_is_valid() {
        let table = CalibrationTable::reference();
        assert_eq!(table.len(), 51);
        table.validate().unwrap();
    }

    #[test]
    fn zero_control_selects_first_row() {
        let table = CalibrationTable::reference();
        let s = table.lookup(0.0);
        assert_eq!(s.index, 0);
        assert_eq!(s.speed, 0.0);
        assert_eq!(s.thrust, 0.0);
    }

    #[test]
    fn half_control_selects_row_ten() {
        let table = CalibrationTable::reference();
        let s = table.lookup(0.5);
        // (500 + 19) / 51 = 10.17
        assert_eq!(s.index, 10);
        assert_eq!(s.speed, 5322.0);
        assert_eq!(s.thrust, 9.8 * 0.026_399_911_495_665);
    }

    #[test]
    fn full_control_selects_row_nineteen() {
        let table = CalibrationTable::reference();
        // (1000 + 19) / 51 = 19.98, truncated
        assert_eq!(table.lookup(1.0).index, 19);
        assert_eq!(table.lookup(0.999).index, 19);
    }

    #[test]
    fn boundary_between_first_two_levels() {
        let table = CalibrationTable::reference();
        // 1000 * f + 19 crosses 51 at f = 0.032 exactly
        assert_eq!(table.lookup(0.031).index, 0);
        assert_eq!(table.lookup(0.032).index, 1);
        assert_eq!(table.lookup(0.033).index, 1);
    }

    #[test]
    fn out_of_range_inputs_are_clamped_into_table() {
        let table = CalibrationTable::reference();
        assert_eq!(table.lookup(-5.0).index, 0);
        assert_eq!(table.lookup(f64::NAN).index, 0);

        let wide = Quantization {
            index_divisor: 1.0,
            ..Quantization::default()
        };
        assert_eq!(wide.index(1.0, 51), 50);
        assert_eq!(wide.index(1.0e9, 51), 50);
        assert_eq!(wide.index(0.5, 0), 0);
    }

    #[test]
    fn low_signal_stall_region_is_zero() {
        let table = CalibrationTable::reference();
        for i in 0..=6 {
            let f = i as f64 / 1000.0;
            let s = table.lookup(f);
            assert_eq!((s.speed, s.thrust), (0.0, 0.0));
        }
    }

    #[test]
    fn torque_sign_follows_spin() {
        let table = CalibrationTable::reference();
        let thrust = table.lookup(0.7).thrust;
        let cw = table.torque(thrust, SpinDirection::Clockwise);
        let ccw = table.torque(thrust, SpinDirection::CounterClockwise);
        assert!(cw > 0.0);
        assert_eq!(cw, -ccw);
        assert_eq!(cw, thrust * 12.0);
    }

    #[test]
    fn from_columns_rejects_malformed_tables() {
        assert!(CalibrationTable::from_columns("t", 1, &[0.0, 1.0], &[0.0]).is_err());
        assert!(CalibrationTable::from_columns("t", 1, &[], &[]).is_err());
        assert!(CalibrationTable::from_columns("t", 1, &[0.0, -1.0], &[0.0, 0.1]).is_err());
        assert!(CalibrationTable::from_columns("t", 1, &[100.0], &[0.0]).is_err());
        assert!(CalibrationTable::from_columns("t", 1, &[0.0, f64::NAN], &[0.0, 0.1]).is_err());
        let ok = CalibrationTable::from_columns("t", 2, &[0.0, 1000.0], &[0.0, 0.1]).unwrap();
        assert_eq!(ok.version, 2);
    }

    #[test]
    fn bad_quantization_rejected() {
        let mut table = CalibrationTable::reference();
        table.quantization.stride = 0.0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn speed_dip_is_accepted_and_reachable() {
        let mut table = CalibrationTable::reference();
        assert!(table.entries[39].speed < table.entries[38].speed);
        table.quantization.index_divisor = 1.0;
        table.validate().unwrap();

        // (1020.5 + 19 - 1000) / 1 = 39.5
        let dip = table.lookup(0.0205);
        let before = table.lookup(0.0195);
        assert_eq!(dip.index, 39);
        assert_eq!(before.index, 38);
        assert!(dip.speed < before.speed);

        let custom = CalibrationTable::from_columns("dip", 1, &[0.0, 100.0, 50.0], &[0.0, 0.2, 0.1]);
        assert!(custom.is_ok());
    }

    #[test]
    fn serde_round_trip_keeps_lookup() {
        let table = CalibrationTable::reference();
        let json = serde_json::to_string(&table).unwrap();
        let back: CalibrationTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lookup(0.42), table.lookup(0.42));
    }

    #[test]
    fn serde_defaults_quantization_and_torque_constant() {
        let back: CalibrationTable = serde_json::from_str(
            r#"{"name":"bench","version":3,"entries":[{"speed":0.0,"thrust_coefficient":0.0}]}"#,
        )
        .unwrap();
        assert_eq!(back.quantization, Quantization::default());
        assert_eq!(back.torque_per_thrust, 12.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lookup_never_leaves_table(f in -10.0..10.0f64) {
            let table = CalibrationTable::reference();
            let s = table.lookup(f);
            prop_assert!(s.index < table.len());
            prop_assert!(s.speed >= 0.0);
            prop_assert!(s.thrust >= 0.0);
        }

        #[test]
        fn reachable_region_is_monotonic(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let table = CalibrationTable::reference();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let sl = table.lookup(lo);
            let sh = table.lookup(hi);
            prop_assert!(sl.speed <= sh.speed);
            prop_assert!(sl.thrust <= sh.thrust);
        }
    }
}
