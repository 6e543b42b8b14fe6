//! Key/value diagnostics sink.
//!
//! Anything that wants to expose its state for telemetry writes named values
//! into a [`StateReporter`]. Format and destination belong to the reporter.

use core::fmt;

/// Scalar value written by a reporter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReportValue {
    Int(i64),
    Real(f64),
}

impl ReportValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Real(v) => *v,
        }
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:.6}"),
        }
    }
}

impl From<i64> for ReportValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ReportValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for ReportValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

/// Sink for structured diagnostics.
pub trait StateReporter {
    /// Start a named group of values (one actuator, one body, ...).
    fn begin_group(&mut self, _name: &str) {}

    /// Write a single named value into the current group.
    fn write_value(&mut self, key: &'static str, value: ReportValue);

    /// Close the current group.
    fn end_group(&mut self) {}
}

/// Emits every value as a `tracing` event.
#[derive(Debug, Default)]
pub struct TracingReporter {
    group: String,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateReporter for TracingReporter {
    fn begin_group(&mut self, name: &str) {
        self.group.clear();
        self.group.push_str(name);
    }

    fn write_value(&mut self, key: &'static str, value: ReportValue) {
        tracing::info!(target: "rotorkit::report", group = %self.group, key, %value);
    }

    fn end_group(&mut self) {
        self.group.clear();
    }
}

/// One captured value.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRecord {
    pub group: String,
    pub key: &'static str,
    pub value: ReportValue,
}

/// Keeps every written value in memory, in write order.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    group: String,
    records: Vec<ReportRecord>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Last value written under `key`, in any group.
    pub fn value(&self, key: &str) -> Option<ReportValue> {
        self.records
            .iter()
            .rev()
            .find(|r| r.key == key)
            .map(|r| r.value)
    }

    /// Last value written under `key` in `group`.
    pub fn group_value(&self, group: &str, key: &str) -> Option<ReportValue> {
        self.records
            .iter()
            .rev()
            .find(|r| r.group == group && r.key == key)
            .map(|r| r.value)
    }

    /// Comma-separated `group.key` column names.
    pub fn csv_header(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{}.{}", r.group, r.key))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-separated values, same column order as [`Self::csv_header`].
    pub fn csv_row(&self) -> String {
        self.records
            .iter()
            .map(|r| r.value.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl StateReporter for RecordingReporter {
    fn begin_group(&mut self, name: &str) {
        self.group.clear();
        self.group.push_str(name);
    }

    fn write_value(&mut self, key: &'static str, value: ReportValue) {
        self.records.push(ReportRecord {
            group: self.group.clone(),
            key,
            value,
        });
    }

    fn end_group(&mut self) {
        self.group.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_reporter_keeps_order_and_groups() {
        let mut r = RecordingReporter::new();
        r.begin_group("rotor0");
        r.write_value("Dir", 1.into());
        r.write_value("thrust", 2.5.into());
        r.end_group();
        r.begin_group("rotor1");
        r.write_value("thrust", 3.0.into());
        r.end_group();

        assert_eq!(r.records().len(), 3);
        assert_eq!(r.group_value("rotor0", "thrust"), Some(ReportValue::Real(2.5)));
        assert_eq!(r.value("thrust"), Some(ReportValue::Real(3.0)));
        assert_eq!(r.csv_header(), "rotor0.Dir,rotor0.thrust,rotor1.thrust");
        assert_eq!(r.csv_row(), "1,2.500000,3.000000");
    }

    #[test]
    fn tracing_reporter_accepts_values_without_subscriber() {
        let mut r = TracingReporter::new();
        r.begin_group("rotor0");
        r.write_value("speed", ReportValue::Real(0.0));
        r.end_group();
    }

    #[test]
    fn report_value_as_f64() {
        assert_eq!(ReportValue::Int(-1).as_f64(), -1.0);
        assert_eq!(ReportValue::Real(0.25).as_f64(), 0.25);
    }
}
