//! Port traits — the boundary between the monitor loop and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Monitor (domain)
//! ```
//!
//! The hardware adapter implements [`SensorPort`] and [`ActuatorPort`];
//! the console adapter implements [`ReportSink`].  None of these return
//! errors: the loop has no failure path, so adapters log and continue.

use crate::safety::IndicatorOutputs;

use super::events::StatusReport;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw analog acquisition, already scaled to the counts the temperature
/// conversion is calibrated for.
pub trait SensorPort {
    fn read_temperature_raw(&mut self) -> u16;

    fn read_vibration_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Drive one low→high→low trigger pulse to start a ranging cycle.
    fn trigger_ranging(&mut self);

    /// Set the warning / status LEDs.
    fn set_indicators(&mut self, outputs: IndicatorOutputs);
}

// ───────────────────────────────────────────────────────────────
// Report sink (driven adapter: domain → status stream)
// ───────────────────────────────────────────────────────────────

/// Line-oriented, human-readable status output.
pub trait ReportSink {
    fn emit(&mut self, report: &StatusReport);
}
