//! Monitor service — the control loop body.
//!
//! [`Monitor`] owns the sensor conversions and the safety supervisor and
//! reads the interrupt mailboxes in [`Signals`].  One call to
//! [`Monitor::step`] is one loop iteration; the firmware calls it forever
//! with no delay in between.
//!
//! ```text
//!   ActuatorPort ◀── trigger ─┐
//!                             │   ┌────────────────────────┐
//!   Signals.edges ── pulse? ──┼──▶│ distance · temp · vib  │──▶ ReportSink
//!   SensorPort ──── raw ──────┘   │ SafetySupervisor       │
//!   Signals.heartbeat ─────────── │ heartbeat              │──▶ ReportSink
//!                                 └────────────────────────┘
//! ```
//!
//! Nothing waits.  An echo that never returns leaves the pulse window
//! not-ready, so the measurement branch is skipped every iteration until
//! one does; the heartbeat keeps running regardless.  That pending state
//! is visible through [`Monitor::ranging`].

use log::{info, warn};

use crate::config::MonitorConfig;
use crate::events::Signals;
use crate::safety::{SafetySupervisor, Verdict};
use crate::sensors::temperature::TemperatureSensor;
use crate::sensors::{Readings, distance, vibration};

use super::events::StatusReport;
use super::ports::{ActuatorPort, ReportSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// Observable state
// ───────────────────────────────────────────────────────────────

/// Where the current ranging cycle stands.  There is no deadline: a
/// missing echo shows up as an ever-growing `triggers` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangingStatus {
    /// No trigger fired yet.
    Idle,
    /// Triggers fired since the last consumed echo.
    Pending { triggers: u32 },
    /// An echo was consumed this iteration.
    Measured,
}

/// One completed measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub readings: Readings,
    pub verdict: Verdict,
}

/// What a single [`Monitor::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// `Some` when a ready echo was consumed this iteration.
    pub cycle: Option<CycleReport>,
    /// `true` when a heartbeat line was emitted.
    pub heartbeat: bool,
}

// ───────────────────────────────────────────────────────────────
// Monitor
// ───────────────────────────────────────────────────────────────

pub struct Monitor<'a> {
    signals: &'a Signals,
    temperature: TemperatureSensor,
    safety: SafetySupervisor,
    ranging: RangingStatus,
    cycles: u64,
    cycles_at_last_heartbeat: u64,
    /// Latched once a full heartbeat period passes without an echo.
    echo_stale: bool,
}

impl<'a> Monitor<'a> {
    pub fn new(config: &MonitorConfig, signals: &'a Signals) -> Self {
        Self {
            signals,
            temperature: TemperatureSensor::new(config.analog),
            safety: SafetySupervisor::new(&config.thresholds),
            ranging: RangingStatus::Idle,
            cycles: 0,
            cycles_at_last_heartbeat: 0,
            echo_stale: false,
        }
    }

    /// Run one loop iteration: trigger → (consume echo → read → evaluate →
    /// report) → heartbeat.
    ///
    /// The trigger fires unconditionally, even if the previous cycle's echo
    /// has not come back yet.
    pub fn step(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl ReportSink,
    ) -> StepOutcome {
        // 1. Start a ranging cycle
        hw.trigger_ranging();
        self.ranging = match self.ranging {
            RangingStatus::Pending { triggers } => RangingStatus::Pending {
                triggers: triggers.saturating_add(1),
            },
            RangingStatus::Idle | RangingStatus::Measured => RangingStatus::Pending { triggers: 1 },
        };

        // 2. Measurement branch, only with a completed echo
        let cycle = self
            .signals
            .edges
            .take_pulse()
            .map(|pulse| self.complete_cycle(distance::distance_cm(&pulse), hw, sink));

        // 3. Heartbeat, independent of step 2
        let heartbeat = self.signals.heartbeat.take();
        if heartbeat {
            sink.emit(&StatusReport::Heartbeat);
            self.check_echo_health();
        }

        StepOutcome { cycle, heartbeat }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn ranging(&self) -> RangingStatus {
        self.ranging
    }

    /// Number of completed measurement cycles since boot.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// `true` once a heartbeat period has elapsed with no echo consumed.
    pub fn echo_stale(&self) -> bool {
        self.echo_stale
    }

    // ── Internal ──────────────────────────────────────────────

    fn complete_cycle(
        &mut self,
        distance_cm: u32,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl ReportSink,
    ) -> CycleReport {
        let readings = Readings {
            temperature_c: self.temperature.celsius(hw.read_temperature_raw()),
            vibration: vibration::magnitude(hw.read_vibration_raw()),
            distance_cm,
        };

        let verdict = self
            .safety
            .evaluate(&readings, self.signals.edges.override_active());
        hw.set_indicators(verdict.outputs);

        sink.emit(&StatusReport::Verdict(verdict.state));
        sink.emit(&StatusReport::Readings(readings));

        self.ranging = RangingStatus::Measured;
        self.cycles += 1;
        if self.echo_stale {
            info!("RANGING: echo recovered");
            self.echo_stale = false;
        }

        CycleReport { readings, verdict }
    }

    fn check_echo_health(&mut self) {
        let no_echo_since_last = self.cycles == self.cycles_at_last_heartbeat;
        self.cycles_at_last_heartbeat = self.cycles;

        if no_echo_since_last && !self.echo_stale {
            if let RangingStatus::Pending { triggers } = self.ranging {
                warn!("RANGING: no echo for a heartbeat period ({triggers} triggers pending)");
                self.echo_stale = true;
            }
        }
    }
}
