//! Safety evaluator.
//!
//! [`evaluate`] is a pure function of the latest readings, the override
//! button and the fixed thresholds.  First match wins:
//!
//! | Priority | Condition                                    | State      |
//! |----------|----------------------------------------------|------------|
//! | 1        | temperature > limit **or** vibration > limit | `Critical` |
//! | 2        | distance < limit **and** override released   | `Warning`  |
//! | 3        | otherwise                                    | `Normal`   |
//!
//! A machine fault always pre-empts a proximity warning, and the override
//! silences only the proximity branch, never the fault branch.
//!
//! [`SafetySupervisor`] wraps the evaluator and logs state changes once
//! on each edge so the diagnostic log does not repeat every cycle.

use core::fmt;

use log::{error, info, warn};

use crate::config::Thresholds;
use crate::sensors::Readings;

/// Workspace condition after one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    Normal,
    Warning,
    Critical,
}

impl SystemState {
    /// Status-stream line for this state.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Normal => "STATUS: NORMAL",
            Self::Warning => "WARNING: HUMAN TOO CLOSE",
            Self::Critical => "CRITICAL: MACHINE FAULT",
        }
    }

    pub const fn indicators(self) -> IndicatorOutputs {
        match self {
            Self::Normal => IndicatorOutputs {
                warning: false,
                status: true,
            },
            Self::Warning | Self::Critical => IndicatorOutputs {
                warning: true,
                status: false,
            },
        }
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Desired LED levels (true = lit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorOutputs {
    pub warning: bool,
    pub status: bool,
}

/// Evaluator result: the state plus the outputs that go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub state: SystemState,
    pub outputs: IndicatorOutputs,
}

impl Verdict {
    fn new(state: SystemState) -> Self {
        Self {
            state,
            outputs: state.indicators(),
        }
    }
}

/// Map readings + override to a verdict.
pub fn evaluate(readings: &Readings, override_active: bool, limits: &Thresholds) -> Verdict {
    if machine_fault(readings, limits) {
        Verdict::new(SystemState::Critical)
    } else if readings.distance_cm < limits.proximity_limit_cm && !override_active {
        Verdict::new(SystemState::Warning)
    } else {
        Verdict::new(SystemState::Normal)
    }
}

fn machine_fault(readings: &Readings, limits: &Thresholds) -> bool {
    readings.temperature_c > limits.temperature_limit_c
        || readings.vibration > limits.vibration_limit
}

/// Safety supervisor.
pub struct SafetySupervisor {
    limits: Thresholds,
    /// Last reported state; `None` until the first completed cycle.
    last: Option<SystemState>,
}

impl SafetySupervisor {
    pub fn new(limits: &Thresholds) -> Self {
        Self {
            limits: *limits,
            last: None,
        }
    }

    /// Evaluate and log the transition if the state changed.
    pub fn evaluate(&mut self, readings: &Readings, override_active: bool) -> Verdict {
        let verdict = evaluate(readings, override_active, &self.limits);
        if self.last != Some(verdict.state) {
            self.log_transition(verdict.state, readings, override_active);
            self.last = Some(verdict.state);
        }
        verdict
    }

    // ── Internal ──────────────────────────────────────────────────

    fn log_transition(&self, to: SystemState, r: &Readings, override_active: bool) {
        match to {
            SystemState::Critical => error!(
                "SAFETY: machine fault (T={}°C limit {}, vib={} limit {})",
                r.temperature_c,
                self.limits.temperature_limit_c,
                r.vibration,
                self.limits.vibration_limit,
            ),
            SystemState::Warning => warn!(
                "SAFETY: person within {} cm (limit {} cm)",
                r.distance_cm, self.limits.proximity_limit_cm,
            ),
            SystemState::Normal if override_active
                && r.distance_cm < self.limits.proximity_limit_cm =>
            {
                info!(
                    "SAFETY: normal, proximity silenced by override ({} cm)",
                    r.distance_cm
                );
            }
            SystemState::Normal => info!("SAFETY: normal"),
        }
    }
}
