//! Outbound status reports.
//!
//! The [`Monitor`](super::service::Monitor) emits these through the
//! [`ReportSink`](super::ports::ReportSink) port.  Each renders to exactly
//! one line of the diagnostic status stream:
//!
//! ```text
//! CRITICAL: MACHINE FAULT
//! WARNING: HUMAN TOO CLOSE
//! STATUS: NORMAL
//! Temp: 30 | Vib: 100 | Dist: 30
//! TIMER: System check
//! ```

use core::fmt::{self, Write};

use crate::safety::SystemState;
use crate::sensors::Readings;

/// Longest rendered line is a readings line with every field at its type
/// extreme (49 bytes); this leaves headroom.
pub const LINE_CAPACITY: usize = 64;

pub const HEARTBEAT_MESSAGE: &str = "TIMER: System check";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReport {
    /// Evaluator outcome for a completed ranging cycle.
    Verdict(SystemState),
    /// The readings that produced the verdict.
    Readings(Readings),
    /// Periodic liveness line.
    Heartbeat,
}

impl StatusReport {
    /// Render without touching the heap.
    pub fn render(&self) -> heapless::String<LINE_CAPACITY> {
        let mut line = heapless::String::new();
        // Cannot overflow: LINE_CAPACITY covers the widest report.
        let _ = write!(line, "{self}");
        line
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verdict(state) => f.write_str(state.message()),
            Self::Readings(r) => write!(
                f,
                "Temp: {} | Vib: {} | Dist: {}",
                r.temperature_c, r.vibration, r.distance_cm
            ),
            Self::Heartbeat => f.write_str(HEARTBEAT_MESSAGE),
        }
    }
}
