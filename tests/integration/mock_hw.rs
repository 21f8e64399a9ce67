//! Mock hardware for integration tests.
//!
//! [`MockHardware`] stands in for the whole hardware adapter at the port
//! boundary and records every indicator command.  The pin/ADC mocks below
//! sit one layer lower, under the real `HardwareAdapter`.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use imon::app::events::StatusReport;
use imon::app::ports::{ActuatorPort, ReportSink, SensorPort};
use imon::error::SensorError;
use imon::pins;
use imon::safety::IndicatorOutputs;
use imon::sensors::AnalogInput;

// ── Port-level mock ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetIndicators { warning: bool, status: bool },
}

#[derive(Default)]
pub struct MockHardware {
    /// 10-bit counts returned by the sensor port.
    pub temp_raw: u16,
    pub vib_raw: u16,
    /// Trigger pulses are counted, not recorded: the loop fires one per
    /// iteration.
    pub triggers: u64,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(temp_raw: u16, vib_raw: u16) -> Self {
        Self {
            temp_raw,
            vib_raw,
            ..Self::default()
        }
    }

    pub fn last_indicators(&self) -> Option<IndicatorOutputs> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::SetIndicators { warning, status } => {
                Some(IndicatorOutputs { warning, status })
            }
        })
    }
}

impl SensorPort for MockHardware {
    fn read_temperature_raw(&mut self) -> u16 {
        self.temp_raw
    }

    fn read_vibration_raw(&mut self) -> u16 {
        self.vib_raw
    }
}

impl ActuatorPort for MockHardware {
    fn trigger_ranging(&mut self) {
        self.triggers += 1;
    }

    fn set_indicators(&mut self, outputs: IndicatorOutputs) {
        self.calls.push(ActuatorCall::SetIndicators {
            warning: outputs.warning,
            status: outputs.status,
        });
    }
}

// ── Capturing report sink ─────────────────────────────────────

#[derive(Default)]
pub struct CaptureSink {
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heartbeats(&self) -> usize {
        self.lines.iter().filter(|l| *l == "TIMER: System check").count()
    }
}

impl ReportSink for CaptureSink {
    fn emit(&mut self, report: &StatusReport) {
        self.lines.push(report.to_string());
    }
}

// ── Pin / ADC / delay mocks ───────────────────────────────────

/// Output pin whose level history is shared with the test body.
#[derive(Clone, Default)]
pub struct MockPin {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn level(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// 12-bit ADC with fixed counts per channel.
pub struct MockAdc {
    pub temp: u16,
    pub vib: u16,
}

impl AnalogInput for MockAdc {
    fn read_raw(&mut self, channel: u32) -> Result<u16, SensorError> {
        match channel {
            pins::ADC1_CH_TEMP => Ok(self.temp),
            pins::ADC1_CH_VIB => Ok(self.vib),
            _ => Err(SensorError::AdcReadFailed(-1)),
        }
    }
}

// ── Shared serial buffer ──────────────────────────────────────

/// `Write` target the test keeps a handle to after moving a clone into
/// the sink.
#[derive(Clone, Default)]
pub struct SharedBuf(pub Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
