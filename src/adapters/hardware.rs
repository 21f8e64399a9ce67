//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the ranging trigger, the indicator LEDs and the analog front end,
//! exposing them through [`SensorPort`] and [`ActuatorPort`].  Generic over
//! `embedded-hal` pins/delay and [`AnalogInput`], so the same adapter runs
//! against ESP-IDF peripherals on device and mocks in tests.
//!
//! The on-chip ADC spans about 3.1 V, while the temperature conversion and
//! the vibration limit are calibrated for 10-bit counts of a 5 V
//! reference.  Native counts are turned into millivolts for the real
//! range, then re-expressed as reference counts.
//!
//! The ports have no error path.  A failed read reports 0 counts, a failed
//! write leaves the line where it was; each fault is logged once when it
//! appears and once when it clears.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::indicators::IndicatorPair;
use crate::drivers::ultrasonic::UltrasonicTrigger;
use crate::config::{AdcRange, AnalogScale, MonitorConfig};
use crate::pins;
use crate::safety::IndicatorOutputs;
use crate::sensors::AnalogInput;

// ── Fault latch ───────────────────────────────────────────────

/// Fault bits, one per hardware path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HwFault {
    TemperatureAdc = 1 << 0,
    VibrationAdc = 1 << 1,
    Trigger = 1 << 2,
    Indicators = 1 << 3,
}

impl HwFault {
    fn label(self) -> &'static str {
        match self {
            Self::TemperatureAdc => "temperature ADC",
            Self::VibrationAdc => "vibration ADC",
            Self::Trigger => "ranging trigger",
            Self::Indicators => "indicator LEDs",
        }
    }
}

#[derive(Debug, Default)]
struct FaultLatch(u8);

impl FaultLatch {
    fn failed(&mut self, fault: HwFault, err: &dyn Debug) {
        let bit = fault as u8;
        if self.0 & bit == 0 {
            warn!("hw: {} failed: {:?}", fault.label(), err);
            self.0 |= bit;
        }
    }

    fn ok(&mut self, fault: HwFault) {
        let bit = fault as u8;
        if self.0 & bit != 0 {
            info!("hw: {} recovered", fault.label());
            self.0 &= !bit;
        }
    }
}

// ── Adapter ───────────────────────────────────────────────────

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, D, W, S, A> {
    trigger: UltrasonicTrigger<P, D>,
    indicators: IndicatorPair<W, S>,
    adc: A,
    range: AdcRange,
    reference: AnalogScale,
    faults: FaultLatch,
}

impl<P, D, W, S, A> HardwareAdapter<P, D, W, S, A>
where
    P: OutputPin,
    D: DelayNs,
    W: OutputPin,
    S: OutputPin,
    A: AnalogInput,
{
    pub fn new(
        trigger: UltrasonicTrigger<P, D>,
        indicators: IndicatorPair<W, S>,
        adc: A,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            trigger,
            indicators,
            adc,
            range: config.adc,
            reference: config.analog,
            faults: FaultLatch::default(),
        }
    }

    /// Native count → millivolts → reference count.
    ///
    /// The last step rounds up so the millivolts recovered from the
    /// reference count are never below the measured ones; the reading is
    /// at most one reference count (≈4.9 mV) high, never low.
    fn to_reference_counts(&self, raw: u16) -> u16 {
        let native_fs = u64::from(self.range.full_scale);
        let mv = u64::from(raw).min(native_fs) * u64::from(self.range.full_scale_mv) / native_fs;
        let counts = (mv * u64::from(self.reference.full_scale)).div_ceil(u64::from(self.reference.vref_mv));
        counts.min(u64::from(self.reference.full_scale)) as u16
    }

    fn read_channel(&mut self, channel: u32, fault: HwFault) -> u16 {
        match self.adc.read_raw(channel) {
            Ok(raw) => {
                self.faults.ok(fault);
                self.to_reference_counts(raw)
            }
            Err(e) => {
                self.faults.failed(fault, &e);
                0
            }
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D, W, S, A> SensorPort for HardwareAdapter<P, D, W, S, A>
where
    P: OutputPin,
    D: DelayNs,
    W: OutputPin,
    S: OutputPin,
    A: AnalogInput,
{
    fn read_temperature_raw(&mut self) -> u16 {
        self.read_channel(pins::ADC1_CH_TEMP, HwFault::TemperatureAdc)
    }

    fn read_vibration_raw(&mut self) -> u16 {
        self.read_channel(pins::ADC1_CH_VIB, HwFault::VibrationAdc)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, D, W, S, A> ActuatorPort for HardwareAdapter<P, D, W, S, A>
where
    P: OutputPin,
    D: DelayNs,
    W: OutputPin,
    S: OutputPin,
    A: AnalogInput,
{
    fn trigger_ranging(&mut self) {
        match self.trigger.fire() {
            Ok(()) => self.faults.ok(HwFault::Trigger),
            Err(e) => self.faults.failed(HwFault::Trigger, &e),
        }
    }

    fn set_indicators(&mut self, outputs: IndicatorOutputs) {
        match self.indicators.apply(outputs) {
            Ok(()) => self.faults.ok(HwFault::Indicators),
            Err(e) => self.faults.failed(HwFault::Indicators, &e),
        }
    }
}
