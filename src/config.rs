//! System configuration parameters
//!
//! Every limit and timing constant the monitor uses.  Built once at boot,
//! validated, then only ever handed out by shared reference. Nothing in
//! the control loop mutates it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Datasheet minimums for the HC-SR04 trigger sequence.
const MIN_SETTLE_LOW_US: u32 = 2;
const MIN_PULSE_HIGH_US: u32 = 10;

/// Safety limits consulted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Machine temperature (whole °C) above which the machine is faulted.
    pub temperature_limit_c: i32,
    /// Distance (cm) below which a person is considered too close.
    pub proximity_limit_cm: u32,
    /// Raw vibration magnitude above which the machine is faulted.
    pub vibration_limit: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_limit_c: 65,
            proximity_limit_cm: 50,
            vibration_limit: 600,
        }
    }
}

/// Linear ADC → voltage → temperature mapping (LM35-style sensor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogScale {
    /// ADC count that corresponds to `vref_mv`.
    pub full_scale: u16,
    /// Reference voltage in millivolts.
    pub vref_mv: u32,
    /// Sensor output slope.
    pub mv_per_degree: u32,
}

impl Default for AnalogScale {
    fn default() -> Self {
        Self {
            full_scale: 1023,
            vref_mv: 5000,
            mv_per_degree: 10,
        }
    }
}

/// Input range of the on-chip ADC: the native count that corresponds to
/// `full_scale_mv`.  ESP32-S3 ADC1 at 12 dB attenuation reads roughly
/// 0–3.1 V over 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcRange {
    pub full_scale: u16,
    pub full_scale_mv: u32,
}

impl Default for AdcRange {
    fn default() -> Self {
        Self {
            full_scale: 4095,
            full_scale_mv: 3100,
        }
    }
}

/// Ultrasonic trigger pulse shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerTiming {
    /// Low time before the pulse so the line starts from a clean edge.
    pub settle_low_us: u32,
    /// Width of the high pulse that starts a ranging cycle.
    pub pulse_high_us: u32,
}

impl Default for TriggerTiming {
    fn default() -> Self {
        Self {
            settle_low_us: MIN_SETTLE_LOW_US,
            pulse_high_us: MIN_PULSE_HIGH_US,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub thresholds: Thresholds,
    pub analog: AnalogScale,
    pub adc: AdcRange,
    pub trigger: TriggerTiming,
    /// Heartbeat timer period (milliseconds)
    pub heartbeat_period_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            analog: AnalogScale::default(),
            adc: AdcRange::default(),
            trigger: TriggerTiming::default(),
            heartbeat_period_ms: 500, // 2 Hz
        }
    }
}

impl MonitorConfig {
    /// Reject values that would make a conversion divide by zero or a
    /// trigger pulse too short for the sensor to notice.
    pub fn validate(&self) -> Result<()> {
        if self.analog.full_scale == 0 {
            return Err(Error::Config("analog full scale must be non-zero"));
        }
        if self.analog.vref_mv == 0 {
            return Err(Error::Config("analog reference voltage must be non-zero"));
        }
        if self.analog.mv_per_degree == 0 {
            return Err(Error::Config("temperature slope must be non-zero"));
        }
        if self.adc.full_scale == 0 || self.adc.full_scale_mv == 0 {
            return Err(Error::Config("ADC input range must be non-zero"));
        }
        if self.heartbeat_period_ms == 0 {
            return Err(Error::Config("heartbeat period must be non-zero"));
        }
        if self.trigger.settle_low_us < MIN_SETTLE_LOW_US {
            return Err(Error::Config("trigger settle time below 2 us"));
        }
        if self.trigger.pulse_high_us < MIN_PULSE_HIGH_US {
            return Err(Error::Config("trigger pulse width below 10 us"));
        }
        Ok(())
    }
}
