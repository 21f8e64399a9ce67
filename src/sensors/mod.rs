//! Sensor readers — temperature, vibration and ultrasonic distance.
//!
//! Each reader is a synchronous, non-blocking conversion from raw counts
//! (or a captured echo pulse) to engineering units.  Raw acquisition goes
//! through [`AnalogInput`] so the conversions stay host-testable.

pub mod distance;
pub mod temperature;
pub mod vibration;

use crate::error::SensorError;

/// One iteration's worth of readings.  Recomputed every ranging cycle;
/// no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Readings {
    /// Machine temperature, whole °C.
    pub temperature_c: i32,
    /// Raw vibration magnitude (higher = more vibration).
    pub vibration: u16,
    /// Distance to the nearest object, whole cm.
    pub distance_cm: u32,
}

/// Oneshot analog channel access.
pub trait AnalogInput {
    /// Read the native-resolution count on `channel`.
    fn read_raw(&mut self, channel: u32) -> Result<u16, SensorError>;
}
