//! LM35 linear temperature sensor.
//!
//! Output is 10 mV per °C from 0 °C, read through the ADC.  The count is
//! mapped linearly onto the reference voltage, then the voltage onto whole
//! degrees.  All integer: each step truncates toward zero.

use crate::config::AnalogScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    pub raw: u16,
    pub millivolts: u32,
    pub celsius: i32,
}

pub struct TemperatureSensor {
    scale: AnalogScale,
}

impl TemperatureSensor {
    pub fn new(scale: AnalogScale) -> Self {
        Self { scale }
    }

    pub fn convert(&self, raw: u16) -> TemperatureReading {
        let millivolts = self.raw_to_millivolts(raw);
        TemperatureReading {
            raw,
            millivolts,
            celsius: (millivolts / self.scale.mv_per_degree) as i32,
        }
    }

    pub fn celsius(&self, raw: u16) -> i32 {
        self.convert(raw).celsius
    }

    fn raw_to_millivolts(&self, raw: u16) -> u32 {
        // u64 intermediate: 65535 × vref would overflow u32 for vref > 65 V.
        (u64::from(raw) * u64::from(self.scale.vref_mv) / u64::from(self.scale.full_scale)) as u32
    }
}
