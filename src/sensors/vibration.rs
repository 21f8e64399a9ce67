//! Piezo vibration sensor.  The raw ADC magnitude is the reading.

pub fn magnitude(raw: u16) -> u16 {
    raw
}
