//! HC-SR04 trigger driver.
//!
//! A ranging cycle starts with a short low settle period followed by a
//! ≥10 µs high pulse on TRIG.  The sensor then raises ECHO for the
//! round-trip time of flight; that edge pair is captured by the edge
//! interrupt, not here.
//!
//! Generic over `embedded-hal` so the exact pin/delay sequence can be
//! checked on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::TriggerTiming;
use crate::error::ActuatorError;

pub struct UltrasonicTrigger<P, D> {
    pin: P,
    delay: D,
    timing: TriggerTiming,
}

impl<P: OutputPin, D: DelayNs> UltrasonicTrigger<P, D> {
    pub fn new(pin: P, delay: D, timing: TriggerTiming) -> Self {
        Self { pin, delay, timing }
    }

    /// Drive low → high → low.  Busy-waits for the two short delays
    /// (≈12 µs total); this is the only time the loop spends waiting.
    pub fn fire(&mut self) -> Result<(), ActuatorError> {
        self.pin.set_low().map_err(|_| ActuatorError::TriggerFailed)?;
        self.delay.delay_us(self.timing.settle_low_us);
        self.pin.set_high().map_err(|_| ActuatorError::TriggerFailed)?;
        self.delay.delay_us(self.timing.pulse_high_us);
        self.pin.set_low().map_err(|_| ActuatorError::TriggerFailed)
    }
}
