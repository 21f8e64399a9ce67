//! HC-SR04 time-of-flight → distance.
//!
//! The echo pulse width is the round trip.  Halve it for the one-way
//! time, then divide by 29.1 µs/cm (speed of sound ≈ 343 m/s).  The
//! divisor is held as 291 tenths so the whole path stays integer; each
//! division truncates toward zero.

use crate::events::EchoPulse;

/// One-way microseconds per centimetre, ×10.
const US_PER_CM_X10: u64 = 291;

/// Distance for a raw round-trip duration.
pub fn cm_from_round_trip(duration_us: u32) -> u32 {
    let one_way_us = u64::from(duration_us / 2);
    (one_way_us * 10 / US_PER_CM_X10) as u32
}

/// Distance for a consumed echo pulse.
pub fn distance_cm(pulse: &EchoPulse) -> u32 {
    cm_from_round_trip(pulse.duration_us())
}
