//! Output drivers, hardware initialisation, and the heartbeat timer.

pub mod hw_init;
pub mod hw_timer;
pub mod indicators;
pub mod ultrasonic;
