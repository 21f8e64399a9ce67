//! Application core — pure domain logic, zero I/O.
//!
//! The per-iteration loop (trigger → consume echo → read → evaluate →
//! report, plus the heartbeat) lives in [`service`].  All interaction with
//! hardware happens through the **port traits** in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
