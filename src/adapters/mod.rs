//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `hardware` | SensorPort   | ADC1 oneshot (temp, vibration)  |
//! |            | ActuatorPort | HC-SR04 trigger, indicator LEDs |
//! | `console`  | ReportSink   | Serial status stream (stdout)   |

pub mod console;
pub mod hardware;
