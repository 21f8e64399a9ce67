//! GPIO / peripheral pin assignments for the IMON sensor board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Each line is assigned once at boot and never
//! re-purposed.

// ---------------------------------------------------------------------------
// Operator input
// ---------------------------------------------------------------------------

/// Manual override button.  HIGH = override active (proximity silenced).
/// Shares the edge-capture handler with [`ECHO_GPIO`].
pub const BUTTON_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Indicators (active HIGH)
// ---------------------------------------------------------------------------

/// Red warning LED, lit for machine fault or person too close.
pub const WARNING_LED_GPIO: i32 = 13;
/// Green status LED, lit while the workspace is normal.
pub const STATUS_LED_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic ranger
// ---------------------------------------------------------------------------

/// Digital output: trigger pulse (active HIGH, ≥10 µs).
pub const TRIG_GPIO: i32 = 6;
/// Digital input: echo pulse.  Width is the round-trip time of flight.
/// The sensor drives 5 V; this pin sits behind a divider.
pub const ECHO_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// LM35 temperature sensor, 10 mV/°C.  GPIO 1 = ADC1 channel 0.
pub const TEMP_ADC_GPIO: i32 = 1;
/// Piezo vibration sensor, raw magnitude.  GPIO 2 = ADC1 channel 1.
pub const VIB_ADC_GPIO: i32 = 2;

pub const ADC1_CH_TEMP: u32 = 0;
pub const ADC1_CH_VIB: u32 = 1;
