//! IMON Firmware — Main Entry Point
//!
//! Hexagonal layout around a single busy loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              SerialReportSink                 │
//! │  (Sensor+Actuator)            (ReportSink → stdout)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Monitor (pure logic)                      │    │
//! │  │  conversions · SafetySupervisor · heartbeat            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Edge ISR (button+echo) · esp_timer heartbeat → SIGNALS        │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::{error, info};

use esp_idf_hal::delay::{Ets, FreeRtos};

use imon::adapters::console::SerialReportSink;
use imon::adapters::hardware::HardwareAdapter;
use imon::app::service::Monitor;
use imon::config::MonitorConfig;
use imon::drivers::hw_init::{self, Adc1, RawPin};
use imon::drivers::hw_timer::HeartbeatTimer;
use imon::drivers::indicators::IndicatorPair;
use imon::drivers::ultrasonic::UltrasonicTrigger;
use imon::events::SIGNALS;
use imon::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  IMON v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    if let Err(e) = run() {
        // Monitoring never started; park so the error stays on the console.
        error!("Bring-up failed: {:#}, halting", e);
        loop {
            FreeRtos::delay_ms(1_000);
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    // ── 2. Configuration ──────────────────────────────────────
    let config = MonitorConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_gpio()?;
    let adc = Adc1::new()?;
    let _heartbeat = HeartbeatTimer::start(&SIGNALS.heartbeat, config.heartbeat_period_ms)?;
    hw_init::init_edge_isr(&SIGNALS.edges)?;

    // ── 4. Adapters + monitor ─────────────────────────────────
    let trigger = UltrasonicTrigger::new(RawPin::output(pins::TRIG_GPIO), Ets, config.trigger);
    let indicators = IndicatorPair::new(
        RawPin::output(pins::WARNING_LED_GPIO),
        RawPin::output(pins::STATUS_LED_GPIO),
    );
    let mut hw = HardwareAdapter::new(trigger, indicators, adc, &config);
    let mut sink = SerialReportSink::new(std::io::stdout());
    let mut monitor = Monitor::new(&config, &SIGNALS);

    info!("Entering monitor loop");

    // ── 5. Control loop ───────────────────────────────────────
    // No delay: the trigger fires every iteration and an outstanding echo
    // is picked up whenever its falling edge lands.  The idle-task watchdog
    // check is off in sdkconfig.defaults.
    loop {
        monitor.step(&mut hw, &mut sink);
    }
}
