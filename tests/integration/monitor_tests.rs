//! End-to-end tests for the Monitor loop against a port-level mock.
//!
//! Raw counts are 10-bit: 144 → 703 mV → 70 °C, 62 → 303 mV → 30 °C.
//! Echo durations: 11 640 µs → 200 cm, 1 746 µs → 30 cm.

use std::time::{Duration, Instant};

use imon::app::service::{Monitor, RangingStatus};
use imon::config::MonitorConfig;
use imon::drivers::hw_timer::HeartbeatTimer;
use imon::events::Signals;
use imon::safety::{IndicatorOutputs, SystemState};

use super::mock_hw::{CaptureSink, MockHardware};

const RAW_70C: u16 = 144;
const RAW_30C: u16 = 62;
const ECHO_200CM_US: u32 = 11_640;
const ECHO_30CM_US: u32 = 1_746;

/// Simulate one echo pulse through the shared edge handler.
fn echo(signals: &Signals, button_high: bool, start_us: u32, duration_us: u32) {
    signals.edges.on_edge(button_high, true, start_us);
    signals
        .edges
        .on_edge(button_high, false, start_us.wrapping_add(duration_us));
}

fn run_cycle(
    temp_raw: u16,
    echo_us: u32,
    override_active: bool,
) -> (MockHardware, CaptureSink, Option<SystemState>) {
    let signals = Signals::new();
    let config = MonitorConfig::default();
    let mut monitor = Monitor::new(&config, &signals);
    let mut hw = MockHardware::new(temp_raw, 100);
    let mut sink = CaptureSink::new();

    echo(&signals, override_active, 5_000, echo_us);
    let out = monitor.step(&mut hw, &mut sink);
    (hw, sink, out.cycle.map(|c| c.verdict.state))
}

#[test]
fn scenario_a_hot_machine_is_critical() {
    let (hw, sink, state) = run_cycle(RAW_70C, ECHO_200CM_US, false);

    assert_eq!(state, Some(SystemState::Critical));
    assert_eq!(
        sink.lines,
        ["CRITICAL: MACHINE FAULT", "Temp: 70 | Vib: 100 | Dist: 200"]
    );
    assert_eq!(
        hw.last_indicators(),
        Some(IndicatorOutputs {
            warning: true,
            status: false
        })
    );
}

#[test]
fn scenario_b_person_close_is_warning() {
    let (hw, sink, state) = run_cycle(RAW_30C, ECHO_30CM_US, false);

    assert_eq!(state, Some(SystemState::Warning));
    assert_eq!(
        sink.lines,
        ["WARNING: HUMAN TOO CLOSE", "Temp: 30 | Vib: 100 | Dist: 30"]
    );
    assert_eq!(
        hw.last_indicators(),
        Some(IndicatorOutputs {
            warning: true,
            status: false
        })
    );
}

#[test]
fn scenario_c_override_silences_proximity() {
    let (hw, sink, state) = run_cycle(RAW_30C, ECHO_30CM_US, true);

    assert_eq!(state, Some(SystemState::Normal));
    assert_eq!(sink.lines, ["STATUS: NORMAL", "Temp: 30 | Vib: 100 | Dist: 30"]);
    assert_eq!(
        hw.last_indicators(),
        Some(IndicatorOutputs {
            warning: false,
            status: true
        })
    );
}

#[test]
fn scenario_d_missing_echo_only_heartbeats() {
    let signals = Signals::new();
    let config = MonitorConfig::default();
    let mut monitor = Monitor::new(&config, &signals);
    let mut hw = MockHardware::new(RAW_30C, 100);
    let mut sink = CaptureSink::new();

    for i in 0..1_000 {
        if i % 250 == 0 {
            signals.heartbeat.raise();
        }
        monitor.step(&mut hw, &mut sink);
    }

    assert_eq!(sink.lines, ["TIMER: System check"; 4]);
    assert!(hw.calls.is_empty(), "indicators never driven without an echo");
    assert_eq!(hw.triggers, 1_000);
    assert_eq!(
        monitor.ranging(),
        RangingStatus::Pending { triggers: 1_000 }
    );
    assert!(monitor.echo_stale());
    assert_eq!(monitor.cycles(), 0);
}

#[test]
fn scenario_d_with_running_heartbeat_timer() {
    static SIGNALS: Signals = Signals::new();
    let config = MonitorConfig::default();
    let mut monitor = Monitor::new(&config, &SIGNALS);
    let mut hw = MockHardware::new(RAW_30C, 100);
    let mut sink = CaptureSink::new();

    let timer = HeartbeatTimer::start(&SIGNALS.heartbeat, 10).unwrap();
    let deadline = Instant::now() + Duration::from_millis(200);
    while Instant::now() < deadline {
        monitor.step(&mut hw, &mut sink);
        std::thread::yield_now();
    }
    drop(timer);

    assert!(sink.heartbeats() >= 2, "got {} heartbeats", sink.heartbeats());
    assert_eq!(sink.heartbeats(), sink.lines.len());
}

#[test]
fn pulse_consumed_once_across_loop_iterations() {
    let signals = Signals::new();
    let config = MonitorConfig::default();
    let mut monitor = Monitor::new(&config, &signals);
    let mut hw = MockHardware::new(RAW_30C, 100);
    let mut sink = CaptureSink::new();

    echo(&signals, false, 0, ECHO_200CM_US);
    assert!(monitor.step(&mut hw, &mut sink).cycle.is_some());
    for _ in 0..10 {
        assert!(monitor.step(&mut hw, &mut sink).cycle.is_none());
    }
    assert_eq!(sink.lines.len(), 2);
    assert_eq!(monitor.cycles(), 1);

    // A fresh falling edge makes the next window available.
    echo(&signals, false, 50_000, ECHO_30CM_US);
    let cycle = monitor.step(&mut hw, &mut sink).cycle.unwrap();
    assert_eq!(cycle.readings.distance_cm, 30);
}

#[test]
fn state_changes_follow_each_completed_cycle() {
    let signals = Signals::new();
    let config = MonitorConfig::default();
    let mut monitor = Monitor::new(&config, &signals);
    let mut hw = MockHardware::new(RAW_30C, 100);
    let mut sink = CaptureSink::new();

    echo(&signals, false, 0, ECHO_30CM_US);
    monitor.step(&mut hw, &mut sink);
    hw.temp_raw = RAW_70C;
    echo(&signals, false, 100_000, ECHO_30CM_US);
    monitor.step(&mut hw, &mut sink);
    hw.temp_raw = RAW_30C;
    echo(&signals, false, 200_000, ECHO_200CM_US);
    monitor.step(&mut hw, &mut sink);

    let verdicts: Vec<&str> = sink.lines.iter().step_by(2).map(String::as_str).collect();
    assert_eq!(
        verdicts,
        [
            "WARNING: HUMAN TOO CLOSE",
            "CRITICAL: MACHINE FAULT",
            "STATUS: NORMAL"
        ]
    );
    assert_eq!(hw.calls.len(), 3);
}
