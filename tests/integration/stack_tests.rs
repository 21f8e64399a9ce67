//! Full stack over mock pins: Monitor → HardwareAdapter → trigger/LED
//! drivers and the serial sink writing into a buffer.
//!
//! ADC mocks return native 12-bit counts of the ESP32-S3 3.1 V range:
//! 397 ≈ 300 mV, 594 ≈ 449 mV, 925 ≈ 700 mV, 642 ≈ 486 mV.

use imon::adapters::console::SerialReportSink;
use imon::adapters::hardware::HardwareAdapter;
use imon::app::service::Monitor;
use imon::config::MonitorConfig;
use imon::drivers::indicators::IndicatorPair;
use imon::drivers::ultrasonic::UltrasonicTrigger;
use imon::events::Signals;

use super::mock_hw::{MockAdc, MockPin, NoDelay, SharedBuf};

struct Bench {
    signals: Signals,
    config: MonitorConfig,
    trig: MockPin,
    warning: MockPin,
    status: MockPin,
    serial: SharedBuf,
}

impl Bench {
    fn new() -> Self {
        Self {
            signals: Signals::new(),
            config: MonitorConfig::default(),
            trig: MockPin::default(),
            warning: MockPin::default(),
            status: MockPin::default(),
            serial: SharedBuf::default(),
        }
    }

    /// One loop iteration with a completed echo of `echo_us`.
    fn cycle(&self, adc: MockAdc, echo_us: u32) {
        let mut hw = HardwareAdapter::new(
            UltrasonicTrigger::new(self.trig.clone(), NoDelay, self.config.trigger),
            IndicatorPair::new(self.warning.clone(), self.status.clone()),
            adc,
            &self.config,
        );
        let mut sink = SerialReportSink::new(self.serial.clone());
        let mut monitor = Monitor::new(&self.config, &self.signals);

        self.signals.edges.on_edge(false, true, 0);
        self.signals.edges.on_edge(false, false, echo_us);
        monitor.step(&mut hw, &mut sink);
    }
}

#[test]
fn warning_cycle_drives_pins_and_serial_stream() {
    let bench = Bench::new();
    bench.cycle(MockAdc { temp: 397, vib: 642 }, 1_746);

    assert_eq!(*bench.trig.levels.borrow(), [false, true, false]);
    assert_eq!(bench.warning.level(), Some(true));
    assert_eq!(bench.status.level(), Some(false));
    assert_eq!(
        bench.serial.text(),
        "WARNING: HUMAN TOO CLOSE\nTemp: 30 | Vib: 100 | Dist: 30\n"
    );
}

#[test]
fn warm_machine_on_device_range_stays_normal() {
    // LM35 at ~45 °C: must not be read as a fault.
    let bench = Bench::new();
    bench.cycle(MockAdc { temp: 594, vib: 0 }, 11_640);

    assert_eq!(
        bench.serial.text(),
        "STATUS: NORMAL\nTemp: 44 | Vib: 0 | Dist: 200\n"
    );
    assert_eq!(bench.status.level(), Some(true));
}

#[test]
fn hot_machine_on_device_range_is_critical() {
    let bench = Bench::new();
    bench.cycle(MockAdc { temp: 925, vib: 0 }, 11_640);

    assert_eq!(
        bench.serial.text(),
        "CRITICAL: MACHINE FAULT\nTemp: 70 | Vib: 0 | Dist: 200\n"
    );
    assert_eq!(bench.warning.level(), Some(true));
}
