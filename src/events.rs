//! Interrupt → main-loop mailboxes.
//!
//! Two interrupt sources feed the control loop:
//! - the shared edge interrupt (override button + ultrasonic echo), and
//! - the periodic heartbeat timer.
//!
//! Each source owns write access to its own single-slot mailbox; the main
//! loop owns read + clear.  Nothing here blocks and nothing allocates.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────────────┐     ┌────────────┐
//! │ Edge ISR     │────▶│ override level (atomic)   │────▶│            │
//! │ (button/echo)│────▶│ pulse window (crit. sect.)│────▶│ Main loop  │
//! │ Timer cb     │────▶│ heartbeat flag (atomic)   │────▶│            │
//! └──────────────┘     └───────────────────────────┘     └────────────┘
//! ```

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

// ── Pulse window ──────────────────────────────────────────────

/// Raw echo timing as written by the edge ISR.
///
/// `ready` is set by a falling edge and cleared by the consuming read.
/// `end_us` is only meaningful while `ready` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulseWindow {
    pub start_us: u32,
    pub end_us: u32,
    pub ready: bool,
}

impl PulseWindow {
    pub const EMPTY: Self = Self {
        start_us: 0,
        end_us: 0,
        ready: false,
    };
}

/// A completed echo pulse handed to the main loop exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoPulse {
    pub start_us: u32,
    pub end_us: u32,
}

impl EchoPulse {
    /// Round-trip time of flight.  The microsecond counter is 32 bits and
    /// rolls over every ~71 minutes, hence the wrapping subtraction.
    pub fn duration_us(&self) -> u32 {
        self.end_us.wrapping_sub(self.start_us)
    }
}

// ── Edge capture ──────────────────────────────────────────────

/// State written by the shared button/echo edge interrupt.
pub struct EdgeCapture {
    /// Last sampled override button level.  Not debounced.
    override_level: AtomicBool,
    /// Start/end timestamps must be read together, so they live behind a
    /// critical section rather than in separate atomics.
    pulse: Mutex<Cell<PulseWindow>>,
}

impl EdgeCapture {
    pub const fn new() -> Self {
        Self {
            override_level: AtomicBool::new(false),
            pulse: Mutex::new(Cell::new(PulseWindow::EMPTY)),
        }
    }

    /// ISR body for any edge on the button or echo line.
    ///
    /// The caller samples both pin levels and the microsecond clock at
    /// interrupt time.  Which line actually changed is not known: the
    /// button level is re-sampled unconditionally and the echo level alone
    /// decides between pulse start (high) and pulse end (low).
    ///
    /// O(1), lock-free apart from the short critical section, no floats.
    pub fn on_edge(&self, button_high: bool, echo_high: bool, now_us: u32) {
        self.override_level.store(button_high, Ordering::Release);

        critical_section::with(|cs| {
            let cell = self.pulse.borrow(cs);
            let mut window = cell.get();
            if echo_high {
                window.start_us = now_us;
            } else {
                window.end_us = now_us;
                window.ready = true;
            }
            cell.set(window);
        });
    }

    /// Record a button level sampled outside the ISR (boot-time read).
    /// Leaves the pulse window untouched.
    pub fn seed_override(&self, button_high: bool) {
        self.override_level.store(button_high, Ordering::Release);
    }

    /// Whether the override button was high at the last edge interrupt.
    pub fn override_active(&self) -> bool {
        self.override_level.load(Ordering::Acquire)
    }

    /// Peek at the ready flag without consuming the window.
    pub fn is_ready(&self) -> bool {
        critical_section::with(|cs| self.pulse.borrow(cs).get().ready)
    }

    /// Consume a completed pulse.
    ///
    /// Both timestamps are copied and the ready flag cleared inside one
    /// critical section, so a fresh edge cannot land between the reads.
    /// Returns `None` until the next falling edge after a consume.
    pub fn take_pulse(&self) -> Option<EchoPulse> {
        critical_section::with(|cs| {
            let cell = self.pulse.borrow(cs);
            let window = cell.get();
            if !window.ready {
                return None;
            }
            cell.set(PulseWindow {
                ready: false,
                ..window
            });
            Some(EchoPulse {
                start_us: window.start_us,
                end_us: window.end_us,
            })
        })
    }
}

impl Default for EdgeCapture {
    fn default() -> Self {
        Self::new()
    }
}

// ── Heartbeat flag ────────────────────────────────────────────

/// Single-bit mailbox set by the periodic timer.  A heartbeat that is not
/// consumed before the next one fires is merged into it; nothing
/// accumulates.
pub struct HeartbeatFlag(AtomicBool);

impl HeartbeatFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Timer context: mark a heartbeat pending.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Main loop: observe and clear in one step.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for HeartbeatFlag {
    fn default() -> Self {
        Self::new()
    }
}

// ── Process-wide instance ─────────────────────────────────────

/// All interrupt-written state, grouped so the main loop can be handed a
/// single reference.
pub struct Signals {
    pub edges: EdgeCapture,
    pub heartbeat: HeartbeatFlag,
}

impl Signals {
    pub const fn new() -> Self {
        Self {
            edges: EdgeCapture::new(),
            heartbeat: HeartbeatFlag::new(),
        }
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

/// The instance the hardware interrupt handlers write into.
pub static SIGNALS: Signals = Signals::new();
