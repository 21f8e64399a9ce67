//! Heartbeat timer using ESP-IDF's esp_timer API.
//!
//! A periodic timer whose callback only raises the [`HeartbeatFlag`].
//! Configured once at boot; its period is independent of how fast the
//! main loop spins.  On simulation targets a background thread stands in
//! for the hardware timer.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely touch the atomic flag.

use crate::drivers::hw_init::HwInitError;
use crate::events::HeartbeatFlag;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use std::sync::Arc;
#[cfg(not(target_os = "espidf"))]
use std::sync::atomic::{AtomicBool, Ordering};

/// Running heartbeat timer.  Stops when dropped.
pub struct HeartbeatTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    stop: Arc<AtomicBool>,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn heartbeat_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static HeartbeatFlag` handed to `start()`.
    let flag = unsafe { &*arg.cast::<HeartbeatFlag>() };
    flag.raise();
}

impl HeartbeatTimer {
    /// Start raising `flag` every `period_ms`.
    #[cfg(target_os = "espidf")]
    pub fn start(flag: &'static HeartbeatFlag, period_ms: u32) -> Result<Self, HwInitError> {
        let args = esp_timer_create_args_t {
            callback: Some(heartbeat_cb),
            arg: core::ptr::from_ref(flag).cast_mut().cast(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"heartbeat".as_ptr(),
            skip_unhandled_events: true,
        };
        let mut handle: esp_timer_handle_t = core::ptr::null_mut();

        // SAFETY: `args` outlives the call; the callback only touches an
        // atomic behind a 'static reference.
        esp!(unsafe { esp_timer_create(&args, &mut handle) })
            .map_err(|e| HwInitError::TimerCreateFailed(e.code()))?;

        // SAFETY: `handle` was just created and is not shared yet.
        if let Err(e) = esp!(unsafe { esp_timer_start_periodic(handle, u64::from(period_ms) * 1_000) }) {
            // SAFETY: the timer never started and `handle` is dropped here.
            unsafe { esp_timer_delete(handle) };
            return Err(HwInitError::TimerStartFailed(e.code()));
        }

        log::info!("hw_timer: heartbeat every {} ms", period_ms);
        Ok(Self { handle })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start(flag: &'static HeartbeatFlag, period_ms: u32) -> Result<Self, HwInitError> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let period = std::time::Duration::from_millis(u64::from(period_ms));

        std::thread::Builder::new()
            .name("heartbeat".into())
            .spawn(move || {
                while !thread_stop.load(Ordering::Acquire) {
                    std::thread::sleep(period);
                    flag.raise();
                }
            })
            .map_err(|_| HwInitError::TimerCreateFailed(-1))?;

        log::info!("hw_timer(sim): heartbeat thread every {} ms", period_ms);
        Ok(Self { stop })
    }
}

impl Drop for HeartbeatTimer {
    #[cfg(target_os = "espidf")]
    fn drop(&mut self) {
        // SAFETY: `handle` is valid for the lifetime of `self`; stopping an
        // already-stopped timer only returns an error code.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}
