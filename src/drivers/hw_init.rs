//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions, the ADC1 oneshot unit and the shared edge
//! interrupt using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.
//!
//! [`RawPin`] exposes a configured output GPIO through `embedded-hal` so
//! the trigger and indicator drivers stay hardware-agnostic.

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::events::EdgeCapture;
#[cfg(target_os = "espidf")]
use crate::pins;
#[cfg(target_os = "espidf")]
use crate::sensors::AnalogInput;

pub use crate::error::HwInitError;

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn config_pin(
    pin: i32,
    mode: gpio_mode_t,
    pull_down: bool,
    intr_type: gpio_int_type_t,
) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: if pull_down {
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
        } else {
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
        },
        intr_type,
        ..Default::default()
    };
    // SAFETY: `cfg` is a fully initialised config for a valid pin.
    esp!(unsafe { gpio_config(&cfg) }).map_err(|e| HwInitError::GpioConfigFailed(e.code()))
}

/// Configure indicator/trigger outputs (driven LOW) and the two
/// edge-interrupt inputs.
#[cfg(target_os = "espidf")]
pub fn init_gpio() -> Result<(), HwInitError> {
    for pin in [pins::WARNING_LED_GPIO, pins::STATUS_LED_GPIO, pins::TRIG_GPIO] {
        config_pin(
            pin,
            gpio_mode_t_GPIO_MODE_OUTPUT,
            false,
            gpio_int_type_t_GPIO_INTR_DISABLE,
        )?;
        // SAFETY: pin was configured as an output just above.
        unsafe { gpio_set_level(pin, 0) };
    }

    // Button is active HIGH; hold it low while released.
    config_pin(
        pins::BUTTON_GPIO,
        gpio_mode_t_GPIO_MODE_INPUT,
        true,
        gpio_int_type_t_GPIO_INTR_ANYEDGE,
    )?;
    config_pin(
        pins::ECHO_GPIO,
        gpio_mode_t_GPIO_MODE_INPUT,
        false,
        gpio_int_type_t_GPIO_INTR_ANYEDGE,
    )?;

    info!("hw_init: GPIO configured (outputs LOW, button+echo any-edge)");
    Ok(())
}

/// Error from a raw GPIO register access (ESP-IDF return code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// An already-configured output GPIO.  On host builds it only tracks the
/// commanded level.
pub struct RawPin {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
    high: bool,
}

impl RawPin {
    pub fn output(gpio: i32) -> Self {
        Self { gpio, high: false }
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        // SAFETY: gpio_set_level writes an output configured in init_gpio();
        // main-loop only.
        esp!(unsafe { gpio_set_level(self.gpio, u32::from(high)) }).map_err(|e| GpioError(e.code()))?;
        self.high = high;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        self.high = high;
        Ok(())
    }
}

impl ErrorType for RawPin {
    type Error = GpioError;
}

impl OutputPin for RawPin {
    fn set_low(&mut self) -> Result<(), GpioError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.write(true)
    }
}

impl StatefulOutputPin for RawPin {
    fn is_set_high(&mut self) -> Result<bool, GpioError> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, GpioError> {
        Ok(!self.high)
    }
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// ADC1 oneshot unit with the temperature and vibration channels set up.
#[cfg(target_os = "espidf")]
pub struct Adc1 {
    handle: adc_oneshot_unit_handle_t,
}

#[cfg(target_os = "espidf")]
impl Adc1 {
    pub fn new() -> Result<Self, HwInitError> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: called once at boot; `handle` is owned by the returned Adc1.
        esp!(unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) })
            .map_err(|e| HwInitError::AdcInitFailed(e.code()))?;
        let adc = Self { handle };

        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        for channel in [pins::ADC1_CH_TEMP, pins::ADC1_CH_VIB] {
            // SAFETY: handle is valid; channel belongs to ADC1.
            esp!(unsafe { adc_oneshot_config_channel(adc.handle, channel, &chan_cfg) })
                .map_err(|e| HwInitError::AdcInitFailed(e.code()))?;
        }

        info!(
            "hw_init: ADC1 configured (CH{}=temp, CH{}=vib)",
            pins::ADC1_CH_TEMP,
            pins::ADC1_CH_VIB
        );
        Ok(adc)
    }
}

#[cfg(target_os = "espidf")]
impl AnalogInput for Adc1 {
    fn read_raw(&mut self, channel: u32) -> Result<u16, SensorError> {
        let mut raw: i32 = 0;
        // SAFETY: handle is valid for the lifetime of self; main-loop only.
        esp!(unsafe { adc_oneshot_read(self.handle, channel, &mut raw) })
            .map_err(|e| SensorError::AdcReadFailed(e.code()))?;
        Ok(raw.max(0) as u16)
    }
}

#[cfg(target_os = "espidf")]
impl Drop for Adc1 {
    fn drop(&mut self) {
        // SAFETY: handle was created by adc_oneshot_new_unit and is not
        // used after this point.
        unsafe { adc_oneshot_del_unit(self.handle) };
    }
}

// ── Shared edge interrupt ─────────────────────────────────────

/// Single handler registered on BOTH the button and the echo GPIO.
/// It cannot know which line fired, so it samples both levels and lets
/// [`EdgeCapture::on_edge`] sort it out.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn edge_capture_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static EdgeCapture` registered below.
    let edges = unsafe { &*arg.cast::<EdgeCapture>() };
    // SAFETY: register reads; safe in ISR context.
    let button_high = unsafe { gpio_get_level(pins::BUTTON_GPIO) } != 0;
    let echo_high = unsafe { gpio_get_level(pins::ECHO_GPIO) } != 0;
    // SAFETY: reads the system timer; ISR-safe.  Truncated to the 32-bit
    // microsecond counter the pulse window uses.
    let now_us = unsafe { esp_timer_get_time() } as u32;
    edges.on_edge(button_high, echo_high, now_us);
}

/// Install the GPIO ISR service and attach the shared edge handler.
/// Call after [`init_gpio`] and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_edge_isr(edges: &'static EdgeCapture) -> Result<(), HwInitError> {
    // ESP_ERR_INVALID_STATE: service already installed.
    // SAFETY: plain driver call, no pointers.
    if let Err(e) = esp!(unsafe { gpio_install_isr_service(0) }) {
        if e.code() != ESP_ERR_INVALID_STATE as esp_err_t {
            return Err(HwInitError::IsrInstallFailed(e.code()));
        }
    }

    let arg = core::ptr::from_ref(edges).cast_mut().cast();
    for pin in [pins::BUTTON_GPIO, pins::ECHO_GPIO] {
        // SAFETY: the handler only touches 'static atomics/critical-section
        // state reached through `arg`.
        unsafe {
            esp!(gpio_isr_handler_add(pin, Some(edge_capture_isr), arg))
                .map_err(|e| HwInitError::IsrInstallFailed(e.code()))?;
            esp!(gpio_intr_enable(pin)).map_err(|e| HwInitError::IsrInstallFailed(e.code()))?;
        }
    }

    // Button held at power-up would otherwise read as released until its
    // first edge.
    // SAFETY: register read on a configured input.
    edges.seed_override(unsafe { gpio_get_level(pins::BUTTON_GPIO) } != 0);

    info!("hw_init: shared edge ISR attached (button GPIO{}, echo GPIO{})", pins::BUTTON_GPIO, pins::ECHO_GPIO);
    Ok(())
}
