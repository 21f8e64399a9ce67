//! Warning / status LED pair.
//!
//! Two discrete active-HIGH LEDs: red warning, green status.  Generic over
//! `embedded-hal` output pins.  The loop re-applies the verdict every
//! cycle; the pins are only written when the outputs change.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::ActuatorError;
use crate::safety::IndicatorOutputs;

pub struct IndicatorPair<W, S> {
    warning: W,
    status: S,
    current: Option<IndicatorOutputs>,
}

impl<W: OutputPin, S: OutputPin> IndicatorPair<W, S> {
    pub fn new(warning: W, status: S) -> Self {
        Self {
            warning,
            status,
            current: None,
        }
    }

    pub fn apply(&mut self, outputs: IndicatorOutputs) -> Result<(), ActuatorError> {
        if self.current == Some(outputs) {
            return Ok(());
        }
        self.warning
            .set_state(PinState::from(outputs.warning))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.status
            .set_state(PinState::from(outputs.status))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.current = Some(outputs);
        Ok(())
    }

    /// Last successfully applied outputs; `None` before the first apply.
    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<IndicatorOutputs> {
        self.current
    }
}
