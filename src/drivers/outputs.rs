//! Heater and fan output driver.
//!
//! Each actuator is a plain on/off GPIO (relay or MOSFET gate).  The
//! driver is generic over `embedded-hal` output pins so the same code
//! drives an `esp-idf-hal` `PinDriver` on the device and a recording
//! mock on the host.  The pin is written only when the commanded state
//! changes.

use embedded_hal::digital::OutputPin;

use crate::control::hysteresis::Switch;
use crate::error::ActuatorError;

pub struct SwitchDriver<P> {
    pin: P,
    name: &'static str,
    state: Option<Switch>,
}

impl<P: OutputPin> SwitchDriver<P> {
    pub fn new(pin: P, name: &'static str) -> Self {
        Self { pin, name, state: None }
    }

    /// Drive the output.  Returns `Ok(true)` if the pin was written.
    pub fn set(&mut self, target: Switch) -> Result<bool, ActuatorError> {
        if self.state == Some(target) {
            return Ok(false);
        }
        let written = match target {
            Switch::On => self.pin.set_high(),
            Switch::Off => self.pin.set_low(),
        };
        written.map_err(|_| ActuatorError::GpioWriteFailed)?;
        log::debug!("{}: {:?}", self.name, target);
        self.state = Some(target);
        Ok(true)
    }

    /// Last successfully written state (`None` before the first write).
    pub fn state(&self) -> Option<Switch> {
        self.state
    }
}
