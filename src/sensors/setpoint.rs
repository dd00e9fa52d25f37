//! Remote setpoint potentiometer.
//!
//! Returns the raw 10-bit wiper position; `NodeConfig::setpoint_from_raw`
//! maps it to a setpoint (the pot is wired so that turning it up lowers
//! the reading).

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

use super::to_ten_bit;

static SIM_POT_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject a raw 12-bit reading for host builds.
pub fn sim_set_pot_adc(raw12: u16) {
    SIM_POT_ADC.store(raw12, Ordering::Relaxed);
}

pub struct SetpointInput {
    channel: u32,
}

impl SetpointInput {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    pub fn read_raw(&self) -> Result<i32, SensorError> {
        Ok(i32::from(to_ten_bit(self.read_adc()?)))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        Ok(SIM_POT_ADC.load(Ordering::Relaxed))
    }
}
