//! Local temperature sensor.
//!
//! The sensor's analog output is used directly as the temperature value:
//! the control loop compares it against a setpoint on the same scale, so
//! no conversion to physical units is applied.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

use super::to_ten_bit;

static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject a raw 12-bit reading for host builds.
pub fn sim_set_temp_adc(raw12: u16) {
    SIM_TEMP_ADC.store(raw12, Ordering::Relaxed);
}

pub struct TemperatureSensor {
    channel: u32,
    last: i32,
}

impl TemperatureSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel, last: 0 }
    }

    /// Sample once.  A failed conversion keeps the previous value and
    /// returns the error for the caller to log.
    pub fn read(&mut self) -> Result<i32, SensorError> {
        let raw = self.read_adc()?;
        self.last = i32::from(to_ten_bit(raw));
        Ok(self.last)
    }

    /// Last good sample (0 before the first).
    pub fn last(&self) -> i32 {
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        Ok(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_injected_value() {
        let mut sensor = TemperatureSensor::new(crate::pins::TEMP_ADC_CHANNEL);
        sim_set_temp_adc(160);
        assert_eq!(sensor.read(), Ok(40));
        assert_eq!(sensor.last(), 40);
    }
}
