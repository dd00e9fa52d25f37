//! Analog inputs: the local board's temperature sensor and the remote
//! board's setpoint potentiometer.
//!
//! Both read ADC1 through the oneshot API on the device and a static
//! atomic on the host, which tests use for injection.  Readings are
//! reduced from the 12-bit converter to a 10-bit scale (0..=1023).

pub mod setpoint;
pub mod temperature;

pub use setpoint::SetpointInput;
pub use temperature::TemperatureSensor;

/// Full-scale value of the reduced reading.
pub const ADC_FULL_SCALE: u16 = 1023;

/// 12-bit raw sample to the 10-bit scale the control logic works in.
pub const fn to_ten_bit(raw12: u16) -> u16 {
    let raw = if raw12 > 4095 { 4095 } else { raw12 };
    raw >> 2
}
