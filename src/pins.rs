//! GPIO / peripheral pin assignments for the HeatLink node boards.
//!
//! Single source of truth: every driver references this module rather
//! than hard-coding pin numbers.  Both boards share one layout; each role
//! simply leaves the other role's pins unconfigured.

// ---------------------------------------------------------------------------
// Bus transceiver (TWAI / CAN, SN65HVD230)
// ---------------------------------------------------------------------------

pub const TWAI_TX_GPIO: i32 = 4;
pub const TWAI_RX_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Local board: actuators and temperature sensor
// ---------------------------------------------------------------------------

/// Heater relay driver (active HIGH).
pub const HEATER_GPIO: i32 = 10;
/// Fan MOSFET gate (active HIGH).
pub const FAN_GPIO: i32 = 11;
/// Temperature sensor analog output, ADC1 channel 6 (GPIO 7).
pub const TEMP_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Remote board: operator controls
// ---------------------------------------------------------------------------

/// Enable push-button (active LOW, internal pull-up).
pub const BUTTON_ENABLE_GPIO: i32 = 12;
/// Disable push-button (active LOW, internal pull-up).
pub const BUTTON_DISABLE_GPIO: i32 = 13;
/// Joystick up: raise threshold (active LOW).
pub const JOY_UP_GPIO: i32 = 14;
/// Joystick down: lower threshold (active LOW).
pub const JOY_DOWN_GPIO: i32 = 15;
/// Setpoint potentiometer wiper, ADC1 channel 7 (GPIO 8).
pub const POT_ADC_CHANNEL: u32 = 7;
