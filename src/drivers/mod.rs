//! Input/output drivers, hardware initialisation, and timers.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod outputs;
