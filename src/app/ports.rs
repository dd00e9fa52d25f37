//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LocalNode / RemoteNode (domain)
//! ```
//!
//! Driven adapters (sensors, inputs, actuators, display, clock, event
//! sinks) implement these traits.  The node services consume them via
//! generics, so the domain core never touches hardware directly.
//!
//! Sensor and actuator ports are infallible from the domain's point of
//! view: adapters log hardware faults and fall back to the last good
//! value, keeping the control loop running on last-known state.

use crate::control::hysteresis::Switch;

use super::display::StatusView;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Local node temperature input, sampled once per tick.
pub trait TemperaturePort {
    fn sample_temperature(&mut self) -> i32;
}

/// Remote node setpoint input, already mapped to the setpoint range.
pub trait SetpointPort {
    fn sample_setpoint_input(&mut self) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Operator input port
// ───────────────────────────────────────────────────────────────

/// Digital operator controls on the remote panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    Enable,
    Disable,
    ThresholdUp,
    ThresholdDown,
}

impl InputId {
    pub const ALL: [InputId; 4] = [
        InputId::Enable,
        InputId::Disable,
        InputId::ThresholdUp,
        InputId::ThresholdDown,
    ];
}

/// Raw (undebounced) input levels.  `true` means asserted, whatever the
/// electrical polarity.
pub trait InputPort {
    fn read_digital_input(&mut self, id: InputId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    fn set_heater(&mut self, state: Switch);
    fn set_fan(&mut self, state: Switch);
}

// ───────────────────────────────────────────────────────────────
// Display and clock
// ───────────────────────────────────────────────────────────────

/// Status display sink.
pub trait DisplayPort {
    fn render_status(&mut self, view: &StatusView);
}

/// Elapsed-seconds source, maintained outside the control loop.
pub trait ClockPort {
    fn now(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
