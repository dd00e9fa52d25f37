//! Per-node control state.
//!
//! The two nodes hold different, partially overlapping records.  Each is
//! owned by its node's control loop and lent to the synchronization logic
//! and the hysteresis controller; there are no globals.
//!
//! | Field        | Remote                          | Local                         |
//! |--------------|---------------------------------|-------------------------------|
//! | enabled      | operator buttons                | last Enabled/Disabled message |
//! | setpoint     | potentiometer, every tick       | last ThresholdSet message     |
//! | threshold    | joystick, clamped               | last ThresholdSet message     |
//! | temperature  | last TemperatureReport (display)| sensor, every tick            |

/// State held by the operator-facing remote node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoteState {
    pub enabled: bool,
    /// Derived every tick from the setpoint input, never from the bus.
    pub setpoint: i32,
    /// Operator-adjusted, kept within `[1, 2 * base]`.
    pub threshold: i32,
    /// Latest temperature reported by the local node.  Display only.
    pub last_known_remote_temp: i32,
}

impl RemoteState {
    /// Boot state: disabled, threshold at its base value.
    pub fn new(base_threshold: i32) -> Self {
        Self {
            threshold: base_threshold,
            ..Self::default()
        }
    }

    /// Move the threshold by `delta`, clamped to `[1, 2 * base]`.
    pub fn adjust_threshold(&mut self, delta: i32, base_threshold: i32) {
        let ceiling = base_threshold.saturating_mul(2).max(1);
        self.threshold = self.threshold.saturating_add(delta).clamp(1, ceiling);
    }
}

/// State held by the local (heater/fan) node.
///
/// `setpoint` and `threshold` are only as fresh as the last message from
/// the remote; at boot they are zero.  Received values are applied as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalState {
    pub enabled: bool,
    pub setpoint: i32,
    pub threshold: i32,
    /// Sampled from the local sensor every tick.
    pub measured_temp: i32,
}
