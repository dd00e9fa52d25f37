//! Node configuration parameters
//!
//! All tunable parameters for one HeatLink node.  Defaults are compiled
//! in; a JSON override can be baked into the device image at build time
//! (see `main.rs`).  Control state itself is never persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::protocol::ChannelId;

/// Which side of the link this node plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// Drives the heater and fan from the sensed temperature.
    Local,
    /// Operator panel: enable/disable, setpoint and threshold.
    Remote,
}

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub role: NodeRole,

    // --- Threshold ---
    /// Base hysteresis threshold.  The remote starts here and clamps
    /// operator adjustments to `[1, 2 * base_threshold]`.
    pub base_threshold: i32,

    // --- Setpoint mapping (remote) ---
    /// Full-scale value of the potentiometer reading.
    pub setpoint_adc_full_scale: i32,
    /// Divisor applied after inverting the potentiometer reading.
    pub setpoint_divisor: i32,

    // --- Timing ---
    /// Elapsed-seconds counter wraps to zero at this value (0 = never).
    pub clock_wrap_secs: u32,
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Link diagnostics report interval (seconds)
    pub diagnostics_interval_secs: u32,

    // --- Inputs ---
    /// Consecutive identical samples before a button level is accepted.
    pub debounce_samples: u8,

    // --- Bus ---
    /// Channel used for outgoing and drained incoming control traffic.
    pub control_channel: ChannelId,
}

impl NodeConfig {
    /// Defaults for the given role.  Only the remote wraps its clock.
    pub fn for_role(role: NodeRole) -> Self {
        Self {
            role,
            clock_wrap_secs: match role {
                NodeRole::Remote => 3600,
                NodeRole::Local => 0,
            },
            ..Self::default()
        }
    }

    /// Parse a JSON override.  Missing fields are an error; the result
    /// is validated before it is returned.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            serde_json::from_slice(bytes).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the control or protocol logic.
    pub fn validate(&self) -> Result<()> {
        if self.base_threshold < 1 {
            return Err(Error::Config("base_threshold must be >= 1"));
        }
        if self.setpoint_divisor <= 0 {
            return Err(Error::Config("setpoint_divisor must be > 0"));
        }
        if self.setpoint_adc_full_scale <= 0 {
            return Err(Error::Config("setpoint_adc_full_scale must be > 0"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if self.debounce_samples == 0 {
            return Err(Error::Config("debounce_samples must be > 0"));
        }
        Ok(())
    }

    /// Upper clamp for the remote's threshold.
    pub fn max_threshold(&self) -> i32 {
        self.base_threshold.saturating_mul(2)
    }

    /// Map a raw potentiometer reading to a setpoint.
    pub fn setpoint_from_raw(&self, raw: i32) -> i32 {
        (self.setpoint_adc_full_scale - raw) / self.setpoint_divisor
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            role: NodeRole::Local,

            // Threshold
            base_threshold: 5,

            // Setpoint: (1024 - raw) / 10 -> 0..=102
            setpoint_adc_full_scale: 1024,
            setpoint_divisor: 10,

            // Timing
            clock_wrap_secs: 0,
            control_loop_interval_ms: 10,   // 100 Hz
            diagnostics_interval_secs: 60, // 1/min

            // Inputs
            debounce_samples: 3,

            // Bus
            control_channel: ChannelId::Control,
        }
    }
}
