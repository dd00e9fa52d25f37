//! Bang-bang heater/fan controller with a hysteresis deadband.
//!
//! ```text
//!   temp:   ──── cold ────┤ setpoint - threshold ── deadband ── setpoint + threshold ├──── hot ────
//!   output:  heater On     │            hold previous output                         │  fan On
//!            fan Off       │                                                         │  heater Off
//! ```
//!
//! Disabled forces both off regardless of temperature.  Inside the
//! deadband nothing changes, so the output only moves when a band edge is
//! crossed.  Band edges saturate instead of overflowing.

use crate::state::LocalState;

/// Binary actuator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Switch {
    On,
    #[default]
    Off,
}

impl Switch {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Commanded heater and fan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actuators {
    pub heater: Switch,
    pub fan: Switch,
}

impl Actuators {
    pub const OFF: Self = Self { heater: Switch::Off, fan: Switch::Off };
    pub const HEATING: Self = Self { heater: Switch::On, fan: Switch::Off };
    pub const COOLING: Self = Self { heater: Switch::Off, fan: Switch::On };
}

/// One decision step.  `previous` is returned unchanged in the deadband.
pub fn decide(
    enabled: bool,
    temp: i32,
    setpoint: i32,
    threshold: i32,
    previous: Actuators,
) -> Actuators {
    let low = setpoint.saturating_sub(threshold);
    let high = setpoint.saturating_add(threshold);

    if enabled && temp < low {
        Actuators::HEATING
    } else if enabled && temp > high {
        Actuators::COOLING
    } else if !enabled {
        Actuators::OFF
    } else {
        previous
    }
}

/// Holds the last output between ticks.  Boots with both actuators off.
#[derive(Debug, Default)]
pub struct HysteresisController {
    output: Actuators,
}

impl HysteresisController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one decision against the latest known state.
    pub fn update(&mut self, state: &LocalState) -> Actuators {
        self.output = decide(
            state.enabled,
            state.measured_temp,
            state.setpoint,
            state.threshold,
            self.output,
        );
        self.output
    }

    pub fn output(&self) -> Actuators {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(enabled: bool, temp: i32, setpoint: i32, threshold: i32) -> LocalState {
        LocalState { enabled, setpoint, threshold, measured_temp: temp }
    }

    #[test]
    fn cold_heats() {
        assert_eq!(decide(true, 40, 50, 5, Actuators::OFF), Actuators::HEATING);
    }

    #[test]
    fn hot_cools() {
        assert_eq!(decide(true, 56, 50, 5, Actuators::HEATING), Actuators::COOLING);
    }

    #[test]
    fn disabled_forces_off() {
        assert_eq!(decide(false, 0, 50, 5, Actuators::HEATING), Actuators::OFF);
        assert_eq!(decide(false, 99, 50, 5, Actuators::COOLING), Actuators::OFF);
    }

    #[test]
    fn band_edges_are_inside_deadband() {
        assert_eq!(decide(true, 45, 50, 5, Actuators::HEATING), Actuators::HEATING);
        assert_eq!(decide(true, 55, 50, 5, Actuators::COOLING), Actuators::COOLING);
        assert_eq!(decide(true, 45, 50, 5, Actuators::OFF), Actuators::OFF);
    }

    #[test]
    fn deadband_holds_heating_until_upper_edge() {
        let mut ctl = HysteresisController::new();
        assert_eq!(ctl.update(&state(true, 40, 50, 5)), Actuators::HEATING);
        // Warms through the band: heater stays on.
        for t in 45..=55 {
            assert_eq!(ctl.update(&state(true, t, 50, 5)), Actuators::HEATING);
        }
        assert_eq!(ctl.update(&state(true, 56, 50, 5)), Actuators::COOLING);
    }

    #[test]
    fn enabling_inside_band_keeps_outputs_off() {
        let mut ctl = HysteresisController::new();
        ctl.update(&state(false, 50, 50, 5));
        assert_eq!(ctl.update(&state(true, 50, 50, 5)), Actuators::OFF);
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(decide(true, i32::MIN, i32::MIN, 1, Actuators::OFF), Actuators::OFF);
        assert_eq!(decide(true, i32::MAX, i32::MAX, 1, Actuators::OFF), Actuators::OFF);
    }
}
