//! Hardware adapters: bridge real peripherals to the domain port traits.
//!
//! [`LocalBoard`] owns the temperature sensor and the heater/fan
//! outputs; [`RemoteBoard`] owns the setpoint potentiometer and the four
//! operator inputs.  Both are generic over `embedded-hal` pins (an
//! `esp-idf-hal` `PinDriver` on the device) and over the display sink.
//!
//! Hardware faults are logged and never reach the control loop: a failed
//! ADC read repeats the last good value, a failed pin write is retried on
//! the next command.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::display::StatusView;
use crate::app::ports::{
    ActuatorPort, DisplayPort, InputId, InputPort, SetpointPort, TemperaturePort,
};
use crate::config::NodeConfig;
use crate::control::hysteresis::Switch;
use crate::drivers::outputs::SwitchDriver;
use crate::error::SensorError;
use crate::sensors::{SetpointInput, TemperatureSensor};

// ───────────────────────────────────────────────────────────────
// Local board
// ───────────────────────────────────────────────────────────────

pub struct LocalBoard<P, D> {
    temperature: TemperatureSensor,
    heater: SwitchDriver<P>,
    fan: SwitchDriver<P>,
    display: D,
}

impl<P: OutputPin, D: DisplayPort> LocalBoard<P, D> {
    pub fn new(temperature: TemperatureSensor, heater: P, fan: P, display: D) -> Self {
        Self {
            temperature,
            heater: SwitchDriver::new(heater, "heater"),
            fan: SwitchDriver::new(fan, "fan"),
            display,
        }
    }

    /// Last state written to each output.
    pub fn outputs(&self) -> (Option<Switch>, Option<Switch>) {
        (self.heater.state(), self.fan.state())
    }
}

impl<P, D> TemperaturePort for LocalBoard<P, D> {
    fn sample_temperature(&mut self) -> i32 {
        match self.temperature.read() {
            Ok(t) => t,
            Err(e) => {
                warn!("temperature: {}, holding {}", e, self.temperature.last());
                self.temperature.last()
            }
        }
    }
}

impl<P: OutputPin, D> ActuatorPort for LocalBoard<P, D> {
    fn set_heater(&mut self, state: Switch) {
        if let Err(e) = self.heater.set(state) {
            warn!("heater: {}", e);
        }
    }

    fn set_fan(&mut self, state: Switch) {
        if let Err(e) = self.fan.set(state) {
            warn!("fan: {}", e);
        }
    }
}

impl<P, D: DisplayPort> DisplayPort for LocalBoard<P, D> {
    fn render_status(&mut self, view: &StatusView) {
        self.display.render_status(view);
    }
}

// ───────────────────────────────────────────────────────────────
// Remote board
// ───────────────────────────────────────────────────────────────

pub struct RemoteBoard<P, D> {
    setpoint: SetpointInput,
    /// Indexed in [`InputId::ALL`] order.  Active low.
    inputs: [P; 4],
    display: D,
    config: NodeConfig,
    last_setpoint: i32,
}

impl<P: InputPin, D: DisplayPort> RemoteBoard<P, D> {
    /// `inputs` in [`InputId::ALL`] order: enable, disable, up, down.
    pub fn new(config: &NodeConfig, setpoint: SetpointInput, inputs: [P; 4], display: D) -> Self {
        Self {
            setpoint,
            inputs,
            display,
            config: config.clone(),
            last_setpoint: 0,
        }
    }
}

impl<P, D> SetpointPort for RemoteBoard<P, D> {
    fn sample_setpoint_input(&mut self) -> i32 {
        match self.setpoint.read_raw() {
            Ok(raw) => {
                self.last_setpoint = self.config.setpoint_from_raw(raw);
            }
            Err(e) => warn!("setpoint: {}, holding {}", e, self.last_setpoint),
        }
        self.last_setpoint
    }
}

impl<P: InputPin, D> InputPort for RemoteBoard<P, D> {
    fn read_digital_input(&mut self, id: InputId) -> bool {
        let index = match id {
            InputId::Enable => 0,
            InputId::Disable => 1,
            InputId::ThresholdUp => 2,
            InputId::ThresholdDown => 3,
        };
        match read_pressed(&mut self.inputs[index]) {
            Ok(pressed) => pressed,
            Err(e) => {
                warn!("input {:?}: {}", id, e);
                false
            }
        }
    }
}

/// Active-low button level.
fn read_pressed<P: InputPin>(pin: &mut P) -> Result<bool, SensorError> {
    pin.is_low().map_err(|_| SensorError::GpioReadFailed)
}

impl<P, D: DisplayPort> DisplayPort for RemoteBoard<P, D> {
    fn render_status(&mut self, view: &StatusView) {
        self.display.render_status(view);
    }
}
