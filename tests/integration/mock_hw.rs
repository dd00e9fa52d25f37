//! Mock hardware adapters for integration tests.
//!
//! Records every actuator and display call so tests can assert on the
//! full command history without touching real GPIO or ADC registers.

use heatlink::adapters::loopback::LoopbackBus;
use heatlink::app::display::StatusView;
use heatlink::app::events::AppEvent;
use heatlink::app::ports::{
    ActuatorPort, DisplayPort, EventSink, InputId, InputPort, SetpointPort, TemperaturePort,
};
use heatlink::control::hysteresis::Switch;
use heatlink::protocol::{BusPort, ChannelId, RxBuffers};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater(Switch),
    Fan(Switch),
}

// ── Local board ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockLocalBoard {
    pub temperature: i32,
    pub calls: Vec<ActuatorCall>,
    pub rendered: Vec<StatusView>,
}

#[allow(dead_code)]
impl MockLocalBoard {
    pub fn at(temperature: i32) -> Self {
        Self { temperature, ..Self::default() }
    }

    /// Last commanded heater state (Off if never commanded).
    pub fn heater(&self) -> Switch {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Heater(s) => Some(*s),
                ActuatorCall::Fan(_) => None,
            })
            .unwrap_or_default()
    }

    /// Last commanded fan state (Off if never commanded).
    pub fn fan(&self) -> Switch {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Fan(s) => Some(*s),
                ActuatorCall::Heater(_) => None,
            })
            .unwrap_or_default()
    }
}

impl TemperaturePort for MockLocalBoard {
    fn sample_temperature(&mut self) -> i32 {
        self.temperature
    }
}

impl ActuatorPort for MockLocalBoard {
    fn set_heater(&mut self, state: Switch) {
        self.calls.push(ActuatorCall::Heater(state));
    }

    fn set_fan(&mut self, state: Switch) {
        self.calls.push(ActuatorCall::Fan(state));
    }
}

impl DisplayPort for MockLocalBoard {
    fn render_status(&mut self, view: &StatusView) {
        self.rendered.push(*view);
    }
}

// ── Remote board ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockRemoteBoard {
    pub setpoint: i32,
    pub held: Vec<InputId>,
    pub rendered: Vec<StatusView>,
}

#[allow(dead_code)]
impl MockRemoteBoard {
    pub fn press(&mut self, id: InputId) {
        if !self.held.contains(&id) {
            self.held.push(id);
        }
    }

    pub fn release(&mut self, id: InputId) {
        self.held.retain(|&h| h != id);
    }
}

impl SetpointPort for MockRemoteBoard {
    fn sample_setpoint_input(&mut self) -> i32 {
        self.setpoint
    }
}

impl InputPort for MockRemoteBoard {
    fn read_digital_input(&mut self, id: InputId) -> bool {
        self.held.contains(&id)
    }
}

impl DisplayPort for MockRemoteBoard {
    fn render_status(&mut self, view: &StatusView) {
        self.rendered.push(*view);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bus wiring ────────────────────────────────────────────────

/// Two bus endpoints and their receive buffers.  `deliver` plays the
/// receive interrupt on both sides.
pub struct Link {
    pub remote_bus: LoopbackBus,
    pub local_bus: LoopbackBus,
    pub remote_rx: RxBuffers,
    pub local_rx: RxBuffers,
}

#[allow(dead_code)]
impl Link {
    pub fn new() -> Self {
        let (remote_bus, local_bus) = LoopbackBus::pair();
        Self {
            remote_bus,
            local_bus,
            remote_rx: RxBuffers::new(),
            local_rx: RxBuffers::new(),
        }
    }

    /// Move every frame in flight into the peer's mailboxes.
    pub fn deliver(&self) {
        drain(&self.local_rx, &self.local_bus);
        drain(&self.remote_rx, &self.remote_bus);
    }
}

fn drain(rx: &RxBuffers, bus: &LoopbackBus) {
    while ChannelId::ALL.iter().any(|&c| bus.rx_pending(c)) {
        rx.service(bus);
    }
}
