//! Local node service: owns the heater/fan control loop.
//!
//! ```text
//!  TemperaturePort ──▶ ┌──────────────────────────┐ ──▶ ActuatorPort
//!  control mailbox ──▶ │        LocalNode         │ ──▶ Transmitter (TemperatureReport)
//!                      │  LocalSync · Hysteresis  │ ──▶ DisplayPort / EventSink
//!                      └──────────────────────────┘
//! ```
//!
//! Every tick runs the full cycle.  Message arrival only updates state;
//! the actuator decision and the temperature publication run on every
//! tick against the latest known state.

use log::info;

use crate::config::{NodeConfig, NodeRole};
use crate::control::hysteresis::{Actuators, HysteresisController};
use crate::diagnostics::LinkStats;
use crate::protocol::{BusPort, RxBuffers, Transmitter};
use crate::state::LocalState;
use crate::sync::LocalSync;

use super::display::StatusView;
use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, DisplayPort, EventSink, TemperaturePort};
use super::{report_inbound, report_publication};

pub struct LocalNode<'r, B> {
    config: NodeConfig,
    state: LocalState,
    sync: LocalSync,
    controller: HysteresisController,
    tx: Transmitter<B>,
    rx: &'r RxBuffers,
    tick_count: u64,
}

impl<'r, B: BusPort> LocalNode<'r, B> {
    /// `rx` is the receive side filled by the bus interrupt path; `bus`
    /// is the transmit handle for the same controller.
    pub fn new(config: NodeConfig, bus: B, rx: &'r RxBuffers) -> Self {
        let tx = Transmitter::new(bus, config.control_channel);
        Self {
            config,
            state: LocalState::default(),
            sync: LocalSync::new(),
            controller: HysteresisController::new(),
            tx,
            rx,
            tick_count: 0,
        }
    }

    /// Drive both actuators to their boot state (off) and announce.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let out = self.controller.output();
        hw.set_heater(out.heater);
        hw.set_fan(out.fan);
        sink.emit(&AppEvent::Started { role: NodeRole::Local });
        info!("LocalNode started on port {}", self.tx.channel().port());
    }

    /// One control-loop iteration.
    pub fn tick(
        &mut self,
        hw: &mut (impl TemperaturePort + ActuatorPort + DisplayPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Sample
        self.state.measured_temp = hw.sample_temperature();

        // 2. Apply whatever the remote last sent
        let was_enabled = self.state.enabled;
        let mailbox = self.rx.mailbox(self.config.control_channel);
        if let Some(inbound) = self.sync.apply_inbound(&mut self.state, mailbox) {
            report_inbound(inbound, sink);
        }
        if self.state.enabled != was_enabled {
            sink.emit(&AppEvent::EnabledChanged(self.state.enabled));
        }

        // 3. Decide and actuate (writes only on change)
        let prev = self.controller.output();
        let next = self.controller.update(&self.state);
        if next != prev {
            self.apply(hw, prev, next);
            sink.emit(&AppEvent::ActuatorsChanged { from: prev, to: next });
        }

        // 4. Publish the reading if it moved
        if let Some(publication) = self.sync.publish_changes(&self.state, &mut self.tx) {
            report_publication(publication, sink);
        }

        // 5. Display
        hw.render_status(&StatusView {
            temp: self.state.measured_temp,
            setpoint: self.state.setpoint,
            threshold: self.state.threshold,
            elapsed_secs: clock.now(),
        });
    }

    fn apply(&self, hw: &mut impl ActuatorPort, prev: Actuators, next: Actuators) {
        if next.heater != prev.heater {
            hw.set_heater(next.heater);
        }
        if next.fan != prev.fan {
            hw.set_fan(next.fan);
        }
    }

    pub fn state(&self) -> &LocalState {
        &self.state
    }

    pub fn actuators(&self) -> Actuators {
        self.controller.output()
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats::collect(&self.tx, self.rx)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}
