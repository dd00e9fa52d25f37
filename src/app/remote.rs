//! Remote node service: the operator panel.
//!
//! Per tick: derive the setpoint, take the latest temperature report,
//! apply threshold and enable/disable presses (edge-triggered through
//! the debouncers), publish `ThresholdSet` if anything moved, refresh the
//! display.

use log::info;

use crate::config::{NodeConfig, NodeRole};
use crate::diagnostics::LinkStats;
use crate::drivers::button::{ButtonEdge, Debouncer};
use crate::protocol::{BusPort, RxBuffers, Transmitter};
use crate::state::RemoteState;
use crate::sync::RemoteSync;

use super::display::StatusView;
use super::events::AppEvent;
use super::ports::{ClockPort, DisplayPort, EventSink, InputId, InputPort, SetpointPort};
use super::{report_inbound, report_publication};

/// One debouncer per operator control.
struct Controls {
    enable: Debouncer,
    disable: Debouncer,
    up: Debouncer,
    down: Debouncer,
}

impl Controls {
    fn new(samples: u8) -> Self {
        Self {
            enable: Debouncer::new(samples),
            disable: Debouncer::new(samples),
            up: Debouncer::new(samples),
            down: Debouncer::new(samples),
        }
    }

    fn debouncer(&mut self, id: InputId) -> &mut Debouncer {
        match id {
            InputId::Enable => &mut self.enable,
            InputId::Disable => &mut self.disable,
            InputId::ThresholdUp => &mut self.up,
            InputId::ThresholdDown => &mut self.down,
        }
    }

    /// Sample `id` once; `true` on a debounced press edge.
    fn pressed(&mut self, id: InputId, hw: &mut impl InputPort) -> bool {
        let level = hw.read_digital_input(id);
        self.debouncer(id).tick(level) == Some(ButtonEdge::Pressed)
    }
}

pub struct RemoteNode<'r, B> {
    config: NodeConfig,
    state: RemoteState,
    sync: RemoteSync,
    controls: Controls,
    tx: Transmitter<B>,
    rx: &'r RxBuffers,
    tick_count: u64,
}

impl<'r, B: BusPort> RemoteNode<'r, B> {
    pub fn new(config: NodeConfig, bus: B, rx: &'r RxBuffers) -> Self {
        let state = RemoteState::new(config.base_threshold);
        let sync = RemoteSync::new(&state);
        let tx = Transmitter::new(bus, config.control_channel);
        Self {
            controls: Controls::new(config.debounce_samples),
            config,
            state,
            sync,
            tx,
            rx,
            tick_count: 0,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started { role: NodeRole::Remote });
        info!(
            "RemoteNode started (threshold={}, range 1..={})",
            self.state.threshold,
            self.config.max_threshold()
        );
    }

    /// One control-loop iteration.
    pub fn tick(
        &mut self,
        hw: &mut (impl SetpointPort + InputPort + DisplayPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Setpoint follows the potentiometer every tick
        self.state.setpoint = hw.sample_setpoint_input();

        // 2. Latest temperature report from the local node
        let mailbox = self.rx.mailbox(self.config.control_channel);
        if let Some(inbound) = self.sync.apply_inbound(&mut self.state, mailbox) {
            report_inbound(inbound, sink);
        }

        // 3. Threshold: one step per press
        if self.controls.pressed(InputId::ThresholdUp, hw) {
            self.state.adjust_threshold(1, self.config.base_threshold);
        }
        if self.controls.pressed(InputId::ThresholdDown, hw) {
            self.state.adjust_threshold(-1, self.config.base_threshold);
        }

        // 4. Enable / disable
        if self.controls.pressed(InputId::Enable, hw) {
            if let Some(publication) = self.sync.on_enable_pressed(&mut self.state, &mut self.tx) {
                sink.emit(&AppEvent::EnabledChanged(true));
                report_publication(publication, sink);
            }
        }
        if self.controls.pressed(InputId::Disable, hw) {
            if let Some(publication) = self.sync.on_disable_pressed(&mut self.state, &mut self.tx) {
                sink.emit(&AppEvent::EnabledChanged(false));
                report_publication(publication, sink);
            }
        }

        // 5. Setpoint/threshold publication
        if let Some(publication) = self.sync.publish_changes(&self.state, &mut self.tx) {
            report_publication(publication, sink);
        }

        // 6. Display
        hw.render_status(&StatusView {
            temp: self.state.last_known_remote_temp,
            setpoint: self.state.setpoint,
            threshold: self.state.threshold,
            elapsed_secs: clock.now(),
        });
    }

    pub fn state(&self) -> &RemoteState {
        &self.state
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
