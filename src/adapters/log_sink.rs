//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device).  One line per event,
//! `TAG | key=value`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { role } => {
                info!("START | role={:?}", role);
            }
            AppEvent::MessageSent(msg) => {
                info!("TX | kind={:?} a={} b={}", msg.kind(), msg.param_a(), msg.param_b());
            }
            AppEvent::SendFailed(msg) => {
                warn!("TXFAIL | kind={:?} a={} b={}", msg.kind(), msg.param_a(), msg.param_b());
            }
            AppEvent::MessageApplied(msg) => {
                info!("RX | kind={:?} a={} b={}", msg.kind(), msg.param_a(), msg.param_b());
            }
            AppEvent::MessageDiscarded(msg) => {
                debug!("RX | discarded kind={:?}", msg.kind());
            }
            AppEvent::EnabledChanged(enabled) => {
                info!("STATE | enabled={}", enabled);
            }
            AppEvent::ActuatorsChanged { from, to } => {
                info!(
                    "ACT | heater={:?}->{:?} fan={:?}->{:?}",
                    from.heater, to.heater, from.fan, to.fan
                );
            }
            AppEvent::Diagnostics(stats) => {
                let line = format!(
                    "DIAG | tx={} txfail={} rx={} overwritten={} rejected={}",
                    stats.tx_count,
                    stats.tx_failures,
                    stats.rx_count,
                    stats.rx_overwritten,
                    stats.rx_rejected,
                );
                if stats.is_degraded() {
                    warn!("{}", line);
                } else {
                    info!("{}", line);
                }
            }
        }
    }
}
