//! Link diagnostics and panic reporting.
//!
//! The link is fail-soft: a rejected transmit or an overwritten mailbox
//! never stops the control loop.  These counters make that degraded state
//! visible.  The device loop snapshots them every
//! `diagnostics_interval_secs` and emits them as `AppEvent::Diagnostics`.

use serde::{Deserialize, Serialize};

use crate::protocol::{BusPort, RxBuffers, Transmitter};

/// Point-in-time bus counters for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Frames accepted by the bus controller.
    pub tx_count: u32,
    /// Transmit attempts the controller refused.
    pub tx_failures: u32,
    /// Frames decoded and deposited in a mailbox.
    pub rx_count: u32,
    /// Deposits that replaced an unconsumed message.
    pub rx_overwritten: u32,
    /// Frames that failed to decode.
    pub rx_rejected: u32,
}

impl LinkStats {
    pub fn collect<B: BusPort>(tx: &Transmitter<B>, rx: &RxBuffers) -> Self {
        Self {
            tx_count: tx.tx_count(),
            tx_failures: tx.tx_failures(),
            rx_count: rx.rx_count(),
            rx_overwritten: rx.rx_overwritten(),
            rx_rejected: rx.rx_rejected(),
        }
    }

    /// Whether any frame has been lost in either direction.
    pub fn is_degraded(&self) -> bool {
        self.tx_failures > 0 || self.rx_overwritten > 0 || self.rx_rejected > 0
    }
}

// ───────────────────────────────────────────────────────────────
// Custom panic handler
// ───────────────────────────────────────────────────────────────

/// Install a panic hook that logs the reason before the default abort.
///
/// Must be called once during init, after the logger is installed.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => log::error!("PANIC: {} at {}:{}", reason, loc.file(), loc.line()),
            None => log::error!("PANIC: {}", reason),
        }
    }));
}
