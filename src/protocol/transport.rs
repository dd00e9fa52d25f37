//! Transport abstraction over the shared broadcast bus.
//!
//! Concrete implementations:
//! - TWAI (CAN) controller on the ESP32-S3 (`adapters::twai`)
//! - In-memory loopback pair for host tests and simulation
//!   (`adapters::loopback`)
//!
//! Sending is a single non-blocking attempt.  A rejected frame is counted
//! and dropped; nothing is retried.  The next change-triggered publication
//! carries whatever the current value is by then.

use log::{debug, warn};

use crate::error::BusError;

use super::message::{ControlMessage, Frame};
use super::ChannelId;

/// Frame-oriented bus controller (driven adapter).
///
/// Methods take `&self` so the transmit path (control loop) and the
/// receive path (interrupt) can share one controller handle.
pub trait BusPort {
    /// Queue one frame on `channel` without blocking.
    fn try_transmit(&self, channel: ChannelId, frame: &Frame) -> Result<(), BusError>;

    /// Whether a received frame is waiting on `channel`.
    fn rx_pending(&self, channel: ChannelId) -> bool;

    /// Pop one received frame from `channel`, if any.
    fn read(&self, channel: ChannelId) -> Option<Frame>;
}

impl<B: BusPort + ?Sized> BusPort for &B {
    fn try_transmit(&self, channel: ChannelId, frame: &Frame) -> Result<(), BusError> {
        (**self).try_transmit(channel, frame)
    }

    fn rx_pending(&self, channel: ChannelId) -> bool {
        (**self).rx_pending(channel)
    }

    fn read(&self, channel: ChannelId) -> Option<Frame> {
        (**self).read(channel)
    }
}

/// Anything that can put a control message on the wire.
///
/// The synchronization logic publishes through this seam so it can be
/// exercised with a recording sender.
pub trait MessageSender {
    /// Attempt to send once.  Returns whether the medium accepted it.
    fn send(&mut self, msg: ControlMessage) -> bool;
}

/// Transmit side of the transport.
pub struct Transmitter<B> {
    bus: B,
    channel: ChannelId,
    tx_count: u32,
    tx_failures: u32,
    last_error: Option<BusError>,
}

impl<B: BusPort> Transmitter<B> {
    pub fn new(bus: B, channel: ChannelId) -> Self {
        Self {
            bus,
            channel,
            tx_count: 0,
            tx_failures: 0,
            last_error: None,
        }
    }

    /// Successful transmits since boot.  Diagnostic only.
    pub fn tx_count(&self) -> u32 {
        self.tx_count
    }

    /// Rejected transmits since boot.
    pub fn tx_failures(&self) -> u32 {
        self.tx_failures
    }

    /// Most recent transmit error, if any.
    pub fn last_error(&self) -> Option<BusError> {
        self.last_error
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// The underlying bus handle (shared with the receive path).
    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B: BusPort> MessageSender for Transmitter<B> {
    fn send(&mut self, msg: ControlMessage) -> bool {
        match self.bus.try_transmit(self.channel, &msg.to_frame()) {
            Ok(()) => {
                self.tx_count = self.tx_count.wrapping_add(1);
                debug!(
                    "bus: tx {:?} a={} b={} on port {}",
                    msg.kind(),
                    msg.param_a(),
                    msg.param_b(),
                    self.channel.port()
                );
                true
            }
            Err(e) => {
                self.tx_failures = self.tx_failures.wrapping_add(1);
                self.last_error = Some(e);
                warn!("bus: {:?} dropped ({})", msg.kind(), e);
                false
            }
        }
    }
}
