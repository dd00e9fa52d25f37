//! In-memory bus pair for host simulation and tests.
//!
//! [`LoopbackBus::pair`] returns two endpoints wired back to back: a
//! frame transmitted on a channel by one endpoint becomes readable on
//! the same channel of the other.  Each direction holds a small
//! per-channel FIFO, standing in for the controller's hardware receive
//! queue.  Single-threaded by construction (`Rc`), like the host
//! simulation loop.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use heapless::Deque;

use crate::error::BusError;
use crate::protocol::{BusPort, ChannelId, Frame};

/// Hardware RX FIFO depth modelled per channel.
const WIRE_DEPTH: usize = 8;

#[derive(Default)]
struct Wire {
    aux: Deque<Frame, WIRE_DEPTH>,
    control: Deque<Frame, WIRE_DEPTH>,
}

impl Wire {
    fn queue(&mut self, channel: ChannelId) -> &mut Deque<Frame, WIRE_DEPTH> {
        match channel {
            ChannelId::Aux => &mut self.aux,
            ChannelId::Control => &mut self.control,
        }
    }
}

/// One endpoint of a back-to-back bus.
pub struct LoopbackBus {
    outbound: Rc<RefCell<Wire>>,
    inbound: Rc<RefCell<Wire>>,
    accepting: Cell<bool>,
}

impl LoopbackBus {
    /// Two connected endpoints.
    pub fn pair() -> (Self, Self) {
        let a_to_b = Rc::new(RefCell::new(Wire::default()));
        let b_to_a = Rc::new(RefCell::new(Wire::default()));
        (
            Self {
                outbound: Rc::clone(&a_to_b),
                inbound: Rc::clone(&b_to_a),
                accepting: Cell::new(true),
            },
            Self {
                outbound: b_to_a,
                inbound: a_to_b,
                accepting: Cell::new(true),
            },
        )
    }

    /// Simulate a controller that refuses (or accepts again) transmits.
    pub fn set_accepting(&self, accepting: bool) {
        self.accepting.set(accepting);
    }

    /// Place a raw frame directly into this endpoint's receive FIFO.
    pub fn inject(&self, channel: ChannelId, frame: Frame) {
        // A full FIFO drops the injected frame, as the hardware would.
        let _ = self.inbound.borrow_mut().queue(channel).push_back(frame);
    }

    /// Frames waiting to be read on `channel`.
    pub fn pending(&self, channel: ChannelId) -> usize {
        self.inbound.borrow_mut().queue(channel).len()
    }
}

impl BusPort for LoopbackBus {
    fn try_transmit(&self, channel: ChannelId, frame: &Frame) -> Result<(), BusError> {
        if !self.accepting.get() {
            return Err(BusError::TxRejected);
        }
        self.outbound
            .borrow_mut()
            .queue(channel)
            .push_back(*frame)
            .map_err(|_| BusError::TxRejected)
    }

    fn rx_pending(&self, channel: ChannelId) -> bool {
        !self.inbound.borrow_mut().queue(channel).is_empty()
    }

    fn read(&self, channel: ChannelId) -> Option<Frame> {
        self.inbound.borrow_mut().queue(channel).pop_front()
    }
}
