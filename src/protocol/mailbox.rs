//! Single-slot, last-writer-wins receive mailboxes.
//!
//! The receive interrupt deposits, the control loop takes.  Each slot is
//! guarded by an `embassy-sync` critical-section mutex so a take can never
//! observe a half-written message, and both sides can share the buffers
//! from a `static` without heap allocation.
//!
//! ```text
//! ┌──────────────┐ deposit (overwrites) ┌─────────┐  take  ┌──────────────┐
//! │ Receive IRQ  │─────────────────────▶│ Mailbox │───────▶│ Control loop │
//! └──────────────┘                      └─────────┘        └──────────────┘
//! ```
//!
//! A mailbox is not a queue: a second deposit before the consumer takes
//! the first silently replaces it.  The loss is only visible through the
//! `overwritten` counter.

use core::cell::Cell;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::CriticalSectionMutex;

use super::message::ControlMessage;
use super::transport::BusPort;
use super::ChannelId;

/// One receive slot plus its ready flag (`Some` = ready).
pub struct Mailbox {
    slot: CriticalSectionMutex<Cell<Option<ControlMessage>>>,
    overwritten: AtomicU32,
}

impl Mailbox {
    pub const fn new() -> Self {
        Self {
            slot: CriticalSectionMutex::new(Cell::new(None)),
            overwritten: AtomicU32::new(0),
        }
    }

    /// Store `msg` and mark the slot ready.
    ///
    /// Returns `true` if an unconsumed message was discarded.
    pub fn deposit(&self, msg: ControlMessage) -> bool {
        let prior = self.slot.lock(|slot| slot.replace(Some(msg)));
        if prior.is_some() {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Remove the pending message, leaving the slot not-ready.
    pub fn take(&self) -> Option<ControlMessage> {
        self.slot.lock(Cell::take)
    }

    /// Copy of the pending message without draining it.
    pub fn peek(&self) -> Option<ControlMessage> {
        self.slot.lock(Cell::get)
    }

    pub fn is_ready(&self) -> bool {
        self.peek().is_some()
    }

    /// Drop any pending message.
    pub fn clear(&self) {
        self.slot.lock(|slot| slot.set(None));
    }

    /// Messages lost to a newer deposit since boot.
    pub fn overwritten(&self) -> u32 {
        self.overwritten.load(Ordering::Relaxed)
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive side of the transport: one mailbox per channel plus counters.
pub struct RxBuffers {
    aux: Mailbox,
    control: Mailbox,
    rx_count: AtomicU32,
    rx_rejected: AtomicU32,
}

impl RxBuffers {
    pub const fn new() -> Self {
        Self {
            aux: Mailbox::new(),
            control: Mailbox::new(),
            rx_count: AtomicU32::new(0),
            rx_rejected: AtomicU32::new(0),
        }
    }

    pub fn mailbox(&self, channel: ChannelId) -> &Mailbox {
        match channel {
            ChannelId::Aux => &self.aux,
            ChannelId::Control => &self.control,
        }
    }

    /// Receive-interrupt body for one channel.
    ///
    /// Reads exactly one frame, decodes it and deposits it into the
    /// channel's mailbox (overwriting any unconsumed message).  Returns
    /// the deposited message; `None` if no frame was available or the
    /// frame did not decode.  Lock-free apart from the mailbox's short
    /// critical section, and never logs, so it is safe in ISR context.
    pub fn on_receive<B: BusPort + ?Sized>(
        &self,
        channel: ChannelId,
        bus: &B,
    ) -> Option<ControlMessage> {
        let frame = bus.read(channel)?;
        self.rx_count.fetch_add(1, Ordering::Relaxed);

        match ControlMessage::try_from(&frame) {
            Ok(msg) => {
                self.mailbox(channel).deposit(msg);
                Some(msg)
            }
            Err(_) => {
                self.rx_rejected.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Check every channel and pull one frame from each that has one,
    /// as a shared receive interrupt does.  Returns the number of
    /// messages deposited.
    pub fn service<B: BusPort + ?Sized>(&self, bus: &B) -> usize {
        ChannelId::ALL
            .iter()
            .filter(|&&ch| bus.rx_pending(ch))
            .filter(|&&ch| self.on_receive(ch, bus).is_some())
            .count()
    }

    /// Frames read from the bus since boot (decodable or not).
    pub fn rx_count(&self) -> u32 {
        self.rx_count.load(Ordering::Relaxed)
    }

    /// Frames that failed to decode.
    pub fn rx_rejected(&self) -> u32 {
        self.rx_rejected.load(Ordering::Relaxed)
    }

    /// Messages lost to overwrites, across both channels.
    pub fn rx_overwritten(&self) -> u32 {
        self.aux.overwritten().wrapping_add(self.control.overwritten())
    }
}

impl Default for RxBuffers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::loopback::LoopbackBus;
    use crate::protocol::message::Frame;

    #[test]
    fn empty_mailbox_is_not_ready() {
        let mb = Mailbox::new();
        assert!(!mb.is_ready());
        assert_eq!(mb.take(), None);
    }

    #[test]
    fn take_drains_slot() {
        let mb = Mailbox::new();
        assert!(!mb.deposit(ControlMessage::enabled()));
        assert_eq!(mb.peek(), Some(ControlMessage::enabled()));
        assert_eq!(mb.take(), Some(ControlMessage::enabled()));
        assert!(!mb.is_ready());
    }

    #[test]
    fn second_deposit_overwrites_first() {
        // The first message is unrecoverable; only the counter records it.
        let mb = Mailbox::new();
        mb.deposit(ControlMessage::threshold_set(40, 3));
        assert!(mb.deposit(ControlMessage::threshold_set(60, 4)));
        assert_eq!(mb.take(), Some(ControlMessage::threshold_set(60, 4)));
        assert_eq!(mb.take(), None);
        assert_eq!(mb.overwritten(), 1);
    }

    #[test]
    fn clear_discards_pending_message() {
        let mb = Mailbox::new();
        mb.deposit(ControlMessage::enabled());
        mb.clear();
        assert!(!mb.is_ready());
        assert_eq!(mb.take(), None);
        // Clearing is not an overwrite.
        assert!(!mb.deposit(ControlMessage::disabled()));
        assert_eq!(mb.overwritten(), 0);
    }

    #[test]
    fn on_receive_reads_one_frame_per_call() {
        let (a, b) = LoopbackBus::pair();
        let rx = RxBuffers::new();
        a.try_transmit(ChannelId::Control, &ControlMessage::enabled().to_frame()).unwrap();
        a.try_transmit(ChannelId::Control, &ControlMessage::disabled().to_frame()).unwrap();

        assert_eq!(rx.on_receive(ChannelId::Control, &b), Some(ControlMessage::enabled()));
        assert_eq!(rx.on_receive(ChannelId::Control, &b), Some(ControlMessage::disabled()));
        assert_eq!(rx.on_receive(ChannelId::Control, &b), None);

        // Consumer never drained between the two: only the second remains.
        assert_eq!(rx.mailbox(ChannelId::Control).take(), Some(ControlMessage::disabled()));
        assert_eq!(rx.rx_count(), 2);
        assert_eq!(rx.rx_overwritten(), 1);
    }

    #[test]
    fn undecodable_frame_is_counted_not_deposited() {
        let (_a, b) = LoopbackBus::pair();
        let rx = RxBuffers::new();
        b.inject(ChannelId::Control, Frame { id: 42, len: 8, data: [0; 8] });

        assert_eq!(rx.on_receive(ChannelId::Control, &b), None);
        assert!(!rx.mailbox(ChannelId::Control).is_ready());
        assert_eq!(rx.rx_rejected(), 1);
        assert_eq!(rx.rx_count(), 1);
    }

    #[test]
    fn service_fills_aux_channel_too() {
        let (a, b) = LoopbackBus::pair();
        let rx = RxBuffers::new();
        a.try_transmit(ChannelId::Aux, &ControlMessage::temperature_report(1).to_frame()).unwrap();
        a.try_transmit(ChannelId::Control, &ControlMessage::enabled().to_frame()).unwrap();

        assert_eq!(rx.service(&b), 2);
        assert!(rx.mailbox(ChannelId::Aux).is_ready());
        assert!(rx.mailbox(ChannelId::Control).is_ready());
    }
}
