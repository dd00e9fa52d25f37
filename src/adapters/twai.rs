//! TWAI (CAN) bus adapter.
//!
//! The controller has a single hardware receive queue, so the two logical
//! channels are carried in the 11-bit identifier:
//!
//! ```text
//!   identifier = port << 8 | kind tag        (port 1 = Aux, 2 = Control)
//! ```
//!
//! A receive task blocks on the driver's RX alert, moves every queued
//! hardware frame into per-channel software FIFOs, then runs
//! [`RxBuffers::service`] until both FIFOs are empty, exactly as a shared
//! receive interrupt would.  Transmit is one non-blocking
//! `twai_transmit` call.

use crate::protocol::{ChannelId, Frame};

const PORT_SHIFT: u32 = 8;
const TAG_MASK: u32 = (1 << PORT_SHIFT) - 1;

/// Pack a channel and frame id into a standard identifier.
pub const fn encode_identifier(channel: ChannelId, frame_id: u32) -> u32 {
    ((channel.port() as u32) << PORT_SHIFT) | (frame_id & TAG_MASK)
}

/// Split an identifier back into channel and frame id.  Frames for an
/// unknown port are not ours.
pub fn decode_identifier(identifier: u32) -> Option<(ChannelId, u32)> {
    let port = identifier >> PORT_SHIFT;
    let channel = ChannelId::ALL.into_iter().find(|c| u32::from(c.port()) == port)?;
    Some((channel, identifier & TAG_MASK))
}

/// Build the wire frame for a received identifier and payload.
pub fn frame_from_wire(identifier: u32, len: u8, data: [u8; 8]) -> Option<(ChannelId, Frame)> {
    let (channel, id) = decode_identifier(identifier)?;
    Some((channel, Frame { id, len, data }))
}

#[cfg(target_os = "espidf")]
pub use esp::{spawn_rx_task, TwaiBus};

#[cfg(target_os = "espidf")]
mod esp {
    use std::sync::Mutex;

    use esp_idf_svc::sys::*;
    use heapless::Deque;
    use log::{info, warn};

    use super::{encode_identifier, frame_from_wire};
    use crate::error::BusError;
    use crate::protocol::{BusPort, ChannelId, Frame, RxBuffers};

    const SOFT_FIFO_DEPTH: usize = 8;

    const OK: esp_err_t = ESP_OK as esp_err_t;
    const FAIL: esp_err_t = ESP_FAIL as esp_err_t;
    const TIMEOUT: esp_err_t = ESP_ERR_TIMEOUT as esp_err_t;
    const INVALID_STATE: esp_err_t = ESP_ERR_INVALID_STATE as esp_err_t;

    struct Fifos {
        aux: Deque<Frame, SOFT_FIFO_DEPTH>,
        control: Deque<Frame, SOFT_FIFO_DEPTH>,
    }

    impl Fifos {
        fn queue(&mut self, channel: ChannelId) -> &mut Deque<Frame, SOFT_FIFO_DEPTH> {
            match channel {
                ChannelId::Aux => &mut self.aux,
                ChannelId::Control => &mut self.control,
            }
        }
    }

    /// Handle to the installed TWAI driver.  `const` so it can be a
    /// `static` shared by the control loop and the receive task.
    pub struct TwaiBus {
        fifos: Mutex<Fifos>,
    }

    impl TwaiBus {
        pub const fn new() -> Self {
            Self {
                fifos: Mutex::new(Fifos {
                    aux: Deque::new(),
                    control: Deque::new(),
                }),
            }
        }

        fn with_fifos<R>(&self, f: impl FnOnce(&mut Fifos) -> R) -> R {
            let mut guard = self.fifos.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            f(&mut guard)
        }

        /// Move all frames from the hardware queue into the channel FIFOs.
        /// A full FIFO drops its oldest frame.
        fn pump(&self) -> usize {
            let mut moved = 0;
            loop {
                let mut msg = twai_message_t::default();
                // SAFETY: driver installed by hw_init before the RX task starts.
                if unsafe { twai_receive(&mut msg, 0) } != OK {
                    return moved;
                }
                let len = msg.data_length_code.min(8);
                let Some((channel, frame)) = frame_from_wire(msg.identifier, len, msg.data) else {
                    continue;
                };
                self.with_fifos(|f| {
                    let q = f.queue(channel);
                    if q.is_full() {
                        q.pop_front();
                    }
                    let _ = q.push_back(frame);
                });
                moved += 1;
            }
        }

        fn any_pending(&self) -> bool {
            self.with_fifos(|f| !f.aux.is_empty() || !f.control.is_empty())
        }
    }

    impl BusPort for TwaiBus {
        fn try_transmit(&self, channel: ChannelId, frame: &Frame) -> Result<(), BusError> {
            let mut msg = twai_message_t::default();
            msg.identifier = encode_identifier(channel, frame.id);
            msg.data_length_code = frame.len;
            msg.data = frame.data;
            // SAFETY: plain FFI call with a valid message; zero ticks never blocks.
            match unsafe { twai_transmit(&msg, 0) } {
                OK => Ok(()),
                TIMEOUT => Err(BusError::TxTimeout),
                FAIL => Err(BusError::TxRejected),
                INVALID_STATE => Err(BusError::BusOff),
                rc => Err(BusError::Driver(rc)),
            }
        }

        fn rx_pending(&self, channel: ChannelId) -> bool {
            self.with_fifos(|f| !f.queue(channel).is_empty())
        }

        fn read(&self, channel: ChannelId) -> Option<Frame> {
            self.with_fifos(|f| f.queue(channel).pop_front())
        }
    }

    /// Start the receive task feeding `rx` from `bus`.
    pub fn spawn_rx_task(bus: &'static TwaiBus, rx: &'static RxBuffers) -> std::io::Result<()> {
        std::thread::Builder::new()
            .name("twai-rx".into())
            .stack_size(4096)
            .spawn(move || rx_loop(bus, rx))?;
        info!("twai: receive task started");
        Ok(())
    }

    fn rx_loop(bus: &TwaiBus, rx: &RxBuffers) {
        loop {
            let mut alerts: u32 = 0;
            // SAFETY: driver installed; blocks this task only.
            let ret = unsafe { twai_read_alerts(&mut alerts, u32::MAX) };
            if ret != OK {
                continue;
            }

            if alerts & TWAI_ALERT_BUS_OFF != 0 {
                warn!("twai: bus-off, starting recovery");
                // SAFETY: valid only in bus-off state, which the alert reports.
                unsafe { twai_initiate_recovery() };
            }
            if alerts & TWAI_ALERT_RX_QUEUE_FULL != 0 {
                warn!("twai: hardware RX queue full");
            }
            if alerts & TWAI_ALERT_RX_DATA != 0 && bus.pump() > 0 {
                while bus.any_pending() {
                    rx.service(bus);
                }
            }
        }
    }
}
