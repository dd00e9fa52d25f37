//! Bus protocol: control messages, the transport layer and the
//! single-slot receive mailboxes shared with the receive interrupt.
//!
//! ```text
//!  Control loop ──send──▶ Transmitter ──▶ BusPort ──▶ bus
//!  Control loop ◀─take─── Mailbox ◀── RxBuffers::on_receive ◀── bus IRQ
//! ```

pub mod mailbox;
pub mod message;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use mailbox::{Mailbox, RxBuffers};
pub use message::{ControlMessage, Frame, MessageKind};
pub use transport::{BusPort, MessageSender, Transmitter};

/// The two logical bus channels.
///
/// Only [`ChannelId::Control`] carries control traffic and is drained by
/// the node loops.  [`ChannelId::Aux`] is still filled by the receive path
/// but nothing consumes it; its mailbox simply holds the latest frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelId {
    /// Channel 1.
    Aux,
    /// Channel 2.
    Control,
}

impl ChannelId {
    pub const ALL: [ChannelId; 2] = [ChannelId::Aux, ChannelId::Control];

    /// 1-based port number as printed on the board.
    pub const fn port(self) -> u8 {
        match self {
            Self::Aux => 1,
            Self::Control => 2,
        }
    }
}
