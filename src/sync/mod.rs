//! Change-triggered state synchronization between the two nodes.
//!
//! Each node publishes only the fields it owns, and only when they differ
//! from the value it last published (its shadow).  There is no periodic
//! refresh, no acknowledgement and no sequence number: a dropped frame
//! leaves the peer stale until the value changes again.
//!
//! ```text
//!  remote ── Enabled / Disabled / ThresholdSet(setpoint, threshold) ──▶ local
//!  remote ◀────────────── TemperatureReport(temp, 0) ─────────────────  local
//! ```

pub mod local;
pub mod remote;

pub use local::LocalSync;
pub use remote::RemoteSync;

use crate::protocol::ControlMessage;

/// Outcome of one publication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub message: ControlMessage,
    /// Whether the transport accepted the frame.
    pub accepted: bool,
}

/// What happened to a message taken from the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// The message changed this node's state.
    Applied(ControlMessage),
    /// Not a kind this node consumes; drained and dropped.
    Discarded(ControlMessage),
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::protocol::{ControlMessage, MessageSender};

    /// Sender that records every attempt and accepts or rejects on demand.
    pub struct RecordingSender {
        pub sent: Vec<ControlMessage>,
        pub accept: bool,
    }

    impl RecordingSender {
        pub fn new() -> Self {
            Self { sent: Vec::new(), accept: true }
        }
    }

    impl MessageSender for RecordingSender {
        fn send(&mut self, msg: ControlMessage) -> bool {
            self.sent.push(msg);
            self.accept
        }
    }
}
