//! Outbound application events.
//!
//! The node services emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::config::NodeRole;
use crate::control::hysteresis::Actuators;
use crate::diagnostics::LinkStats;
use crate::protocol::ControlMessage;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The node service has started.
    Started { role: NodeRole },

    /// The transport accepted an outgoing message.
    MessageSent(ControlMessage),

    /// The transport refused an outgoing message (dropped, not retried).
    SendFailed(ControlMessage),

    /// An inbound message was taken from the mailbox and applied.
    MessageApplied(ControlMessage),

    /// An inbound message of a kind this node does not consume was
    /// drained without effect.
    MessageDiscarded(ControlMessage),

    /// The enabled flag flipped.
    EnabledChanged(bool),

    /// Heater/fan command changed.
    ActuatorsChanged { from: Actuators, to: Actuators },

    /// Periodic link counters.
    Diagnostics(LinkStats),
}
