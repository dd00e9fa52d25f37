//! Remote-side publication and receive rules.

use log::info;

use crate::protocol::{ControlMessage, Mailbox, MessageKind, MessageSender};
use crate::state::RemoteState;

use super::{Inbound, Publication};

/// Shadow of the setpoint/threshold pair last handed to the transport.
pub struct RemoteSync {
    sent_setpoint: i32,
    sent_threshold: i32,
}

impl RemoteSync {
    /// Start with the boot state as the shadow.  The first tick that
    /// derives a real setpoint therefore publishes it.
    pub fn new(boot: &RemoteState) -> Self {
        Self {
            sent_setpoint: boot.setpoint,
            sent_threshold: boot.threshold,
        }
    }

    /// Enable button edge.  Acts only while disabled.
    pub fn on_enable_pressed(
        &self,
        state: &mut RemoteState,
        tx: &mut impl MessageSender,
    ) -> Option<Publication> {
        if state.enabled {
            return None;
        }
        state.enabled = true;
        info!("remote: enabled");
        Some(publish(tx, ControlMessage::enabled()))
    }

    /// Disable button edge.  Acts only while enabled.
    pub fn on_disable_pressed(
        &self,
        state: &mut RemoteState,
        tx: &mut impl MessageSender,
    ) -> Option<Publication> {
        if !state.enabled {
            return None;
        }
        state.enabled = false;
        info!("remote: disabled");
        Some(publish(tx, ControlMessage::disabled()))
    }

    /// Publish `ThresholdSet(setpoint, threshold)` if either field moved
    /// since the last publication.  Both go out together.
    ///
    /// The shadow follows the attempt, not the outcome: a rejected frame
    /// is recovered only by the next change.
    pub fn publish_changes(
        &mut self,
        state: &RemoteState,
        tx: &mut impl MessageSender,
    ) -> Option<Publication> {
        if state.setpoint == self.sent_setpoint && state.threshold == self.sent_threshold {
            return None;
        }
        let publication = publish(tx, ControlMessage::threshold_set(state.setpoint, state.threshold));
        self.sent_setpoint = state.setpoint;
        self.sent_threshold = state.threshold;
        Some(publication)
    }

    /// Drain the control mailbox.  A temperature report updates the
    /// display copy; anything else is discarded.
    pub fn apply_inbound(&self, state: &mut RemoteState, mailbox: &Mailbox) -> Option<Inbound> {
        let msg = mailbox.take()?;
        if msg.kind() != MessageKind::TemperatureReport {
            return Some(Inbound::Discarded(msg));
        }
        state.last_known_remote_temp = msg.param_a();
        Some(Inbound::Applied(msg))
    }

    /// `(setpoint, threshold)` as last published.
    pub fn shadow(&self) -> (i32, i32) {
        (self.sent_setpoint, self.sent_threshold)
    }
}

fn publish(tx: &mut impl MessageSender, message: ControlMessage) -> Publication {
    Publication {
        message,
        accepted: tx.send(message),
    }
}
