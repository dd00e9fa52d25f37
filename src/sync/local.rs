//! Local-side receive dispatch and temperature publication.

use log::info;

use crate::protocol::{ControlMessage, Mailbox, MessageKind, MessageSender};
use crate::state::LocalState;

use super::{Inbound, Publication};

/// Shadow of the temperature last handed to the transport.
pub struct LocalSync {
    sent_temp: i32,
}

impl LocalSync {
    /// Boot shadow is zero, so a first non-zero reading is published.
    pub fn new() -> Self {
        Self { sent_temp: 0 }
    }

    /// Apply one pending message from the remote.
    ///
    /// The message is taken out of the mailbox atomically before it is
    /// dispatched, so a frame arriving mid-dispatch waits for the next
    /// tick instead of being cleared unseen.  Values are applied without
    /// range checks.  A stray `TemperatureReport` is discarded.
    pub fn apply_inbound(&self, state: &mut LocalState, mailbox: &Mailbox) -> Option<Inbound> {
        let msg = mailbox.take()?;
        match msg.kind() {
            MessageKind::Enabled => {
                if !state.enabled {
                    info!("local: enabled by remote");
                }
                state.enabled = true;
            }
            MessageKind::Disabled => {
                if state.enabled {
                    info!("local: disabled by remote");
                }
                state.enabled = false;
            }
            MessageKind::ThresholdSet => {
                state.setpoint = msg.param_a();
                state.threshold = msg.param_b();
            }
            MessageKind::TemperatureReport => return Some(Inbound::Discarded(msg)),
        }
        Some(Inbound::Applied(msg))
    }

    /// Publish `TemperatureReport(temp, 0)` if the reading moved.
    pub fn publish_changes(
        &mut self,
        state: &LocalState,
        tx: &mut impl MessageSender,
    ) -> Option<Publication> {
        if state.measured_temp == self.sent_temp {
            return None;
        }
        let message = ControlMessage::temperature_report(state.measured_temp);
        let accepted = tx.send(message);
        self.sent_temp = state.measured_temp;
        Some(Publication { message, accepted })
    }

    /// Temperature as last published.
    pub fn shadow(&self) -> i32 {
        self.sent_temp
    }
}

impl Default for LocalSync {
    fn default() -> Self {
        Self::new()
    }
}
