//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the per-node control loops: [`LocalNode`] drives
//! the heater and fan, [`RemoteNode`] is the operator panel.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod display;
pub mod events;
pub mod local;
pub mod ports;
pub mod remote;

pub use local::LocalNode;
pub use remote::RemoteNode;

use crate::sync::{Inbound, Publication};

use events::AppEvent;
use ports::EventSink;

/// Turn a publication attempt into the matching event.
pub(crate) fn report_publication(publication: Publication, sink: &mut impl EventSink) {
    let event = if publication.accepted {
        AppEvent::MessageSent(publication.message)
    } else {
        AppEvent::SendFailed(publication.message)
    };
    sink.emit(&event);
}

/// Report what the sync layer did with an inbound message.
pub(crate) fn report_inbound(inbound: Inbound, sink: &mut impl EventSink) {
    let event = match inbound {
        Inbound::Applied(msg) => AppEvent::MessageApplied(msg),
        Inbound::Discarded(msg) => AppEvent::MessageDiscarded(msg),
    };
    sink.emit(&event);
}
