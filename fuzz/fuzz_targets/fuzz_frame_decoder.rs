//! Fuzz target: frame decoding
//!
//! Drives arbitrary bytes through `Frame::from_bytes` and the message
//! validator, then deposits anything that decodes into a mailbox.  Asserts
//! that nothing panics and that an accepted message re-encodes to a frame
//! that decodes back to itself.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use critical_section as _;
use heatlink::protocol::{ControlMessage, Frame, Mailbox};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = Frame::from_bytes(data) else {
        return;
    };

    if let Ok(msg) = ControlMessage::try_from(&frame) {
        let again = msg.to_frame();
        assert_eq!(again.len, 8, "encoded frames always carry a full payload");
        assert_eq!(ControlMessage::try_from(&again), Ok(msg));

        let mailbox = Mailbox::new();
        mailbox.deposit(msg);
        assert_eq!(mailbox.take(), Some(msg));
        assert!(mailbox.take().is_none());
    }
});
