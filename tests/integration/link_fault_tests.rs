//! Degraded-link behaviour: rejected sends, overwritten mailboxes,
//! garbage frames.  Every case keeps running on last-known state.

use heatlink::app::events::AppEvent;
use heatlink::app::ports::InputId;
use heatlink::app::{LocalNode, RemoteNode};
use heatlink::clock::ElapsedClock;
use heatlink::config::{NodeConfig, NodeRole};
use heatlink::protocol::{ChannelId, ControlMessage, Frame};

use crate::mock_hw::{Link, MockLocalBoard, MockRemoteBoard, RecordingSink};

fn remote_config() -> NodeConfig {
    NodeConfig {
        debounce_samples: 1,
        ..NodeConfig::for_role(NodeRole::Remote)
    }
}

#[test]
fn two_messages_in_one_tick_leave_only_the_second() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut local = LocalNode::new(NodeConfig::default(), &link.local_bus, &link.local_rx);
    let mut panel = MockRemoteBoard { setpoint: 50, ..MockRemoteBoard::default() };
    let mut board = MockLocalBoard::at(50);
    let mut sink = RecordingSink::default();

    // Enabled and ThresholdSet leave in the same tick.
    panel.press(InputId::Enable);
    remote.tick(&mut panel, &clock, &mut sink);
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    // The Enabled frame was overwritten before the loop could drain it.
    assert!(!local.state().enabled);
    assert_eq!(local.state().setpoint, 50);
    assert_eq!(local.stats().rx_overwritten, 1);
}

#[test]
fn rejected_threshold_is_not_retried() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut panel = MockRemoteBoard { setpoint: 42, ..MockRemoteBoard::default() };
    let mut sink = RecordingSink::default();

    link.remote_bus.set_accepting(false);
    remote.tick(&mut panel, &clock, &mut sink);
    link.remote_bus.set_accepting(true);
    for _ in 0..10 {
        remote.tick(&mut panel, &clock, &mut sink);
    }

    assert_eq!(remote.stats().tx_failures, 1);
    assert_eq!(remote.stats().tx_count, 0);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SendFailed(_))),
        1
    );

    // The next change goes through and carries the current values.
    panel.setpoint = 43;
    remote.tick(&mut panel, &clock, &mut sink);
    assert!(sink.events.contains(&AppEvent::MessageSent(ControlMessage::threshold_set(43, 5))));
}

#[test]
fn garbage_frame_is_counted_and_ignored() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut local = LocalNode::new(NodeConfig::default(), &link.local_bus, &link.local_rx);
    let mut board = MockLocalBoard::at(20);
    let mut sink = RecordingSink::default();

    link.local_bus.inject(ChannelId::Control, Frame { id: 99, len: 8, data: [0; 8] });
    link.local_bus.inject(ChannelId::Control, Frame { id: 1, len: 3, data: [0; 8] });
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    assert_eq!(local.stats().rx_rejected, 2);
    assert!(!local.state().enabled);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::MessageApplied(_))), 0);
}

#[test]
fn aux_channel_is_filled_but_never_drained() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut local = LocalNode::new(NodeConfig::default(), &link.local_bus, &link.local_rx);
    let mut board = MockLocalBoard::at(20);
    let mut sink = RecordingSink::default();

    link.local_bus.inject(ChannelId::Aux, ControlMessage::enabled().to_frame());
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    assert!(!local.state().enabled);
    assert!(link.local_rx.mailbox(ChannelId::Aux).is_ready());
}

#[test]
fn unvalidated_threshold_is_applied_as_sent() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut local = LocalNode::new(NodeConfig::default(), &link.local_bus, &link.local_rx);
    let mut board = MockLocalBoard::at(20);
    let mut sink = RecordingSink::default();

    link.local_bus.inject(ChannelId::Control, ControlMessage::threshold_set(-7, i32::MAX).to_frame());
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    assert_eq!(local.state().setpoint, -7);
    assert_eq!(local.state().threshold, i32::MAX);
}
