//! Remote ↔ local scenarios over the loopback bus.

use heatlink::app::events::AppEvent;
use heatlink::app::ports::InputId;
use heatlink::app::{LocalNode, RemoteNode};
use heatlink::clock::ElapsedClock;
use heatlink::config::{NodeConfig, NodeRole};
use heatlink::control::hysteresis::{Actuators, Switch};
use heatlink::protocol::ControlMessage;

use crate::mock_hw::{Link, MockLocalBoard, MockRemoteBoard, RecordingSink};

fn remote_config() -> NodeConfig {
    NodeConfig {
        debounce_samples: 1,
        ..NodeConfig::for_role(NodeRole::Remote)
    }
}

fn local_config() -> NodeConfig {
    NodeConfig::for_role(NodeRole::Local)
}

#[test]
fn threshold_set_drives_heating_and_temperature_flows_back() {
    let link = Link::new();
    let clock = ElapsedClock::new(3600);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut local = LocalNode::new(local_config(), &link.local_bus, &link.local_rx);
    let mut panel = MockRemoteBoard::default();
    let mut board = MockLocalBoard::at(40);
    let mut sink = RecordingSink::default();

    // Enable on its own tick so the mailbox holds one message at a time.
    panel.press(InputId::Enable);
    remote.tick(&mut panel, &clock, &mut sink);
    panel.release(InputId::Enable);
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);
    assert!(local.state().enabled);

    panel.setpoint = 50;
    remote.tick(&mut panel, &clock, &mut sink);
    assert!(sink.events.contains(&AppEvent::MessageSent(ControlMessage::threshold_set(50, 5))));
    link.deliver();

    local.tick(&mut board, &clock, &mut sink);
    assert_eq!(local.state().setpoint, 50);
    assert_eq!(local.state().threshold, 5);
    assert_eq!(local.actuators(), Actuators::HEATING);
    assert_eq!(board.heater(), Switch::On);
    assert_eq!(board.fan(), Switch::Off);

    link.deliver();
    remote.tick(&mut panel, &clock, &mut sink);
    assert_eq!(remote.state().last_known_remote_temp, 40);
    assert_eq!(panel.rendered.last().map(|v| v.temp), Some(40));
}

#[test]
fn enable_then_disable_forces_outputs_off() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut local = LocalNode::new(local_config(), &link.local_bus, &link.local_rx);
    let mut panel = MockRemoteBoard { setpoint: 50, ..MockRemoteBoard::default() };
    let mut board = MockLocalBoard::at(80);
    let mut sink = RecordingSink::default();

    // Settle setpoint/threshold first.
    remote.tick(&mut panel, &clock, &mut sink);
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);
    let before = *local.state();

    panel.press(InputId::Enable);
    remote.tick(&mut panel, &clock, &mut sink);
    panel.release(InputId::Enable);
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    // Only the enabled flag moved; too hot, so the fan runs.
    assert!(local.state().enabled);
    assert_eq!(local.state().setpoint, before.setpoint);
    assert_eq!(local.state().threshold, before.threshold);
    assert_eq!(board.fan(), Switch::On);

    panel.press(InputId::Disable);
    remote.tick(&mut panel, &clock, &mut sink);
    link.deliver();
    local.tick(&mut board, &clock, &mut sink);

    assert!(!local.state().enabled);
    assert_eq!(local.actuators(), Actuators::OFF);
    assert_eq!(board.heater(), Switch::Off);
    assert_eq!(board.fan(), Switch::Off);
}

#[test]
fn steady_state_is_silent() {
    let link = Link::new();
    let clock = ElapsedClock::new(0);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut local = LocalNode::new(local_config(), &link.local_bus, &link.local_rx);
    let mut panel = MockRemoteBoard { setpoint: 30, ..MockRemoteBoard::default() };
    let mut board = MockLocalBoard::at(30);
    let mut sink = RecordingSink::default();

    for _ in 0..3 {
        remote.tick(&mut panel, &clock, &mut sink);
        link.deliver();
        local.tick(&mut board, &clock, &mut sink);
        link.deliver();
    }
    let sent_after_settling = remote.stats().tx_count + local.stats().tx_count;

    for _ in 0..50 {
        remote.tick(&mut panel, &clock, &mut sink);
        link.deliver();
        local.tick(&mut board, &clock, &mut sink);
        link.deliver();
    }
    assert_eq!(remote.stats().tx_count + local.stats().tx_count, sent_after_settling);
    assert_eq!(remote.tick_count(), 53);
}

#[test]
fn display_shows_wrapped_clock() {
    let link = Link::new();
    let clock = ElapsedClock::new(3600);
    let mut remote = RemoteNode::new(remote_config(), &link.remote_bus, &link.remote_rx);
    let mut panel = MockRemoteBoard::default();
    let mut sink = RecordingSink::default();

    for _ in 0..3601 {
        clock.tick();
    }
    remote.tick(&mut panel, &clock, &mut sink);
    let view = panel.rendered.last().copied().unwrap();
    assert_eq!(view.elapsed_secs, 1);
    assert_eq!(view.elapsed().as_str(), "0:01");
}
