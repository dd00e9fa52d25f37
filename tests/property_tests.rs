//! Property tests for the control decision, the threshold clamp and the
//! publication rules.
//!
//! Runs on host (x86_64) only; proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use critical_section as _;

use heatlink::control::hysteresis::{decide, Actuators};
use heatlink::protocol::{ControlMessage, Mailbox, MessageKind, MessageSender};
use heatlink::state::RemoteState;
use heatlink::sync::RemoteSync;
use proptest::prelude::*;

fn arb_actuators() -> impl Strategy<Value = Actuators> {
    prop_oneof![
        Just(Actuators::OFF),
        Just(Actuators::HEATING),
        Just(Actuators::COOLING),
    ]
}

// Keep band edges representable so "below"/"above" are well defined.
const RANGE: i32 = 1_000_000;

// ── Hysteresis decision ───────────────────────────────────────

proptest! {
    #[test]
    fn below_band_heats(
        setpoint in -RANGE..RANGE,
        threshold in 0..RANGE,
        below in 1..RANGE,
        prev in arb_actuators(),
    ) {
        let temp = setpoint - threshold - below;
        prop_assert_eq!(decide(true, temp, setpoint, threshold, prev), Actuators::HEATING);
    }

    #[test]
    fn above_band_cools(
        setpoint in -RANGE..RANGE,
        threshold in 0..RANGE,
        above in 1..RANGE,
        prev in arb_actuators(),
    ) {
        let temp = setpoint + threshold + above;
        prop_assert_eq!(decide(true, temp, setpoint, threshold, prev), Actuators::COOLING);
    }

    #[test]
    fn disabled_is_always_off(
        temp in any::<i32>(),
        setpoint in any::<i32>(),
        threshold in any::<i32>(),
        prev in arb_actuators(),
    ) {
        prop_assert_eq!(decide(false, temp, setpoint, threshold, prev), Actuators::OFF);
    }

    /// Once inside the deadband, repeated ticks never toggle.
    #[test]
    fn deadband_is_idempotent(
        setpoint in -RANGE..RANGE,
        threshold in 0..RANGE,
        offset in -RANGE..RANGE,
        prev in arb_actuators(),
        ticks in 1usize..50,
    ) {
        let temp = setpoint + offset.clamp(-threshold, threshold);
        let mut out = prev;
        for _ in 0..ticks {
            let next = decide(true, temp, setpoint, threshold, out);
            prop_assert_eq!(next, prev);
            out = next;
        }
    }
}

// ── Threshold clamp ───────────────────────────────────────────

proptest! {
    #[test]
    fn threshold_stays_in_range(
        base in 1i32..50,
        steps in proptest::collection::vec(prop_oneof![Just(1i32), Just(-1i32)], 0..200),
    ) {
        let mut state = RemoteState::new(base);
        for delta in steps {
            state.adjust_threshold(delta, base);
            prop_assert!((1..=2 * base).contains(&state.threshold));
        }
    }

    #[test]
    fn clamp_holds_at_both_ends(base in 1i32..50, extra in 1usize..20) {
        let mut state = RemoteState::new(base);
        for _ in 0..(2 * base as usize + extra) {
            state.adjust_threshold(1, base);
        }
        prop_assert_eq!(state.threshold, 2 * base);
        for _ in 0..(2 * base as usize + extra) {
            state.adjust_threshold(-1, base);
        }
        prop_assert_eq!(state.threshold, 1);
    }
}

// ── Change-triggered publication ──────────────────────────────

struct Recorder(Vec<ControlMessage>);

impl MessageSender for Recorder {
    fn send(&mut self, msg: ControlMessage) -> bool {
        self.0.push(msg);
        true
    }
}

proptest! {
    /// Unchanged values send nothing; any change sends exactly one
    /// `ThresholdSet` carrying both current values.
    #[test]
    fn threshold_set_only_on_change(
        readings in proptest::collection::vec((0i32..103, 1i32..11), 1..50),
    ) {
        let mut state = RemoteState::new(5);
        let mut sync = RemoteSync::new(&state);
        let mut tx = Recorder(Vec::new());
        let mut last = (state.setpoint, state.threshold);

        for (setpoint, threshold) in readings {
            state.setpoint = setpoint;
            state.threshold = threshold;
            let before = tx.0.len();
            sync.publish_changes(&state, &mut tx);

            if (setpoint, threshold) == last {
                prop_assert_eq!(tx.0.len(), before);
            } else {
                prop_assert_eq!(tx.0.len(), before + 1);
                prop_assert_eq!(tx.0[before], ControlMessage::threshold_set(setpoint, threshold));
            }
            last = (setpoint, threshold);
        }
    }

    /// The mailbox keeps only the newest of several deposits.
    #[test]
    fn mailbox_keeps_last_writer(temps in proptest::collection::vec(any::<i32>(), 1..10)) {
        let mailbox = Mailbox::new();
        for &t in &temps {
            mailbox.deposit(ControlMessage::temperature_report(t));
        }
        let taken = mailbox.take();
        prop_assert_eq!(taken.map(|m| m.kind()), Some(MessageKind::TemperatureReport));
        prop_assert_eq!(taken.map(|m| m.param_a()), temps.last().copied());
        prop_assert_eq!(mailbox.overwritten() as usize, temps.len() - 1);
        prop_assert!(mailbox.take().is_none());
    }
}
