//! Interrupt-driven event system.
//!
//! Events are produced by the timer callbacks (control tick, and the
//! diagnostics report derived from the 1 Hz tick) and consumed by the
//! main loop, one at a time in FIFO order.  Received frames do not pass
//! through here: the bus receive task deposits them straight into the
//! mailboxes, which the next control tick drains.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer task  │────▶│  Event Queue │────▶│  Main Loop   │
//! └─────────────┘     │  (lock-free) │     │  (consumer)  │
//!                     └──────────────┘     └──────────────┘
//! ```

use heapless::mpmc::Q16;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Run one control-loop iteration.
    ControlTick,
    /// Periodic link statistics report is due.
    DiagnosticsTick,
}

// Producers run in the esp_timer task; the main loop is the only consumer.
static EVENT_QUEUE: Q16<Event> = Q16::new();

/// Push an event into the queue.
/// Safe to call from any task (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    EVENT_QUEUE.enqueue(event).is_ok()
}

/// Pop the next event from the queue.
pub fn pop_event() -> Option<Event> {
    EVENT_QUEUE.dequeue()
}

/// Held by every test that pushes to or drains the process-wide queue.
#[cfg(test)]
pub(crate) static QUEUE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}
