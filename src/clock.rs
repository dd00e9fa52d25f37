//! Elapsed-seconds counter.
//!
//! Advanced by the 1 Hz timer callback and read by the control loop for
//! the status display.  Both sides are lock-free, so the counter can live
//! in a `static` shared with the timer task.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::app::ports::ClockPort;

pub struct ElapsedClock {
    secs: AtomicU32,
    /// Counter returns to zero on reaching this value; 0 never wraps.
    wrap: AtomicU32,
}

impl ElapsedClock {
    pub const fn new(wrap_secs: u32) -> Self {
        Self {
            secs: AtomicU32::new(0),
            wrap: AtomicU32::new(wrap_secs),
        }
    }

    /// Change the wrap point.  Applied on the next tick.
    pub fn set_wrap(&self, wrap_secs: u32) {
        self.wrap.store(wrap_secs, Ordering::Relaxed);
    }

    /// Advance by one second.  Returns the new value.
    pub fn tick(&self) -> u32 {
        let wrap = self.wrap.load(Ordering::Relaxed);
        let prev = self
            .secs
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                let next = s.wrapping_add(1);
                Some(if wrap != 0 && next >= wrap { 0 } else { next })
            })
            .unwrap_or_else(|s| s);
        let next = prev.wrapping_add(1);
        if wrap != 0 && next >= wrap { 0 } else { next }
    }

    pub fn elapsed(&self) -> u32 {
        self.secs.load(Ordering::Acquire)
    }
}

impl ClockPort for ElapsedClock {
    fn now(&self) -> u32 {
        self.elapsed()
    }
}
