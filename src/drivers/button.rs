//! Sample-driven push-button edge detector.
//!
//! The control loop feeds one raw level per tick (`true` = pressed).  A
//! level is accepted once it has been seen on `required` consecutive
//! ticks, which filters contact bounce without ever blocking the loop.
//!
//! ```text
//!            pressed × N             released × N
//!   Idle ──────────────────▶ Pressed ──────────────▶ Released ──(next tick)──▶ Idle
//!            emits Pressed                emits Released
//! ```
//!
//! Holding the button produces exactly one `Pressed` edge; the next one
//! needs a full release first.

/// Debounced transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pressed,
    Released,
}

pub struct Debouncer {
    state: DebounceState,
    required: u8,
    /// Consecutive samples disagreeing with the current state.
    run: u8,
}

impl Debouncer {
    /// `required` is clamped to at least one sample.
    pub fn new(required: u8) -> Self {
        Self {
            state: DebounceState::Idle,
            required: required.max(1),
            run: 0,
        }
    }

    /// Feed one raw sample.  Returns an edge when a level is accepted.
    pub fn tick(&mut self, pressed: bool) -> Option<ButtonEdge> {
        if self.state == DebounceState::Released {
            self.state = DebounceState::Idle;
        }

        match self.state {
            DebounceState::Idle if pressed => {
                if self.settle() {
                    self.state = DebounceState::Pressed;
                    return Some(ButtonEdge::Pressed);
                }
            }
            DebounceState::Pressed if !pressed => {
                if self.settle() {
                    self.state = DebounceState::Released;
                    return Some(ButtonEdge::Released);
                }
            }
            _ => self.run = 0,
        }
        None
    }

    /// Whether the button is currently held (debounced).
    pub fn is_pressed(&self) -> bool {
        self.state == DebounceState::Pressed
    }

    fn settle(&mut self) -> bool {
        self.run = self.run.saturating_add(1);
        if self.run >= self.required {
            self.run = 0;
            true
        } else {
            false
        }
    }
}
