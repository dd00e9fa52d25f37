//! Status display model.
//!
//! Both panels show the same two lines:
//!
//! ```text
//! T=<temp>  S=<setpoint>(<threshold>)
//! <m:ss>
//! ```
//!
//! plus a scrolling trend column: one pixel column per elapsed second,
//! filled to a height proportional to the temperature.

use core::fmt::Write;

use heapless::String;

/// Width/height of the square trend window, in pixels.
pub const TREND_WINDOW: u32 = 131;
/// Top margin of the trend window.
pub const TREND_OFFSET: u32 = 10;
/// Temperature mapped to a full-height column.
pub const TREND_FULL_SCALE: i32 = 170;

/// Everything a display adapter needs for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    pub temp: i32,
    pub setpoint: i32,
    pub threshold: i32,
    pub elapsed_secs: u32,
}

impl StatusView {
    /// First display line.
    pub fn summary(&self) -> String<48> {
        let mut s = String::new();
        // Fits three full-width i32s plus the fixed text.
        let _ = write!(s, "T={}  S={}({})", self.temp, self.setpoint, self.threshold);
        s
    }

    /// Second display line.
    pub fn elapsed(&self) -> String<12> {
        format_elapsed(self.elapsed_secs)
    }

    /// Trend column for this refresh.
    pub fn trend(&self) -> TrendColumn {
        TrendColumn::at(self.elapsed_secs, self.temp)
    }
}

/// Elapsed seconds as `m:ss`.
pub fn format_elapsed(secs: u32) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}", secs / 60, secs % 60);
    s
}

/// One column of the trend graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendColumn {
    /// Column index inside the window.
    pub column: u32,
    /// Row where the filled bar starts (larger value = shorter bar).
    pub bar_top: u32,
}

impl TrendColumn {
    pub fn at(elapsed_secs: u32, value: i32) -> Self {
        let clamped = value.clamp(0, TREND_FULL_SCALE);
        let span = (TREND_WINDOW - TREND_OFFSET) as i32;
        let empty = span - clamped * span / TREND_FULL_SCALE;
        Self {
            column: elapsed_secs % TREND_WINDOW,
            bar_top: TREND_OFFSET + empty as u32,
        }
    }
}
