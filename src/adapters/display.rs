//! Console status display.
//!
//! The boards have no panel driver yet, so the status lines go to the
//! log.  Only changes are printed: the first line when a value moves,
//! the elapsed time once a minute.

use log::{debug, info};

use crate::app::display::StatusView;
use crate::app::ports::DisplayPort;

#[derive(Default)]
pub struct LogDisplay {
    last: Option<StatusView>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered view.
    pub fn last(&self) -> Option<&StatusView> {
        self.last.as_ref()
    }
}

impl DisplayPort for LogDisplay {
    fn render_status(&mut self, view: &StatusView) {
        let values_changed = self.last.is_none_or(|l| {
            (l.temp, l.setpoint, l.threshold) != (view.temp, view.setpoint, view.threshold)
        });
        let minute_changed = self
            .last
            .is_none_or(|l| l.elapsed_secs / 60 != view.elapsed_secs / 60);

        if values_changed {
            info!("DISPLAY | {}  {}", view.summary(), view.elapsed());
        } else if minute_changed {
            info!("DISPLAY | {}", view.elapsed());
        }
        let trend = view.trend();
        debug!("DISPLAY | trend col={} top={}", trend.column, trend.bar_top);

        self.last = Some(*view);
    }
}
