//! Mouse-wheel zoom about the pointer.

#[cfg(test)]
#[path = "wheel_zoom_test.rs"]
mod wheel_zoom_test;

use crate::board::BoardCore;
use crate::config::WheelZoomOptions;
use crate::consts::WHEEL_NOTCH;
use crate::events::BoardEvent;
use crate::plugin::Plugin;

#[derive(Debug)]
pub struct WheelZoom {
    options: WheelZoomOptions,
}

impl WheelZoom {
    pub const NAME: &'static str = "wheel-zoom";

    #[must_use]
    pub fn new(options: WheelZoomOptions) -> Self {
        Self { options }
    }

    /// Zoom level after one wheel event at `current`. Scrolling up
    /// (negative `dy`) zooms out, anything else zooms in. `None` when the
    /// result falls outside the configured range.
    #[must_use]
    pub fn next_zoom(&self, current: f64, dy: f64) -> Option<f64> {
        let notch = if dy < 0.0 { -WHEEL_NOTCH } else { WHEEL_NOTCH };
        let next = current * (1.0 + notch * self.options.step);
        (self.options.min_zoom..=self.options.max_zoom).contains(&next).then_some(next)
    }
}

impl Plugin for WheelZoom {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_event(&mut self, core: &mut BoardCore, event: &BoardEvent) {
        let BoardEvent::Wheel(wheel) = event else {
            return;
        };
        let Some(next) = self.next_zoom(core.zoom_level(), wheel.delta.dy) else {
            tracing::debug!(zoom = core.zoom_level(), "wheel zoom at limit");
            return;
        };
        if let Err(err) = core.zoom_to_point(wheel.screen, next) {
            tracing::warn!(%err, "wheel zoom rejected");
        }
    }
}
