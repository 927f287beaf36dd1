//! Live cursor readout in image coordinates, drawn on the overlay.

#[cfg(test)]
#[path = "mouse_position_test.rs"]
mod mouse_position_test;

use crate::board::BoardCore;
use crate::error::PluginError;
use crate::events::BoardEvent;
use crate::geometry::Point;
use crate::plugin::Plugin;

#[derive(Debug, Default)]
pub struct MousePosition;

impl MousePosition {
    pub const NAME: &'static str = "mouse-position";

    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Readout text: image coordinates rounded to whole pixels.
#[must_use]
pub fn readout_text(image: Point) -> String {
    // `+ 0.0` folds a rounded -0 into 0.
    format!("({}, {})", image.x.round() + 0.0, image.y.round() + 0.0)
}

impl Plugin for MousePosition {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, core: &mut BoardCore) -> Result<(), PluginError> {
        if core.overlay_mut().is_none() {
            tracing::warn!("no overlay attached; mouse position readout is inert");
        }
        Ok(())
    }

    fn on_event(&mut self, core: &mut BoardCore, event: &BoardEvent) {
        let BoardEvent::PointerMove(info) = event else {
            return;
        };
        let text = readout_text(core.scene_to_image(info.scene));
        let Some(overlay) = core.overlay_mut() else {
            return;
        };
        if let Err(err) = overlay.clear().and_then(|()| overlay.draw_readout(info.screen, &text)) {
            tracing::warn!(%err, "mouse position readout failed");
        }
    }

    fn destroy(&mut self, core: &mut BoardCore) {
        let Some(overlay) = core.overlay_mut() else {
            return;
        };
        if let Err(err) = overlay.clear() {
            tracing::warn!(%err, "failed to clear overlay");
        }
    }
}
