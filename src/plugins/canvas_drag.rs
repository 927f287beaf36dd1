//! Secondary-button drag pans the viewport.

#[cfg(test)]
#[path = "canvas_drag_test.rs"]
mod canvas_drag_test;

use crate::board::BoardCore;
use crate::events::BoardEvent;
use crate::geometry::Point;
use crate::input::Button;
use crate::plugin::Plugin;

#[derive(Debug, Default)]
pub struct CanvasDrag {
    /// Screen position at the previous tick while panning.
    last: Option<Point>,
}

impl CanvasDrag {
    pub const NAME: &'static str = "canvas-drag";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.last.is_some()
    }
}

impl Plugin for CanvasDrag {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_event(&mut self, core: &mut BoardCore, event: &BoardEvent) {
        match event {
            BoardEvent::PointerDown(info) if info.button == Some(Button::Secondary) => {
                self.last = Some(info.screen);
            }
            BoardEvent::PointerMove(info) => {
                if let Some(last) = self.last {
                    let delta = info.screen - last;
                    core.relative_pan(delta.x, delta.y);
                    self.last = Some(info.screen);
                }
            }
            BoardEvent::PointerUp(info) if info.button == Some(Button::Secondary) => {
                self.last = None;
            }
            _ => {}
        }
    }

    fn destroy(&mut self, _core: &mut BoardCore) {
        self.last = None;
    }
}
