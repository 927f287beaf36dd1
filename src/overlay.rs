//! Overlay readout surface.
//!
//! A non-interactive layer above the main canvas, sized to match it. It is
//! always drawn in raw pixel space: [`Overlay::clear`] resets the transform to
//! identity first, so the main viewport's zoom and pan never leak in.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::consts::{
    READOUT_BACKGROUND, READOUT_BOX_HEIGHT_PX, READOUT_FONT, READOUT_FONT_SIZE_PX, READOUT_OFFSET_PX,
    READOUT_PADDING_PX, READOUT_TEXT_COLOR,
};
use crate::error::RenderError;
use crate::geometry::{Affine, Bounds, Point};
use crate::render::Painter;

pub struct Overlay {
    surface: Box<dyn Painter>,
    width: f64,
    height: f64,
}

impl Overlay {
    #[must_use]
    pub fn new(surface: Box<dyn Painter>, width: f64, height: f64) -> Self {
        Self { surface, width, height }
    }

    /// Wipe the overlay under an identity transform.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if it rejects the reset.
    pub fn clear(&mut self) -> Result<(), RenderError> {
        self.surface.set_transform(&Affine::IDENTITY)?;
        self.surface.clear(self.width, self.height)
    }

    /// Draw `text` in a translucent box offset from `pointer` (screen pixels).
    /// The box moves to the other side of the pointer rather than run off
    /// the right or bottom edge.
    ///
    /// # Errors
    ///
    /// Returns the surface's error from any drawing call.
    pub fn draw_readout(&mut self, pointer: Point, text: &str) -> Result<(), RenderError> {
        let text_width = self.surface.measure_text(text, READOUT_FONT)?;
        let box_width = text_width + READOUT_PADDING_PX * 2.0;
        let mut left = pointer.x + READOUT_OFFSET_PX;
        let mut top = pointer.y + READOUT_OFFSET_PX;
        if left + box_width > self.width {
            left = pointer.x - READOUT_OFFSET_PX - box_width;
        }
        if top + READOUT_BOX_HEIGHT_PX > self.height {
            top = pointer.y - READOUT_OFFSET_PX - READOUT_BOX_HEIGHT_PX;
        }
        let rect = Bounds::new(left, top, box_width, READOUT_BOX_HEIGHT_PX);
        self.surface.fill_rect(rect, READOUT_BACKGROUND)?;
        let baseline_gap = (READOUT_BOX_HEIGHT_PX - READOUT_FONT_SIZE_PX) / 2.0;
        self.surface.fill_text(
            text,
            Point::new(left + READOUT_PADDING_PX, top + baseline_gap),
            READOUT_FONT,
            READOUT_TEXT_COLOR,
        )
    }

    /// Match a resized main canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay").field("width", &self.width).field("height", &self.height).finish()
    }
}
