//! Rendering: draws the board to a 2D surface.
//!
//! Drawing goes through the [`Painter`] seam so scene traversal can be tested
//! without a browser. [`CanvasPainter`] is the production implementation and
//! the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Rendering reads board state and never mutates it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::error::RenderError;
use crate::geometry::{Affine, Bounds, Point};
use crate::image::ImageAnchor;
use crate::scene::{Geometry, Scene, Style};
use crate::viewport::Viewport;

/// Decoded images by URL, shared between the loader that fills it and the
/// painter that draws from it.
pub type ImageCache = Rc<RefCell<HashMap<String, HtmlImageElement>>>;

/// Make `value` the only cached entry. The board shows a single background
/// image, so a new decode evicts everything before it.
pub fn replace_cached<V>(cache: &RefCell<HashMap<String, V>>, url: &str, value: V) {
    let mut entries = cache.borrow_mut();
    entries.clear();
    entries.insert(url.to_string(), value);
}

/// A 2D drawing surface. Coordinates are in the space set by the last
/// [`Painter::set_transform`].
pub trait Painter {
    /// Replace the current transform.
    ///
    /// # Errors
    ///
    /// Every painter method fails with [`RenderError::Surface`] when the
    /// underlying surface rejects the call.
    fn set_transform(&mut self, matrix: &Affine) -> Result<(), RenderError>;
    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError>;
    fn fill_rect(&mut self, rect: Bounds, color: &str) -> Result<(), RenderError>;
    /// Draw a loaded image with its top-left at the origin.
    fn draw_image(&mut self, url: &str, width: f64, height: f64) -> Result<(), RenderError>;
    /// Closed, filled and stroked path.
    fn draw_polygon(&mut self, points: &[Point], style: &Style) -> Result<(), RenderError>;
    fn draw_circle(&mut self, center: Point, radius: f64, style: &Style) -> Result<(), RenderError>;
    fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str) -> Result<(), RenderError>;
    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64, RenderError>;
}

/// Draw the full board: background image, shapes in z-order, then visible
/// vertex handles.
///
/// # Errors
///
/// Returns the first [`RenderError`] raised by the painter.
pub fn draw_scene(
    painter: &mut dyn Painter,
    viewport: &Viewport,
    image: Option<&ImageAnchor>,
    scene: &Scene,
) -> Result<(), RenderError> {
    // Layer 1: clear in device space.
    painter.set_transform(&Affine::IDENTITY)?;
    painter.clear(viewport.width, viewport.height)?;

    let view = viewport.matrix();

    // Layer 2: background image in its own frame.
    if let Some(anchor) = image {
        painter.set_transform(&view.then_after(&anchor.matrix()))?;
        painter.draw_image(&anchor.url, anchor.width, anchor.height)?;
    }

    // Layer 3: shapes, bottom first.
    painter.set_transform(&view)?;
    for shape in scene.sorted_shapes() {
        match &shape.geometry {
            Geometry::Rect(b) => {
                let corners = [
                    Point::new(b.left, b.top),
                    Point::new(b.right(), b.top),
                    Point::new(b.right(), b.bottom()),
                    Point::new(b.left, b.bottom()),
                ];
                painter.draw_polygon(&corners, &shape.style)?;
            }
            Geometry::Polygon(poly) => painter.draw_polygon(&poly.absolute_points(), &shape.style)?,
            Geometry::Point { center, radius } => painter.draw_circle(*center, *radius, &shape.style)?,
        }
    }

    // Layer 4: handles above everything.
    for vertex in scene.sorted_vertices().into_iter().filter(|v| v.visible) {
        painter.draw_circle(vertex.position, vertex.scaled_radius(), &vertex.style)?;
    }

    Ok(())
}

// =============================================================
// Canvas painter
// =============================================================

/// [`Painter`] over a browser 2D context.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
}

impl CanvasPainter {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d, images: ImageCache) -> Self {
        Self { ctx, images }
    }

    fn apply_style(&self, style: &Style) {
        self.ctx.set_fill_style_str(&style.fill);
        self.ctx.set_stroke_style_str(&style.stroke);
        self.ctx.set_line_width(style.stroke_width);
    }

    fn paint_path(&self, style: &Style) {
        self.apply_style(style);
        self.ctx.fill();
        if style.stroke_width > 0.0 {
            self.ctx.stroke();
        }
    }
}

fn surface(err: JsValue) -> RenderError {
    RenderError::Surface(format!("{err:?}"))
}

impl Painter for CanvasPainter {
    fn set_transform(&mut self, matrix: &Affine) -> Result<(), RenderError> {
        let [a, b, c, d, e, f] = matrix.0;
        self.ctx.set_transform(a, b, c, d, e, f).map_err(surface)
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Bounds, color: &str) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
        Ok(())
    }

    fn draw_image(&mut self, url: &str, width: f64, height: f64) -> Result<(), RenderError> {
        let images = self.images.borrow();
        let Some(img) = images.get(url) else {
            return Err(RenderError::Surface(format!("image not decoded: {url}")));
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height)
            .map_err(surface)
    }

    fn draw_polygon(&mut self, points: &[Point], style: &Style) -> Result<(), RenderError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.paint_path(style);
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64, style: &Style) -> Result<(), RenderError> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU).map_err(surface)?;
        self.paint_path(style);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str) -> Result<(), RenderError> {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_baseline("top");
        self.ctx.fill_text(text, at.x, at.y).map_err(surface)
    }

    fn measure_text(&mut self, text: &str, font: &str) -> Result<f64, RenderError> {
        self.ctx.set_font(font);
        Ok(self.ctx.measure_text(text).map_err(surface)?.width())
    }
}
