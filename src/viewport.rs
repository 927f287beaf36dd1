#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geometry::{Affine, Point};

/// Viewport state: the single source of truth for screen↔scene mapping.
///
/// `pan_x` / `pan_y` are in CSS pixels, applied before the rotation.
/// `zoom` is a scale factor (1.0 = no zoom).
/// `rotation_deg` turns the whole view about the canvas center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub rotation_deg: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, pan_x: 0.0, pan_y: 0.0, zoom: 1.0, rotation_deg: 0.0 }
    }

    /// Canvas center in screen coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The full scene→screen matrix: `rotate_about(center) · scale(zoom) + pan`.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        let rotation = Affine::rotation_about(self.center(), self.rotation_deg);
        rotation.then_after(&Affine::scale_translate(self.zoom, self.pan_x, self.pan_y))
    }

    /// Convert a screen-space point (CSS pixels) to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        let unrotated = screen.rotate_around(self.center(), -self.rotation_deg);
        Point::new((unrotated.x - self.pan_x) / self.zoom, (unrotated.y - self.pan_y) / self.zoom)
    }

    /// Convert a scene-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        self.matrix().apply(scene)
    }

    /// Set the zoom level while keeping the scene point under `screen` fixed.
    /// Callers validate `level > 0`.
    pub fn zoom_to_point(&mut self, screen: Point, level: f64) {
        let anchor = self.screen_to_scene(screen);
        self.zoom = level;
        let drift = screen - self.scene_to_screen(anchor);
        self.pan_by_screen_delta(drift);
    }

    /// Pan by a screen-space delta in pixels.
    pub fn relative_pan(&mut self, dx: f64, dy: f64) {
        self.pan_by_screen_delta(Point::new(dx, dy));
    }

    /// Back to the identity transform: zoom 1, no pan, no rotation.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.rotation_deg = 0.0;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Pan is applied inside the rotation, so a screen delta is rotated back
    /// before it is added.
    fn pan_by_screen_delta(&mut self, delta: Point) {
        let unrotated = Affine::rotation_about(Point::default(), -self.rotation_deg).apply_vector(delta);
        self.pan_x += unrotated.x;
        self.pan_y += unrotated.y;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
