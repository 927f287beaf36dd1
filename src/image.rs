//! Background image placement and the image-local coordinate space.
//!
//! An [`ImageAnchor`] records where the loaded image sits in scene space: its
//! center, rotation angle and per-axis scale. Image-local coordinates have
//! their origin at the image's top-left corner before any transform, in
//! natural pixels. The board owns at most one anchor; with none loaded the
//! scene↔image mapping is the identity.
//!
//! Fetching and decoding go through the [`ImageLoader`] seam so the board can
//! be driven by a browser loader in production and by a fake in tests.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::geometry::{Affine, Point};

/// A decoded image as reported by a loader. Dimensions are natural pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

/// Fetches and decodes an image. Resolves or fails exactly once per call.
#[async_trait(?Send)]
pub trait ImageLoader {
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] or [`LoadError::Decode`] when the image
    /// cannot be retrieved or has no usable pixels.
    async fn fetch(&self, url: &str) -> Result<LoadedImage, LoadError>;
}

/// Placement of the background image in scene space.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnchor {
    pub url: String,
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
    /// Scene-space center of the placed image.
    pub center: Point,
    /// Rotation in degrees, normalized to `[0, 360)`.
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ImageAnchor {
    /// Place `image` centered on a `canvas_w`×`canvas_h` canvas at `angle`,
    /// scaled to fit.
    #[must_use]
    pub fn fit(image: &LoadedImage, canvas_w: f64, canvas_h: f64, angle: f64) -> Self {
        let mut anchor = Self {
            url: image.url.clone(),
            width: image.width,
            height: image.height,
            center: Point::default(),
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        };
        anchor.refit(canvas_w, canvas_h, angle);
        anchor
    }

    /// Re-angle and re-center the image, recomputing the fit scale.
    ///
    /// At a quarter turn the image's width lies along the canvas height, so
    /// the two dimensions swap in the fit calculation.
    pub fn refit(&mut self, canvas_w: f64, canvas_h: f64, angle: f64) {
        let angle = normalize_angle(angle);
        let (w, h) = if is_quarter_turn(angle) { (self.height, self.width) } else { (self.width, self.height) };
        let scale = (canvas_w / w).min(canvas_h / h);
        self.angle = angle;
        self.scale_x = scale;
        self.scale_y = scale;
        self.center = Point::new(canvas_w / 2.0, canvas_h / 2.0);
    }

    /// Image-local → scene matrix: shift the image center to the origin,
    /// scale, rotate, then translate to `center`.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (a, b) = (cos * self.scale_x, sin * self.scale_x);
        let (c, d) = (-sin * self.scale_y, cos * self.scale_y);
        let (hx, hy) = (self.width / 2.0, self.height / 2.0);
        Affine([a, b, c, d, self.center.x - (a * hx + c * hy), self.center.y - (b * hx + d * hy)])
    }

    /// Inverse-rotate about the image center, undo the scale, and shift the
    /// origin to the image's unrotated top-left.
    #[must_use]
    pub fn scene_to_image(&self, scene: Point) -> Point {
        let unrotated = scene.rotate_around(self.center, -self.angle);
        Point::new(
            (unrotated.x - self.center.x) / self.scale_x + self.width / 2.0,
            (unrotated.y - self.center.y) / self.scale_y + self.height / 2.0,
        )
    }

    #[must_use]
    pub fn image_to_scene(&self, image: Point) -> Point {
        self.matrix().apply(image)
    }

    /// Scene-space corners, clockwise from the image's own top-left.
    #[must_use]
    pub fn scene_corners(&self) -> [Point; 4] {
        let m = self.matrix();
        [
            m.apply(Point::new(0.0, 0.0)),
            m.apply(Point::new(self.width, 0.0)),
            m.apply(Point::new(self.width, self.height)),
            m.apply(Point::new(0.0, self.height)),
        ]
    }
}

/// Map a scene point into image space; identity when no image is loaded.
#[must_use]
pub fn scene_to_image(anchor: Option<&ImageAnchor>, scene: Point) -> Point {
    anchor.map_or(scene, |a| a.scene_to_image(scene))
}

/// Map an image point into scene space; identity when no image is loaded.
#[must_use]
pub fn image_to_scene(anchor: Option<&ImageAnchor>, image: Point) -> Point {
    anchor.map_or(image, |a| a.image_to_scene(image))
}

/// Normalize any angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

fn is_quarter_turn(normalized: f64) -> bool {
    (normalized - 90.0).abs() < 1e-9 || (normalized - 270.0).abs() < 1e-9
}
