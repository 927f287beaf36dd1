//! Plane geometry shared by every coordinate space: points, axis-aligned
//! bounds, and the 2×3 affine matrix used for the viewport transform.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in screen, scene, or image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this point around `center` by `degrees` (clockwise in screen space).
    #[must_use]
    pub fn rotate_around(self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point { x: center.x + dx * cos - dy * sin, y: center.y + dx * sin + dy * cos }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned box, `left`/`top` at the minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self { left: min_x, top: min_y, width: max_x - min_x, height: max_y - min_y })
    }

    /// Box centered on `center` with the given half-extent on both axes.
    #[must_use]
    pub fn around(center: Point, half: f64) -> Self {
        Self { left: center.x - half, top: center.y - half, width: half * 2.0, height: half * 2.0 }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Inclusive containment test, grown by `tolerance` on every side.
    #[must_use]
    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.left - tolerance
            && p.x <= self.right() + tolerance
            && p.y >= self.top - tolerance
            && p.y <= self.bottom() + tolerance
    }
}

/// 2D affine matrix `[a, b, c, d, e, f]` mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(pub [f64; 6]);

impl Affine {
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Uniform scale followed by a translation.
    #[must_use]
    pub fn scale_translate(scale: f64, tx: f64, ty: f64) -> Self {
        Affine([scale, 0.0, 0.0, scale, tx, ty])
    }

    /// Rotation by `degrees` about `center`: translate to center, rotate,
    /// translate back.
    #[must_use]
    pub fn rotation_about(center: Point, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Affine([
            cos,
            sin,
            -sin,
            cos,
            center.x - center.x * cos + center.y * sin,
            center.y - center.x * sin - center.y * cos,
        ])
    }

    /// `self · other`: applies `other` first, then `self`.
    #[must_use]
    pub fn then_after(&self, other: &Affine) -> Affine {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Affine([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Apply only the linear part (no translation), for direction vectors.
    #[must_use]
    pub fn apply_vector(&self, v: Point) -> Point {
        let [a, b, c, d, _, _] = self.0;
        Point::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}
