#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{SHAPE_HIT_TOLERANCE_PX, VERTEX_HIT_TOLERANCE_PX};
use crate::geometry::Point;
use crate::scene::{EntityRef, Geometry, Scene, Shape};

/// Test which entity (if any) is under `scene_pt`.
///
/// Visible vertex handles are checked first, topmost first, then shapes in
/// reverse z-order. Entities belonging to non-interactive shapes are never
/// hit. Tolerances are in screen pixels and shrink in scene units as `zoom`
/// grows.
#[must_use]
pub fn hit_test(scene: &Scene, scene_pt: Point, zoom: f64) -> Option<EntityRef> {
    let vertex_slop = VERTEX_HIT_TOLERANCE_PX / zoom;
    let shape_slop = SHAPE_HIT_TOLERANCE_PX / zoom;

    let vertex_hit = scene.sorted_vertices().into_iter().rev().find(|v| {
        v.visible
            && scene.shape(&v.shape_id).is_some_and(|s| s.interactive)
            && v.coords.contains(scene_pt, vertex_slop)
            && v.position.distance_to(scene_pt) <= v.coords.width / 2.0 + vertex_slop
    });
    if let Some(vertex) = vertex_hit {
        return Some(EntityRef::Vertex(vertex.id));
    }

    scene
        .sorted_shapes()
        .into_iter()
        .rev()
        .find(|s| s.interactive && s.coords.contains(scene_pt, shape_slop) && shape_contains(s, scene_pt, shape_slop))
        .map(|s| EntityRef::Shape(s.id))
}

/// Precise containment once the cached bounds have matched.
fn shape_contains(shape: &Shape, p: Point, slop: f64) -> bool {
    match &shape.geometry {
        // The cached box already is the rectangle plus stroke.
        Geometry::Rect(_) => true,
        Geometry::Polygon(poly) => {
            let points = poly.absolute_points();
            let edge_slop = slop + shape.style.stroke_width / 2.0;
            point_in_polygon(p, &points) || near_outline(p, &points, edge_slop)
        }
        Geometry::Point { center, radius } => {
            center.distance_to(p) <= radius + shape.style.stroke_width / 2.0 + slop
        }
    }
}

/// Even-odd ray casting.
#[must_use]
pub fn point_in_polygon(p: Point, points: &[Point]) -> bool {
    let mut inside = false;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + n - 1) % n];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
    }
    inside
}

/// Distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

fn near_outline(p: Point, points: &[Point], tolerance: f64) -> bool {
    let n = points.len();
    (0..n).any(|i| distance_to_segment(p, points[i], points[(i + 1) % n]) <= tolerance)
}
