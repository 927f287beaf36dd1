//! Vertex/shape synchronization.
//!
//! Keeps a shape's geometry and its vertex handles consistent while either is
//! dragged. Every committed coordinate passes through the quantization
//! [`Grid`]. Within one tick the geometry is updated first, then dependent
//! vertex positions, then cached interaction bounds.
//!
//! Operations on unknown ids, on shapes of the wrong kind, or on shapes with
//! no vertices are no-ops that return `false` (or an empty result).

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use crate::config::is_positive;
use crate::error::ConfigError;
use crate::geometry::{Bounds, Point};
use crate::scene::{Geometry, PolygonGeometry, Scene, ShapeId, ShapeKind, VertexId, VertexRole};

/// Snap `value` to the nearest multiple of `grid`. Non-positive or non-finite
/// grids return the value unchanged.
#[must_use]
pub fn quantize(value: f64, grid: f64) -> f64 {
    if !is_positive(grid) {
        return value;
    }
    (value / grid).round() * grid
}

/// A validated quantization granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid(f64);

impl Grid {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] when `step` is not a positive,
    /// finite number.
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if is_positive(step) { Ok(Self(step)) } else { Err(ConfigError::InvalidGrid(step)) }
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn snap(self, value: f64) -> f64 {
        quantize(value, self.0)
    }

    #[must_use]
    pub fn snap_point(self, p: Point) -> Point {
        Point::new(self.snap(p.x), self.snap(p.y))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self(crate::consts::DEFAULT_COORDINATE_GRID)
    }
}

/// Which way a rectangle turned inside out during a corner drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    None,
    Horizontal,
    Vertical,
    Both,
}

/// Put every vertex of a shape where its role says it belongs, except
/// `keep`, then refresh interaction bounds.
pub fn layout_vertices(scene: &mut Scene, shape_id: &ShapeId, keep: Option<VertexId>) {
    let Some(shape) = scene.shape(shape_id) else {
        return;
    };
    let geometry = shape.geometry.clone();
    let vertex_ids = shape.vertices.clone();
    for vid in vertex_ids {
        if Some(vid) == keep {
            continue;
        }
        if let Some(vertex) = scene.vertex_mut(&vid) {
            if let Some(position) = geometry.vertex_position(vertex.role) {
                vertex.position = position;
            }
        }
    }
    scene.refresh_coords(shape_id);
}

/// Move a shape so its drag anchor (see [`Geometry::position`]) lands on the
/// quantized `to`, then carry every vertex along.
pub fn move_shape(scene: &mut Scene, shape_id: &ShapeId, to: Point, grid: Grid) -> bool {
    let to = grid.snap_point(to);
    let Some(shape) = scene.shape_mut(shape_id) else {
        return false;
    };
    let delta = to - shape.geometry.position();
    match &mut shape.geometry {
        Geometry::Rect(b) => {
            b.left = to.x;
            b.top = to.y;
        }
        Geometry::Polygon(poly) => poly.translate(delta),
        Geometry::Point { center, .. } => *center = to,
    }
    layout_vertices(scene, shape_id, None);
    tracing::debug!(%shape_id, x = to.x, y = to.y, "shape moved");
    true
}

/// Drag a rectangle corner to `cursor`, keeping the opposite corner fixed.
///
/// When the cursor crosses the fixed corner on an axis the rectangle is
/// normalized and every vertex role is mirrored on that axis. Width and
/// height never drop below `min_size`. The dragged vertex stays under the
/// cursor; [`end_vertex_drag`] snaps it onto its corner.
pub fn drag_rect_vertex(
    scene: &mut Scene,
    vertex_id: &VertexId,
    cursor: Point,
    grid: Grid,
    min_size: f64,
) -> Option<Flip> {
    let cursor = grid.snap_point(cursor);
    let vertex = scene.vertex(vertex_id)?;
    let (shape_id, role) = (vertex.shape_id, vertex.role);
    let shape = scene.shape(&shape_id)?;
    let Geometry::Rect(bounds) = shape.geometry else {
        return None;
    };
    let fixed = role.opposite().corner_of(&bounds)?;

    let (left, width, flip_x) = resolve_axis(fixed.x, cursor.x, role.is_right(), min_size);
    let (top, height, flip_y) = resolve_axis(fixed.y, cursor.y, role.is_bottom(), min_size);
    let flip = match (flip_x, flip_y) {
        (false, false) => Flip::None,
        (true, false) => Flip::Horizontal,
        (false, true) => Flip::Vertical,
        (true, true) => Flip::Both,
    };

    let vertex_ids = shape.vertices.clone();
    if let Some(shape) = scene.shape_mut(&shape_id) {
        shape.geometry = Geometry::Rect(Bounds::new(left, top, width, height));
    }
    if flip != Flip::None {
        for vid in &vertex_ids {
            if let Some(v) = scene.vertex_mut(vid) {
                v.role = match flip {
                    Flip::Horizontal => v.role.flip_horizontal(),
                    Flip::Vertical => v.role.flip_vertical(),
                    Flip::Both => v.role.opposite(),
                    Flip::None => v.role,
                };
            }
        }
        tracing::debug!(%shape_id, ?flip, "rectangle flipped");
    }
    if let Some(v) = scene.vertex_mut(vertex_id) {
        v.position = cursor;
    }
    layout_vertices(scene, &shape_id, Some(*vertex_id));
    Some(flip)
}

/// One axis of a corner drag. `at_end` says whether the dragged corner is
/// on the far (right/bottom) side. Returns `(start, length, flipped)`.
fn resolve_axis(fixed: f64, cursor: f64, at_end: bool, min_size: f64) -> (f64, f64, bool) {
    let delta = cursor - fixed;
    let now_at_end = if delta > 0.0 {
        true
    } else if delta < 0.0 {
        false
    } else {
        at_end
    };
    let length = delta.abs().max(min_size);
    let start = if now_at_end { fixed } else { fixed - length };
    (start, length, now_at_end != at_end)
}

/// Drag one polygon vertex to `cursor`.
///
/// The vertex's quantized absolute position is stored first; the bbox,
/// center and relative point list are then re-derived from every vertex's
/// absolute position. Other handles do not move.
pub fn drag_polygon_vertex(scene: &mut Scene, vertex_id: &VertexId, cursor: Point, grid: Grid) -> bool {
    let cursor = grid.snap_point(cursor);
    let Some(vertex) = scene.vertex_mut(vertex_id) else {
        return false;
    };
    if !matches!(vertex.role, VertexRole::Polygon(_)) {
        return false;
    }
    vertex.position = cursor;
    let shape_id = vertex.shape_id;
    let absolute: Vec<Point> = scene.vertices_of(&shape_id).iter().map(|v| v.position).collect();
    let Some(poly) = PolygonGeometry::from_absolute(&absolute) else {
        return false;
    };
    let Some(shape) = scene.shape_mut(&shape_id) else {
        return false;
    };
    if shape.kind() != ShapeKind::Polygon || shape.vertices.len() != poly.points.len() {
        return false;
    }
    shape.geometry = Geometry::Polygon(poly);
    layout_vertices(scene, &shape_id, Some(*vertex_id));
    true
}

/// Drag a point shape's single vertex to `cursor`.
///
/// `baseline` is the position at the previous tick (set on pointer-down) and
/// is advanced to the new position. With `move_all`, every other point shape
/// is translated by the same delta. Returns every shape that moved.
pub fn drag_point_vertex(
    scene: &mut Scene,
    vertex_id: &VertexId,
    cursor: Point,
    grid: Grid,
    baseline: &mut Point,
    move_all: bool,
) -> Vec<ShapeId> {
    let cursor = grid.snap_point(cursor);
    let Some(vertex) = scene.vertex(vertex_id) else {
        return Vec::new();
    };
    if vertex.role != VertexRole::Point {
        return Vec::new();
    }
    let shape_id = vertex.shape_id;
    let delta = cursor - *baseline;
    *baseline = cursor;
    if !move_shape(scene, &shape_id, cursor, grid) {
        return Vec::new();
    }

    let mut moved = vec![shape_id];
    if move_all && delta != Point::default() {
        let others: Vec<(ShapeId, Point)> = scene
            .shape_ids()
            .iter()
            .filter(|id| **id != shape_id)
            .filter_map(|id| scene.shape(id))
            .filter(|s| s.kind() == ShapeKind::Point)
            .map(|s| (s.id, s.geometry.position()))
            .collect();
        for (id, position) in others {
            if move_shape(scene, &id, position + delta, grid) {
                moved.push(id);
            }
        }
    }
    moved
}

/// Pointer-up after a vertex drag: snap the dragged handle onto the spot its
/// role dictates. Only rectangles can leave a handle off its corner.
pub fn end_vertex_drag(scene: &mut Scene, vertex_id: &VertexId) {
    if let Some(shape_id) = scene.vertex(vertex_id).map(|v| v.shape_id) {
        layout_vertices(scene, &shape_id, None);
    }
}
