//! Scene model: shapes, their vertex handles, and the arena that owns both.
//!
//! Shapes and vertices live in one [`Scene`] keyed by stable ids. A shape
//! owns the ordered list of its vertex ids; a vertex stores its owning shape's
//! id and never the shape itself. Removing a shape removes its vertices first.
//!
//! Every entity carries a cached interaction box (`coords`) that hit-testing
//! reads. Anything that moves an entity must call [`Scene::refresh_coords`]
//! before the next hit test.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::VertexStyle;
use crate::geometry::{Bounds, Point};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Unique identifier for a vertex handle.
pub type VertexId = Uuid;

/// Either kind of entity in the scene. Used for hover state, hit results and
/// compensation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Shape(ShapeId),
    Vertex(VertexId),
}

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Point,
}

/// Polygon geometry: a center plus points relative to it.
///
/// `bbox` is derived from the absolute points; `center` is the bbox center.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGeometry {
    pub center: Point,
    pub points: Vec<Point>,
    pub bbox: Bounds,
}

impl PolygonGeometry {
    /// Normalize absolute points: bbox from all points, center at the bbox
    /// center, points re-expressed relative to it. `None` when empty.
    #[must_use]
    pub fn from_absolute(points: &[Point]) -> Option<Self> {
        let bbox = Bounds::from_points(points)?;
        let center = bbox.center();
        let points = points.iter().map(|&p| p - center).collect();
        Some(Self { center, points, bbox })
    }

    #[must_use]
    pub fn absolute_points(&self) -> Vec<Point> {
        self.points.iter().map(|&p| self.center + p).collect()
    }

    /// Shift the whole polygon without re-deriving anything.
    pub fn translate(&mut self, delta: Point) {
        self.center = self.center + delta;
        self.bbox.left += delta.x;
        self.bbox.top += delta.y;
    }
}

/// Shape geometry in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect(Bounds),
    Polygon(PolygonGeometry),
    Point { center: Point, radius: f64 },
}

impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Point { .. } => ShapeKind::Point,
        }
    }

    /// The position a shape drag moves: rectangle and polygon top-left, point center.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Rect(b) => Point::new(b.left, b.top),
            Self::Polygon(poly) => Point::new(poly.bbox.left, poly.bbox.top),
            Self::Point { center, .. } => *center,
        }
    }

    /// Vertex roles this geometry needs, in vertex order.
    #[must_use]
    pub fn vertex_roles(&self) -> Vec<VertexRole> {
        match self {
            Self::Rect(_) => VertexRole::CORNERS.to_vec(),
            Self::Polygon(poly) => (0..poly.points.len()).map(VertexRole::Polygon).collect(),
            Self::Point { .. } => vec![VertexRole::Point],
        }
    }

    /// Where the handle for `role` sits. `None` when the role does not
    /// belong to this geometry.
    #[must_use]
    pub fn vertex_position(&self, role: VertexRole) -> Option<Point> {
        match (self, role) {
            (Self::Rect(b), corner) => corner.corner_of(b),
            (Self::Polygon(poly), VertexRole::Polygon(i)) => poly.points.get(i).map(|&p| poly.center + p),
            (Self::Point { center, .. }, VertexRole::Point) => Some(*center),
            _ => None,
        }
    }

    /// Axis-aligned extent of the geometry, without stroke.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect(b) => *b,
            Self::Polygon(poly) => poly.bbox,
            Self::Point { center, radius } => Bounds::around(*center, *radius),
        }
    }
}

/// Paint style. `stroke_width` is the current, compensated width.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: Geometry,
    pub style: Style,
    /// Non-interactive shapes and their vertices are skipped by hit-testing.
    pub interactive: bool,
    /// Owned vertex handles, in corner / point-index order.
    pub vertices: Vec<VertexId>,
    pub z_index: u64,
    /// Cached interaction bounds.
    pub coords: Bounds,
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn refresh_coords(&mut self) {
        let b = self.geometry.bounds();
        let half = self.style.stroke_width / 2.0;
        self.coords = Bounds::new(b.left - half, b.top - half, b.width + half * 2.0, b.height + half * 2.0);
    }
}

/// Which corner or point a vertex handle stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VertexRole {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    /// Index into the owning polygon's point list.
    Polygon(usize),
    Point,
}

impl VertexRole {
    /// Rectangle roles in creation order, clockwise from top-left.
    pub const CORNERS: [VertexRole; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];

    /// Position of this role on a rectangle. `None` for non-corner roles.
    #[must_use]
    pub fn corner_of(self, b: &Bounds) -> Option<Point> {
        match self {
            Self::TopLeft => Some(Point::new(b.left, b.top)),
            Self::TopRight => Some(Point::new(b.right(), b.top)),
            Self::BottomRight => Some(Point::new(b.right(), b.bottom())),
            Self::BottomLeft => Some(Point::new(b.left, b.bottom())),
            Self::Polygon(_) | Self::Point => None,
        }
    }

    /// The diagonally opposite corner role.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
            other => other,
        }
    }

    /// Mirror left↔right.
    #[must_use]
    pub fn flip_horizontal(self) -> Self {
        match self {
            Self::TopLeft => Self::TopRight,
            Self::TopRight => Self::TopLeft,
            Self::BottomRight => Self::BottomLeft,
            Self::BottomLeft => Self::BottomRight,
            other => other,
        }
    }

    /// Mirror top↔bottom.
    #[must_use]
    pub fn flip_vertical(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomRight => Self::TopRight,
            Self::BottomLeft => Self::TopLeft,
            other => other,
        }
    }

    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    #[must_use]
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomRight | Self::BottomLeft)
    }
}

/// A draggable handle bound to one corner or point of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    /// Owning shape. Non-owning back-reference.
    pub shape_id: ShapeId,
    pub role: VertexRole,
    /// Absolute scene position of the handle center.
    pub position: Point,
    /// Unscaled radius; drawn at `radius * scale`.
    pub radius: f64,
    /// Compensation scale, `1 / zoom` once registered.
    pub scale: f64,
    pub style: Style,
    pub hovered: bool,
    pub visible: bool,
    pub z_index: u64,
    pub coords: Bounds,
}

impl Vertex {
    #[must_use]
    pub fn scaled_radius(&self) -> f64 {
        self.radius * self.scale
    }

    pub fn refresh_coords(&mut self) {
        self.coords = Bounds::around(self.position, self.scaled_radius() + self.style.stroke_width / 2.0);
    }
}

/// Arena of shapes and vertices, plus the z-order counter.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    vertices: HashMap<VertexId, Vertex>,
    /// Shape ids in insertion order.
    order: Vec<ShapeId>,
    next_z: u64,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stacking index. Strictly increasing for the life of the scene.
    pub fn next_z_index(&mut self) -> u64 {
        self.next_z += 1;
        self.next_z
    }

    /// Create a shape with one vertex per corner or point and insert it.
    ///
    /// The shape takes the next z-index and its vertices the ones after it.
    /// Vertices start hidden at unit scale.
    pub fn spawn(&mut self, geometry: Geometry, style: Style, interactive: bool, handle: &VertexStyle) -> ShapeId {
        let id = Uuid::new_v4();
        let z_index = self.next_z_index();
        let mut vertices = Vec::new();
        for role in geometry.vertex_roles() {
            let Some(position) = geometry.vertex_position(role) else {
                continue;
            };
            vertices.push(Vertex {
                id: Uuid::new_v4(),
                shape_id: id,
                role,
                position,
                radius: handle.radius,
                scale: 1.0,
                style: Style {
                    fill: handle.fill.clone(),
                    stroke: handle.stroke.clone(),
                    stroke_width: handle.stroke_width,
                },
                hovered: false,
                visible: false,
                z_index: self.next_z_index(),
                coords: Bounds::default(),
            });
        }
        let shape = Shape {
            id,
            geometry,
            style,
            interactive,
            vertices: vertices.iter().map(|v| v.id).collect(),
            z_index,
            coords: Bounds::default(),
        };
        self.insert(shape, vertices);
        id
    }

    /// Insert a shape with its vertices. Vertex ids must already be listed in
    /// `shape.vertices`. Coordinates are refreshed on the way in.
    pub fn insert(&mut self, mut shape: Shape, vertices: Vec<Vertex>) {
        shape.refresh_coords();
        for mut vertex in vertices {
            vertex.refresh_coords();
            self.vertices.insert(vertex.id, vertex);
        }
        self.order.push(shape.id);
        self.shapes.insert(shape.id, shape);
    }

    /// Remove a shape and every vertex it owns, vertices first.
    pub fn remove(&mut self, id: &ShapeId) -> Option<(Shape, Vec<Vertex>)> {
        let vertex_ids = self.shapes.get(id)?.vertices.clone();
        let vertices = vertex_ids.iter().filter_map(|vid| self.vertices.remove(vid)).collect();
        self.order.retain(|sid| sid != id);
        let shape = self.shapes.remove(id)?;
        Some((shape, vertices))
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn shape_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    #[must_use]
    pub fn vertex(&self, id: &VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn vertex_mut(&mut self, id: &VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Shape(id) => self.shapes.contains_key(&id),
            EntityRef::Vertex(id) => self.vertices.contains_key(&id),
        }
    }

    /// Owner of an entity: the shape itself, or the vertex's shape.
    #[must_use]
    pub fn owner_of(&self, entity: EntityRef) -> Option<ShapeId> {
        match entity {
            EntityRef::Shape(id) => self.shapes.contains_key(&id).then_some(id),
            EntityRef::Vertex(id) => self.vertices.get(&id).map(|v| v.shape_id),
        }
    }

    /// Shape ids in insertion order.
    #[must_use]
    pub fn shape_ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Vertices of a shape, in the shape's vertex order.
    #[must_use]
    pub fn vertices_of(&self, id: &ShapeId) -> Vec<&Vertex> {
        self.shapes
            .get(id)
            .map(|shape| shape.vertices.iter().filter_map(|vid| self.vertices.get(vid)).collect())
            .unwrap_or_default()
    }

    /// All shapes sorted by z-index (bottom first).
    #[must_use]
    pub fn sorted_shapes(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().collect();
        shapes.sort_by_key(|s| s.z_index);
        shapes
    }

    /// All vertices sorted by z-index (bottom first).
    #[must_use]
    pub fn sorted_vertices(&self) -> Vec<&Vertex> {
        let mut vertices: Vec<&Vertex> = self.vertices.values().collect();
        vertices.sort_by_key(|v| v.z_index);
        vertices
    }

    /// Bring a shape's vertices above everything else.
    pub fn raise_vertices(&mut self, id: &ShapeId) {
        let Some(vertex_ids) = self.shapes.get(id).map(|s| s.vertices.clone()) else {
            return;
        };
        for vid in vertex_ids {
            self.next_z += 1;
            if let Some(vertex) = self.vertices.get_mut(&vid) {
                vertex.z_index = self.next_z;
            }
        }
    }

    /// Refresh the cached interaction bounds of a shape and all its vertices.
    pub fn refresh_coords(&mut self, id: &ShapeId) {
        let Some(shape) = self.shapes.get_mut(id) else {
            return;
        };
        shape.refresh_coords();
        for vid in &shape.vertices {
            if let Some(vertex) = self.vertices.get_mut(vid) {
                vertex.refresh_coords();
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
