//! Shape manager: creation, removal, grid, interactivity, hover, selection
//! and drag dispatch.
//!
//! The manager owns the [`Scene`] arena together with everything that hangs
//! off it: the [`ScalingRegistry`], the per-shape side-table of compensation
//! handles, the [`HoverTracker`] and the current selection. Every creator
//! quantizes its input, spawns the shape with its vertices, and registers
//! stroke-only compensation for the shape and full compensation for each
//! vertex at the zoom passed in. Removal disposes those handles before the
//! shape leaves the arena.
//!
//! Event emission is left to the caller; methods return the ids they touched.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::config::{BoardConfig, ShapeDefaults, VertexStyle};
use crate::consts::{
    DEFAULT_POINT_POSITION, DEFAULT_POINT_RADIUS, DEFAULT_POLYGON_CENTER, DEFAULT_POLYGON_POINTS,
    DEFAULT_POLYGON_RADIUS, DEFAULT_RECT_LEFT, DEFAULT_RECT_SIZE, DEFAULT_RECT_TOP, POLYGON_ANGLE_JITTER,
    POLYGON_RADIUS_MIN_RATIO,
};
use crate::error::{ConfigError, ShapeError};
use crate::geometry::{Bounds, Point};
use crate::hover::{HoverTracker, HoverTransition};
use crate::input::{DragState, Modifiers};
use crate::scaling::{CompensationHandle, CompensationMode, ScalingRegistry};
use crate::scene::{EntityRef, Geometry, PolygonGeometry, Scene, Shape, ShapeId, ShapeKind, Style, VertexId};
use crate::sync::{self, Grid};

// =============================================================
// Options
// =============================================================

/// Per-shape style overrides. Unset fields take the board defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl StyleOptions {
    fn resolve(&self, defaults: &ShapeDefaults) -> Style {
        Style {
            fill: self.fill.clone().unwrap_or_else(|| defaults.fill.clone()),
            stroke: self.stroke.clone().unwrap_or_else(|| defaults.stroke.clone()),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleOptions {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub style: StyleOptions,
    pub interactive: bool,
}

impl Default for RectangleOptions {
    fn default() -> Self {
        Self {
            left: DEFAULT_RECT_LEFT,
            top: DEFAULT_RECT_TOP,
            width: DEFAULT_RECT_SIZE,
            height: DEFAULT_RECT_SIZE,
            style: StyleOptions::default(),
            interactive: true,
        }
    }
}

/// Polygon creation options.
///
/// With `points` set the polygon uses them as absolute scene positions.
/// Otherwise an irregular polygon of `point_count` vertices is generated
/// around `center`, each at a jittered angle and a radius between
/// `0.6 · radius` and `radius`. `seed` makes the generation reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonOptions {
    pub points: Option<Vec<Point>>,
    pub center: Point,
    pub radius: f64,
    pub point_count: usize,
    pub seed: Option<u64>,
    pub style: StyleOptions,
    pub interactive: bool,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            points: None,
            center: Point::new(DEFAULT_POLYGON_CENTER, DEFAULT_POLYGON_CENTER),
            radius: DEFAULT_POLYGON_RADIUS,
            point_count: DEFAULT_POLYGON_POINTS,
            seed: None,
            style: StyleOptions::default(),
            interactive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointOptions {
    pub center: Point,
    pub radius: f64,
    pub style: StyleOptions,
    pub interactive: bool,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            center: Point::new(DEFAULT_POINT_POSITION, DEFAULT_POINT_POSITION),
            radius: DEFAULT_POINT_RADIUS,
            style: StyleOptions::default(),
            interactive: true,
        }
    }
}

// =============================================================
// ShapeManager
// =============================================================

#[derive(Debug)]
pub struct ShapeManager {
    scene: Scene,
    scaling: ScalingRegistry,
    /// Compensation handles per shape: the shape's own first, then one per vertex.
    compensation: HashMap<ShapeId, Vec<CompensationHandle>>,
    hover: HoverTracker,
    selected: Option<ShapeId>,
    grid: Grid,
    defaults: ShapeDefaults,
    vertex_style: VertexStyle,
    rng: SmallRng,
}

impl ShapeManager {
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        let grid = Grid::new(config.coordinate_grid).unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to the default coordinate grid");
            Grid::default()
        });
        Self {
            scene: Scene::new(),
            scaling: ScalingRegistry::new(),
            compensation: HashMap::new(),
            hover: HoverTracker::new(),
            selected: None,
            grid,
            defaults: config.shapes.clone(),
            vertex_style: config.vertex.clone(),
            rng: SmallRng::seed_from_u64(Uuid::new_v4().as_u64_pair().0),
        }
    }

    // --- Creation ---

    pub fn add_rectangle(&mut self, options: &RectangleOptions, zoom: f64) -> ShapeId {
        let origin = self.grid.snap_point(Point::new(options.left, options.top));
        let far = self.grid.snap_point(Point::new(options.left + options.width, options.top + options.height));
        let bounds = Bounds::from_points(&[origin, far]).unwrap_or_default();
        let style = options.style.resolve(&self.defaults);
        self.spawn(Geometry::Rect(bounds), style, options.interactive, zoom)
    }

    /// Create a rectangle from its four corner points, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::CornerCount`] unless exactly four points are given.
    pub fn add_rectangle_from_corners(
        &mut self,
        corners: &[Point],
        style: &StyleOptions,
        zoom: f64,
    ) -> Result<ShapeId, ShapeError> {
        if corners.len() != 4 {
            return Err(ShapeError::CornerCount(corners.len()));
        }
        let snapped: Vec<Point> = corners.iter().map(|&p| self.grid.snap_point(p)).collect();
        let bounds = Bounds::from_points(&snapped).ok_or(ShapeError::CornerCount(0))?;
        let style = style.resolve(&self.defaults);
        Ok(self.spawn(Geometry::Rect(bounds), style, true, zoom))
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyPolygon`] when there are no points to build from.
    pub fn add_polygon(&mut self, options: &PolygonOptions, zoom: f64) -> Result<ShapeId, ShapeError> {
        let absolute = match &options.points {
            Some(points) => points.clone(),
            None => match options.seed {
                Some(seed) => irregular_polygon(&mut SmallRng::seed_from_u64(seed), options),
                None => irregular_polygon(&mut self.rng, options),
            },
        };
        let snapped: Vec<Point> = absolute.iter().map(|&p| self.grid.snap_point(p)).collect();
        let poly = PolygonGeometry::from_absolute(&snapped).ok_or(ShapeError::EmptyPolygon)?;
        let style = options.style.resolve(&self.defaults);
        Ok(self.spawn(Geometry::Polygon(poly), style, options.interactive, zoom))
    }

    pub fn add_point(&mut self, options: &PointOptions, zoom: f64) -> ShapeId {
        let center = self.grid.snap_point(options.center);
        let style = options.style.resolve(&self.defaults);
        self.spawn(Geometry::Point { center, radius: options.radius }, style, options.interactive, zoom)
    }

    fn spawn(&mut self, geometry: Geometry, style: Style, interactive: bool, zoom: f64) -> ShapeId {
        let kind = geometry.kind();
        let id = self.scene.spawn(geometry, style, interactive, &self.vertex_style);
        let mut handles =
            vec![self.scaling.register(&mut self.scene, EntityRef::Shape(id), CompensationMode::StrokeOnly, zoom)];
        let vertex_ids = self.scene.shape(&id).map(|s| s.vertices.clone()).unwrap_or_default();
        for vid in vertex_ids {
            handles.push(self.scaling.register(&mut self.scene, EntityRef::Vertex(vid), CompensationMode::Full, zoom));
        }
        self.compensation.insert(id, handles);
        tracing::debug!(shape = %id, ?kind, "shape added");
        id
    }

    // --- Removal ---

    /// Dispose the shape's compensation, forget its hover and selection
    /// state, then remove its vertices and the shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotFound`] for an unknown id.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<(), ShapeError> {
        if !self.scene.contains(EntityRef::Shape(*id)) {
            return Err(ShapeError::NotFound(*id));
        }
        for handle in self.compensation.remove(id).unwrap_or_default() {
            self.scaling.dispose(handle);
        }
        let vertex_ids = self.scene.shape(id).map(|s| s.vertices.clone()).unwrap_or_default();
        self.hover.forget(id, &vertex_ids);
        if self.selected == Some(*id) {
            self.selected = None;
        }
        self.scene.remove(id);
        tracing::debug!(shape = %id, "shape removed");
        Ok(())
    }

    /// Remove every shape. Returns the removed ids in creation order.
    pub fn remove_all_shapes(&mut self) -> Vec<ShapeId> {
        let ids = self.scene.shape_ids().to_vec();
        for id in &ids {
            if let Err(err) = self.remove_shape(id) {
                tracing::warn!(%err, "shape vanished during bulk removal");
            }
        }
        ids
    }

    // --- Grid ---

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] for a non-positive grid; the
    /// previous grid stays in effect.
    pub fn set_coordinate_grid(&mut self, step: f64) -> Result<(), ConfigError> {
        match Grid::new(step) {
            Ok(grid) => {
                self.grid = grid;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(grid = step, "rejecting coordinate grid");
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn coordinate_grid(&self) -> f64 {
        self.grid.step()
    }

    // --- Interactivity ---

    /// Turn hit-testing on or off for every shape. Turning it off drops
    /// selection and hover.
    pub fn set_all_interactivity(&mut self, interactive: bool) {
        let ids = self.scene.shape_ids().to_vec();
        for id in &ids {
            if let Some(shape) = self.scene.shape_mut(id) {
                shape.interactive = interactive;
            }
        }
        if !interactive {
            self.selected = None;
            for transition in self.hover.retarget(None) {
                if let HoverTransition::Out(EntityRef::Vertex(vid)) = transition {
                    self.paint_vertex_hover(vid, false);
                }
            }
        }
        for id in &ids {
            self.refresh_visibility(id);
        }
    }

    /// Flip interactivity based on [`ShapeManager::interactivity_state`].
    /// Returns the new state.
    pub fn toggle_all_interactivity(&mut self) -> bool {
        let next = !self.interactivity_state();
        self.set_all_interactivity(next);
        next
    }

    /// Interactivity of the first shape; `true` when there are none.
    #[must_use]
    pub fn interactivity_state(&self) -> bool {
        self.scene.shape_ids().first().and_then(|id| self.scene.shape(id)).is_none_or(|s| s.interactive)
    }

    // --- Selection ---

    /// Select a shape (or clear with `None`), raising its vertices above
    /// everything. Returns whether the selection changed.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        let id = id.filter(|id| self.scene.contains(EntityRef::Shape(*id)));
        if id == self.selected {
            return false;
        }
        let previous = std::mem::replace(&mut self.selected, id);
        if let Some(prev) = previous {
            self.refresh_visibility(&prev);
        }
        if let Some(id) = id {
            self.scene.raise_vertices(&id);
            self.refresh_visibility(&id);
        }
        true
    }

    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    // --- Hover ---

    /// Move hover to `target`. Vertices take their hover colors while hovered
    /// and every affected shape group re-evaluates vertex visibility.
    pub fn hover(&mut self, target: Option<EntityRef>) -> Vec<HoverTransition> {
        let transitions = self.hover.retarget(target);
        let mut owners: Vec<ShapeId> = Vec::new();
        for transition in &transitions {
            let (entity, over) = match *transition {
                HoverTransition::Over(e) => (e, true),
                HoverTransition::Out(e) => (e, false),
            };
            if let EntityRef::Vertex(vid) = entity {
                self.paint_vertex_hover(vid, over);
            }
            if let Some(owner) = self.scene.owner_of(entity) {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }
        for owner in &owners {
            self.refresh_visibility(owner);
        }
        transitions
    }

    #[must_use]
    pub fn is_hovered(&self, entity: EntityRef) -> bool {
        self.hover.is_hovered(entity)
    }

    fn paint_vertex_hover(&mut self, vid: VertexId, over: bool) {
        let style = &self.vertex_style;
        let Some(vertex) = self.scene.vertex_mut(&vid) else {
            return;
        };
        vertex.hovered = over;
        if over {
            vertex.style.fill.clone_from(&style.hover_fill);
            vertex.style.stroke.clone_from(&style.hover_stroke);
        } else {
            vertex.style.fill.clone_from(&style.fill);
            vertex.style.stroke.clone_from(&style.stroke);
        }
    }

    /// Vertices show while the group is hovered or the shape is selected.
    fn refresh_visibility(&mut self, id: &ShapeId) {
        let Some(shape) = self.scene.shape(id) else {
            return;
        };
        let visible =
            shape.interactive && (self.selected == Some(*id) || self.hover.group_hovered(&self.scene, id));
        for vid in shape.vertices.clone() {
            if let Some(vertex) = self.scene.vertex_mut(&vid) {
                vertex.visible = visible;
            }
        }
    }

    // --- Drag dispatch ---

    /// Start a gesture on `target`. Vertex drags reset their baseline to the
    /// handle's current position.
    #[must_use]
    pub fn begin_drag(&self, target: EntityRef, at: Point) -> DragState {
        match target {
            EntityRef::Shape(id) => match self.scene.shape(&id) {
                Some(shape) if shape.interactive => {
                    DragState::Shape { id, grab_offset: at - shape.geometry.position(), moved: false }
                }
                _ => DragState::Idle,
            },
            EntityRef::Vertex(vid) => match self.scene.vertex(&vid) {
                Some(vertex) if self.scene.shape(&vertex.shape_id).is_some_and(|s| s.interactive) => {
                    DragState::Vertex { id: vid, shape_id: vertex.shape_id, baseline: vertex.position }
                }
                _ => DragState::Idle,
            },
        }
    }

    /// One pointer-move tick of a gesture. Returns the shapes whose geometry
    /// changed and should be reported as modified now.
    pub fn drag_to(&mut self, state: &mut DragState, at: Point, modifiers: Modifiers) -> Vec<ShapeId> {
        match state {
            DragState::Idle => Vec::new(),
            DragState::Shape { id, grab_offset, moved } => {
                let before = self.scene.shape(id).map(|s| s.geometry.position());
                if sync::move_shape(&mut self.scene, id, at - *grab_offset, self.grid)
                    && before != self.scene.shape(id).map(|s| s.geometry.position())
                {
                    *moved = true;
                }
                Vec::new()
            }
            DragState::Vertex { id, shape_id, baseline } => {
                let Some(kind) = self.scene.shape(shape_id).map(Shape::kind) else {
                    return Vec::new();
                };
                match kind {
                    ShapeKind::Rectangle => {
                        sync::drag_rect_vertex(&mut self.scene, id, at, self.grid, self.defaults.min_rect_size)
                            .map(|_| vec![*shape_id])
                            .unwrap_or_default()
                    }
                    ShapeKind::Polygon => {
                        if sync::drag_polygon_vertex(&mut self.scene, id, at, self.grid) {
                            vec![*shape_id]
                        } else {
                            Vec::new()
                        }
                    }
                    ShapeKind::Point => {
                        sync::drag_point_vertex(&mut self.scene, id, at, self.grid, baseline, modifiers.move_all())
                    }
                }
            }
        }
    }

    /// Pointer-up. Returns the shape to report as modified, if a shape drag
    /// actually moved it.
    pub fn end_drag(&mut self, state: DragState) -> Option<ShapeId> {
        match state {
            DragState::Idle => None,
            DragState::Shape { id, moved, .. } => moved.then_some(id),
            DragState::Vertex { id, .. } => {
                sync::end_vertex_drag(&mut self.scene, &id);
                None
            }
        }
    }

    // --- Zoom ---

    /// Re-apply scaling compensation for a new zoom level.
    pub fn apply_zoom(&mut self, zoom: f64) {
        self.scaling.apply(&mut self.scene, zoom);
    }

    /// Live compensation registrations, leaked ones included.
    #[must_use]
    pub fn compensation_count(&self) -> usize {
        self.scaling.len()
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.scene.shape(id)
    }

    #[must_use]
    pub fn shape_ids(&self) -> &[ShapeId] {
        self.scene.shape_ids()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scene.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }
}

/// Irregular polygon around `options.center`: evenly spaced angles with
/// jitter, radii drawn from `[0.6, 1] · radius`.
fn irregular_polygon(rng: &mut SmallRng, options: &PolygonOptions) -> Vec<Point> {
    let n = options.point_count;
    let half_jitter = POLYGON_ANGLE_JITTER / 2.0;
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let base = TAU * i as f64 / n as f64;
            let angle = base + rng.random_range(-half_jitter..=half_jitter);
            let r = options.radius * rng.random_range(POLYGON_RADIUS_MIN_RATIO..=1.0);
            Point::new(options.center.x + r * angle.cos(), options.center.y + r * angle.sin())
        })
        .collect()
}
