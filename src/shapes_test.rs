#![allow(clippy::float_cmp)]

use super::*;
use crate::scene::VertexRole;

fn manager() -> ShapeManager {
    ShapeManager::new(&BoardConfig::default())
}

fn vertex_ids(mgr: &ShapeManager, id: &ShapeId) -> Vec<VertexId> {
    mgr.shape(id).unwrap().vertices.clone()
}

fn bounds_of(mgr: &ShapeManager, id: &ShapeId) -> Bounds {
    mgr.shape(id).unwrap().geometry.bounds()
}

// =============================================================
// Creation
// =============================================================

#[test]
fn rectangle_defaults() {
    let mut mgr = manager();
    let id = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    let shape = mgr.shape(&id).unwrap();
    assert_eq!(shape.geometry, Geometry::Rect(Bounds::new(50.0, 50.0, 100.0, 100.0)));
    assert_eq!(shape.style.fill, "rgba(255, 0, 0, 0.5)");
    assert_eq!(shape.style.stroke, "red");
    assert_eq!(shape.vertices.len(), 4);
    assert!(shape.interactive);
}

#[test]
fn rectangle_input_is_quantized() {
    let mut mgr = manager();
    let opts = RectangleOptions { left: 10.4, top: 19.6, width: 30.2, height: 40.0, ..Default::default() };
    let id = mgr.add_rectangle(&opts, 1.0);
    assert_eq!(bounds_of(&mgr, &id), Bounds::new(10.0, 20.0, 31.0, 40.0));
}

#[test]
fn style_overrides_apply() {
    let mut mgr = manager();
    let style = StyleOptions { fill: Some("blue".into()), stroke_width: Some(4.0), ..Default::default() };
    let id = mgr.add_rectangle(&RectangleOptions { style, ..Default::default() }, 1.0);
    let shape = mgr.shape(&id).unwrap();
    assert_eq!(shape.style.fill, "blue");
    assert_eq!(shape.style.stroke, "red");
    assert_eq!(shape.style.stroke_width, 4.0);
}

#[test]
fn rectangle_from_corners_requires_four() {
    let mut mgr = manager();
    let err = mgr
        .add_rectangle_from_corners(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &StyleOptions::default(), 1.0)
        .unwrap_err();
    assert!(matches!(err, ShapeError::CornerCount(2)));
    assert!(mgr.is_empty());
}

#[test]
fn rectangle_from_corners_any_order() {
    let mut mgr = manager();
    let corners = [Point::new(100.0, 100.0), Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 100.0)];
    let id = mgr.add_rectangle_from_corners(&corners, &StyleOptions::default(), 1.0).unwrap();
    assert_eq!(bounds_of(&mgr, &id), Bounds::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn polygon_from_explicit_points() {
    let mut mgr = manager();
    let points = vec![Point::new(0.2, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.4)];
    let id = mgr.add_polygon(&PolygonOptions { points: Some(points), ..Default::default() }, 1.0).unwrap();
    let absolute: Vec<Point> = mgr.scene().vertices_of(&id).iter().map(|v| v.position).collect();
    assert_eq!(absolute, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)]);
}

#[test]
fn polygon_without_points_is_rejected() {
    let mut mgr = manager();
    let err = mgr.add_polygon(&PolygonOptions { points: Some(Vec::new()), ..Default::default() }, 1.0).unwrap_err();
    assert!(matches!(err, ShapeError::EmptyPolygon));
    let err = mgr.add_polygon(&PolygonOptions { point_count: 0, ..Default::default() }, 1.0).unwrap_err();
    assert!(matches!(err, ShapeError::EmptyPolygon));
}

#[test]
fn generated_polygon_stays_within_radius() {
    let mut mgr = manager();
    let id = mgr.add_polygon(&PolygonOptions::default(), 1.0).unwrap();
    let vertices = mgr.scene().vertices_of(&id);
    assert_eq!(vertices.len(), 10);
    let center = Point::new(200.0, 200.0);
    // Radius 80, plus quantization slop.
    assert!(vertices.iter().all(|v| v.position.distance_to(center) <= 81.0));
    assert!(vertices.iter().all(|v| v.position.distance_to(center) >= 47.0));
}

#[test]
fn seeded_polygon_is_reproducible() {
    let opts = PolygonOptions { seed: Some(7), point_count: 6, ..Default::default() };
    let mut a = manager();
    let mut b = manager();
    let ia = a.add_polygon(&opts, 1.0).unwrap();
    let ib = b.add_polygon(&opts, 1.0).unwrap();
    assert_eq!(a.shape(&ia).unwrap().geometry, b.shape(&ib).unwrap().geometry);
}

#[test]
fn point_defaults() {
    let mut mgr = manager();
    let id = mgr.add_point(&PointOptions::default(), 1.0);
    let shape = mgr.shape(&id).unwrap();
    assert_eq!(shape.geometry, Geometry::Point { center: Point::new(100.0, 100.0), radius: 5.0 });
    assert_eq!(shape.vertices.len(), 1);
}

// =============================================================
// Compensation
// =============================================================

#[test]
fn compensation_applies_at_creation() {
    let mut mgr = manager();
    let id = mgr.add_rectangle(&RectangleOptions::default(), 2.0);
    assert_eq!(mgr.shape(&id).unwrap().style.stroke_width, 1.0);
    for v in mgr.scene().vertices_of(&id) {
        assert_eq!(v.scale, 0.5);
        assert_eq!(v.style.stroke_width, 1.0);
    }
    assert_eq!(mgr.compensation_count(), 5);
}

#[test]
fn compensation_follows_zoom() {
    let mut mgr = manager();
    let id = mgr.add_point(&PointOptions::default(), 1.0);
    mgr.apply_zoom(4.0);
    assert_eq!(mgr.shape(&id).unwrap().style.stroke_width, 0.5);
    assert_eq!(mgr.scene().vertices_of(&id)[0].scale, 0.25);
}

#[test]
fn removal_disposes_every_handle() {
    let mut mgr = manager();
    let rect = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    let point = mgr.add_point(&PointOptions::default(), 1.0);
    assert_eq!(mgr.compensation_count(), 7);
    mgr.remove_shape(&rect).unwrap();
    assert_eq!(mgr.compensation_count(), 2);
    assert_eq!(mgr.scene().vertex_count(), 1);
    mgr.remove_shape(&point).unwrap();
    assert_eq!(mgr.compensation_count(), 0);
}

#[test]
fn removing_without_disposal_leaks() {
    let mut mgr = manager();
    let id = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    mgr.scene.remove(&id);
    mgr.apply_zoom(2.0);
    assert_eq!(mgr.compensation_count(), 5);
}

#[test]
fn remove_unknown_shape_is_not_found() {
    let mut mgr = manager();
    let id = Uuid::new_v4();
    assert!(matches!(mgr.remove_shape(&id), Err(ShapeError::NotFound(missing)) if missing == id));
}

#[test]
fn remove_all_returns_ids_in_creation_order() {
    let mut mgr = manager();
    let a = mgr.add_point(&PointOptions::default(), 1.0);
    let b = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    assert_eq!(mgr.remove_all_shapes(), vec![a, b]);
    assert!(mgr.is_empty());
    assert_eq!(mgr.compensation_count(), 0);
}

// =============================================================
// Grid and interactivity
// =============================================================

#[test]
fn invalid_grid_keeps_previous() {
    let mut mgr = manager();
    mgr.set_coordinate_grid(5.0).unwrap();
    assert!(matches!(mgr.set_coordinate_grid(0.0), Err(ConfigError::InvalidGrid(_))));
    assert!(mgr.set_coordinate_grid(-2.0).is_err());
    assert_eq!(mgr.coordinate_grid(), 5.0);
}

#[test]
fn interactivity_state_follows_first_shape() {
    let mut mgr = manager();
    assert!(mgr.interactivity_state());
    let opts = PointOptions { interactive: false, ..Default::default() };
    mgr.add_point(&opts, 1.0);
    mgr.add_point(&PointOptions::default(), 1.0);
    assert!(!mgr.interactivity_state());
    assert!(mgr.toggle_all_interactivity());
    assert!(mgr.shape_ids().iter().all(|id| mgr.shape(id).unwrap().interactive));
    assert!(!mgr.toggle_all_interactivity());
}

#[test]
fn disabling_interactivity_drops_selection() {
    let mut mgr = manager();
    let id = mgr.add_point(&PointOptions::default(), 1.0);
    mgr.select(Some(id));
    mgr.set_all_interactivity(false);
    assert_eq!(mgr.selected(), None);
    assert!(mgr.scene().vertices_of(&id).iter().all(|v| !v.visible));
}

// =============================================================
// Hover and selection
// =============================================================

#[test]
fn hovering_group_shows_vertices() {
    let mut mgr = manager();
    let id = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    let vid = vertex_ids(&mgr, &id)[0];

    mgr.hover(Some(EntityRef::Shape(id)));
    assert!(mgr.scene().vertices_of(&id).iter().all(|v| v.visible));

    let transitions = mgr.hover(Some(EntityRef::Vertex(vid)));
    assert_eq!(
        transitions,
        vec![HoverTransition::Out(EntityRef::Shape(id)), HoverTransition::Over(EntityRef::Vertex(vid))]
    );
    assert!(mgr.scene().vertices_of(&id).iter().all(|v| v.visible));
    let vertex = mgr.scene().vertex(&vid).unwrap();
    assert!(vertex.hovered);
    assert_eq!(vertex.style.fill, "orange");
    assert_eq!(vertex.style.stroke, "darkorange");

    mgr.hover(None);
    let vertex = mgr.scene().vertex(&vid).unwrap();
    assert!(!vertex.visible);
    assert_eq!(vertex.style.fill, "red");
    assert_eq!(vertex.style.stroke, "darkred");
}

#[test]
fn selection_keeps_vertices_visible_and_raised() {
    let mut mgr = manager();
    let a = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    let b = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    assert!(mgr.select(Some(a)));
    assert!(!mgr.select(Some(a)));

    let top_of_b = mgr.scene().vertices_of(&b).iter().map(|v| v.z_index).max().unwrap();
    assert!(mgr.scene().vertices_of(&a).iter().all(|v| v.visible && v.z_index > top_of_b));

    assert!(mgr.select(None));
    assert!(mgr.scene().vertices_of(&a).iter().all(|v| !v.visible));
}

#[test]
fn selecting_unknown_shape_clears() {
    let mut mgr = manager();
    let id = mgr.add_point(&PointOptions::default(), 1.0);
    mgr.select(Some(id));
    mgr.select(Some(Uuid::new_v4()));
    assert_eq!(mgr.selected(), None);
}

// =============================================================
// Drag dispatch
// =============================================================

#[test]
fn shape_drag_reports_on_release_only_when_moved() {
    let mut mgr = manager();
    let id = mgr.add_rectangle(&RectangleOptions::default(), 1.0);
    let mut state = mgr.begin_drag(EntityRef::Shape(id), Point::new(60.0, 60.0));
    assert!(mgr.drag_to(&mut state, Point::new(70.0, 65.0), Modifiers::NONE).is_empty());
    assert_eq!(bounds_of(&mgr, &id), Bounds::new(60.0, 55.0, 100.0, 100.0));
    assert_eq!(mgr.end_drag(state), Some(id));

    let still = mgr.begin_drag(EntityRef::Shape(id), Point::new(60.0, 60.0));
    assert_eq!(mgr.end_drag(still), None);
}

#[test]
fn rectangle_corner_drag_through_opposite_corner() {
    let mut mgr = manager();
    let corners = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)];
    let id = mgr.add_rectangle_from_corners(&corners, &StyleOptions::default(), 1.0).unwrap();
    let br = vertex_ids(&mgr, &id)[2];

    let mut state = mgr.begin_drag(EntityRef::Vertex(br), Point::new(100.0, 100.0));
    assert_eq!(mgr.drag_to(&mut state, Point::new(-10.0, -10.0), Modifiers::NONE), vec![id]);
    mgr.end_drag(state);

    assert_eq!(bounds_of(&mgr, &id), Bounds::new(-10.0, -10.0, 10.0, 10.0));
    let dragged = mgr.scene().vertex(&br).unwrap();
    assert_eq!(dragged.role, VertexRole::TopLeft);
    assert_eq!(dragged.position, Point::new(-10.0, -10.0));
}

#[test]
fn polygon_vertex_drag_rederives_bbox() {
    let mut mgr = manager();
    let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)];
    let id = mgr.add_polygon(&PolygonOptions { points: Some(points), ..Default::default() }, 1.0).unwrap();
    let apex = vertex_ids(&mgr, &id)[2];
    let mut state = mgr.begin_drag(EntityRef::Vertex(apex), Point::new(5.0, 10.0));
    assert_eq!(mgr.drag_to(&mut state, Point::new(5.0, 30.0), Modifiers::NONE), vec![id]);
    assert_eq!(bounds_of(&mgr, &id), Bounds::new(0.0, 0.0, 10.0, 30.0));
}

#[test]
fn point_drag_with_move_all_carries_others() {
    let mut mgr = manager();
    let a = mgr.add_point(&PointOptions { center: Point::new(0.0, 0.0), ..Default::default() }, 1.0);
    let b = mgr.add_point(&PointOptions { center: Point::new(50.0, 50.0), ..Default::default() }, 1.0);
    let va = vertex_ids(&mgr, &a)[0];

    let mut state = mgr.begin_drag(EntityRef::Vertex(va), Point::new(0.0, 0.0));
    let ctrl = Modifiers { ctrl: true, ..Modifiers::NONE };
    assert_eq!(mgr.drag_to(&mut state, Point::new(10.0, 5.0), ctrl), vec![a, b]);
    assert_eq!(mgr.shape(&b).unwrap().geometry.position(), Point::new(60.0, 55.0));

    // Without the modifier only the dragged point moves.
    assert_eq!(mgr.drag_to(&mut state, Point::new(20.0, 5.0), Modifiers::NONE), vec![a]);
    assert_eq!(mgr.shape(&b).unwrap().geometry.position(), Point::new(60.0, 55.0));
}

#[test]
fn non_interactive_targets_do_not_drag() {
    let mut mgr = manager();
    let id = mgr.add_point(&PointOptions { interactive: false, ..Default::default() }, 1.0);
    assert!(mgr.begin_drag(EntityRef::Shape(id), Point::new(100.0, 100.0)).is_idle());
    let vid = vertex_ids(&mgr, &id)[0];
    assert!(mgr.begin_drag(EntityRef::Vertex(vid), Point::new(100.0, 100.0)).is_idle());
}
