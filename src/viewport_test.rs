#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0)
}

// --- defaults ---

#[test]
fn new_viewport_is_identity() {
    let vp = viewport();
    assert_eq!(vp.zoom, 1.0);
    assert_eq!(vp.pan_x, 0.0);
    assert_eq!(vp.pan_y, 0.0);
    assert_eq!(vp.matrix(), Affine::IDENTITY);
}

#[test]
fn center_is_half_size() {
    assert_eq!(viewport().center(), Point::new(500.0, 400.0));
}

// --- screen_to_scene / scene_to_screen ---

#[test]
fn screen_to_scene_identity() {
    let vp = viewport();
    assert!(point_approx_eq(vp.screen_to_scene(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_scene_with_pan_and_zoom() {
    let vp = Viewport { pan_x: 20.0, pan_y: 10.0, zoom: 2.0, ..viewport() };
    assert!(point_approx_eq(vp.screen_to_scene(Point::new(20.0, 10.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(vp.screen_to_scene(Point::new(40.0, 30.0)), Point::new(10.0, 10.0)));
}

#[test]
fn scene_to_screen_inverts_screen_to_scene_under_rotation() {
    let vp = Viewport { pan_x: -35.0, pan_y: 12.0, zoom: 1.7, rotation_deg: 90.0, ..viewport() };
    let screen = Point::new(321.0, 654.0);
    assert!(point_approx_eq(vp.scene_to_screen(vp.screen_to_scene(screen)), screen));
}

#[test]
fn rotation_turns_about_canvas_center() {
    let vp = Viewport { rotation_deg: 180.0, ..viewport() };
    // The canvas center maps to itself; the origin maps to the far corner.
    assert!(point_approx_eq(vp.scene_to_screen(vp.center()), vp.center()));
    assert!(point_approx_eq(vp.scene_to_screen(Point::new(0.0, 0.0)), Point::new(1000.0, 800.0)));
}

// --- zoom_to_point ---

#[test]
fn zoom_to_point_keeps_anchor_fixed() {
    let mut vp = viewport();
    let anchor = Point::new(100.0, 100.0);
    let before = vp.screen_to_scene(anchor);
    vp.zoom_to_point(anchor, 2.0);
    assert_eq!(vp.zoom, 2.0);
    assert!(point_approx_eq(vp.screen_to_scene(anchor), before));
    assert!(approx_eq(vp.pan_x, -100.0));
    assert!(approx_eq(vp.pan_y, -100.0));
}

#[test]
fn zoom_to_point_keeps_anchor_fixed_under_rotation() {
    let mut vp = Viewport { rotation_deg: 270.0, pan_x: 15.0, ..viewport() };
    let anchor = Point::new(640.0, 90.0);
    let before = vp.screen_to_scene(anchor);
    vp.zoom_to_point(anchor, 3.5);
    assert!(point_approx_eq(vp.screen_to_scene(anchor), before));
}

// --- pan / reset ---

#[test]
fn relative_pan_moves_scene_with_pointer() {
    let mut vp = Viewport { zoom: 2.0, ..viewport() };
    let scene = Point::new(10.0, 10.0);
    let before = vp.scene_to_screen(scene);
    vp.relative_pan(30.0, -20.0);
    assert!(point_approx_eq(vp.scene_to_screen(scene), before + Point::new(30.0, -20.0)));
}

#[test]
fn relative_pan_under_rotation_follows_screen_axes() {
    let mut vp = Viewport { rotation_deg: 90.0, ..viewport() };
    let scene = Point::new(10.0, 10.0);
    let before = vp.scene_to_screen(scene);
    vp.relative_pan(5.0, 0.0);
    assert!(point_approx_eq(vp.scene_to_screen(scene), before + Point::new(5.0, 0.0)));
}

#[test]
fn reset_restores_identity() {
    let mut vp = viewport();
    vp.zoom_to_point(Point::new(100.0, 100.0), 2.0);
    vp.relative_pan(40.0, 40.0);
    vp.reset();
    assert_eq!(vp.matrix(), Affine::IDENTITY);
}

#[test]
fn reset_clears_rotation() {
    let mut vp = Viewport { rotation_deg: 90.0, ..viewport() };
    vp.zoom_to_point(Point::new(100.0, 100.0), 2.0);
    vp.reset();
    assert_eq!(vp.rotation_deg, 0.0);
    assert_eq!(vp.matrix(), Affine::IDENTITY);
}
