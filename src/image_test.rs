#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn point_approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn photo() -> LoadedImage {
    LoadedImage { url: "photo.png".into(), width: 400.0, height: 200.0 }
}

// --- normalize_angle ---

#[test]
fn normalize_angle_wraps_into_range() {
    assert_eq!(normalize_angle(0.0), 0.0);
    assert_eq!(normalize_angle(360.0), 0.0);
    assert_eq!(normalize_angle(450.0), 90.0);
    assert_eq!(normalize_angle(-90.0), 270.0);
    assert_eq!(normalize_angle(-720.0), 0.0);
}

// --- fit ---

#[test]
fn fit_scales_to_the_tighter_axis() {
    let anchor = ImageAnchor::fit(&photo(), 1000.0, 1000.0, 0.0);
    assert_eq!(anchor.scale_x, 2.5);
    assert_eq!(anchor.scale_y, 2.5);
    assert_eq!(anchor.center, Point::new(500.0, 500.0));
}

#[test]
fn fit_swaps_dimensions_at_quarter_turns() {
    // 400×200 on 800×1000: upright 800/400=2 vs 1000/200=5 → 2.
    // At 90°, width lies along the canvas height: 800/200=4 vs 1000/400=2.5 → 2.5.
    let upright = ImageAnchor::fit(&photo(), 800.0, 1000.0, 0.0);
    let quarter = ImageAnchor::fit(&photo(), 800.0, 1000.0, 90.0);
    let three_quarter = ImageAnchor::fit(&photo(), 800.0, 1000.0, -90.0);
    assert_eq!(upright.scale_x, 2.0);
    assert_eq!(quarter.scale_x, 2.5);
    assert_eq!(three_quarter.angle, 270.0);
    assert_eq!(three_quarter.scale_x, 2.5);
}

#[test]
fn refit_keeps_image_centered() {
    let mut anchor = ImageAnchor::fit(&photo(), 1000.0, 1000.0, 0.0);
    anchor.refit(600.0, 400.0, 180.0);
    assert_eq!(anchor.center, Point::new(300.0, 200.0));
    assert_eq!(anchor.angle, 180.0);
}

// --- scene ↔ image ---

#[test]
fn image_origin_maps_to_placed_top_left() {
    let anchor = ImageAnchor::fit(&photo(), 1000.0, 1000.0, 0.0);
    // 400×200 at 2.5 → 1000×500, centered vertically.
    assert!(point_approx_eq(anchor.image_to_scene(Point::new(0.0, 0.0)), Point::new(0.0, 250.0)));
    assert!(point_approx_eq(anchor.scene_to_image(Point::new(1000.0, 750.0)), Point::new(400.0, 200.0)));
}

#[test]
fn center_maps_to_image_center_at_every_angle() {
    for angle in [0.0, 90.0, 180.0, 270.0, 33.0] {
        let anchor = ImageAnchor::fit(&photo(), 1000.0, 800.0, angle);
        assert!(point_approx_eq(anchor.scene_to_image(anchor.center), Point::new(200.0, 100.0)));
    }
}

#[test]
fn round_trip_at_right_angles_and_arbitrary_scales() {
    let points = [Point::new(0.0, 0.0), Point::new(12.5, -40.0), Point::new(399.0, 199.0), Point::new(-1e3, 7e2)];
    for angle in [0.0, 90.0, 180.0, 270.0] {
        for (sx, sy) in [(1.0, 1.0), (0.37, 0.37), (2.5, 0.8)] {
            let mut anchor = ImageAnchor::fit(&photo(), 900.0, 700.0, angle);
            anchor.scale_x = sx;
            anchor.scale_y = sy;
            for p in points {
                let back = anchor.scene_to_image(anchor.image_to_scene(p));
                assert!(point_approx_eq(back, p), "angle {angle} scale ({sx},{sy}) point {p:?} → {back:?}");
            }
        }
    }
}

#[test]
fn rotated_image_corner_lands_on_rotated_position() {
    // 180°: the image's own top-left sits at the scene bottom-right of the placement.
    let anchor = ImageAnchor::fit(&photo(), 1000.0, 1000.0, 180.0);
    assert!(point_approx_eq(anchor.image_to_scene(Point::new(0.0, 0.0)), Point::new(1000.0, 750.0)));
}

#[test]
fn scene_corners_follow_rotation() {
    let anchor = ImageAnchor::fit(&photo(), 1000.0, 1000.0, 90.0);
    let [tl, tr, br, bl] = anchor.scene_corners();
    // 400×200 at 90° on 1000² → scale min(1000/200, 1000/400) = 2.5: 500 wide, 1000 tall.
    assert!(point_approx_eq(tl, Point::new(750.0, 0.0)));
    assert!(point_approx_eq(tr, Point::new(750.0, 1000.0)));
    assert!(point_approx_eq(br, Point::new(250.0, 1000.0)));
    assert!(point_approx_eq(bl, Point::new(250.0, 0.0)));
}

#[test]
fn no_image_is_identity() {
    let p = Point::new(17.0, -3.0);
    assert_eq!(scene_to_image(None, p), p);
    assert_eq!(image_to_scene(None, p), p);
}
