use super::*;
use crate::config::VertexStyle;
use crate::fakes::{BrokenPainter, Call, RecordingPainter};
use crate::image::LoadedImage;

fn style() -> Style {
    Style { fill: "blue".into(), stroke: "navy".into(), stroke_width: 2.0 }
}

#[test]
fn empty_scene_only_clears() {
    let mut painter = RecordingPainter::new();
    let viewport = Viewport::new(800.0, 600.0);
    draw_scene(&mut painter, &viewport, None, &Scene::new()).unwrap();
    assert_eq!(
        painter.calls(),
        vec![
            Call::SetTransform(Affine::IDENTITY),
            Call::Clear(800.0, 600.0),
            Call::SetTransform(viewport.matrix()),
        ]
    );
}

#[test]
fn image_drawn_in_its_own_frame_before_shapes() {
    let mut painter = RecordingPainter::new();
    let viewport = Viewport::new(100.0, 100.0);
    let loaded = LoadedImage { url: "bg.png".into(), width: 200.0, height: 100.0 };
    let anchor = ImageAnchor::fit(&loaded, 100.0, 100.0, 0.0);
    draw_scene(&mut painter, &viewport, Some(&anchor), &Scene::new()).unwrap();
    let calls = painter.calls();
    assert_eq!(calls[2], Call::SetTransform(viewport.matrix().then_after(&anchor.matrix())));
    assert_eq!(calls[3], Call::DrawImage("bg.png".into(), 200.0, 100.0));
}

#[test]
fn shapes_in_z_order_then_visible_vertices() {
    let mut painter = RecordingPainter::new();
    let mut scene = Scene::new();
    let rect = scene.spawn(Geometry::Rect(Bounds::new(0.0, 0.0, 10.0, 20.0)), style(), true, &VertexStyle::default());
    let point = scene.spawn(
        Geometry::Point { center: Point::new(5.0, 5.0), radius: 3.0 },
        style(),
        true,
        &VertexStyle::default(),
    );
    let vid = scene.shape(&point).unwrap().vertices[0];
    scene.vertex_mut(&vid).unwrap().visible = true;
    scene.vertex_mut(&vid).unwrap().scale = 0.5;

    draw_scene(&mut painter, &Viewport::new(50.0, 50.0), None, &scene).unwrap();
    let calls = painter.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(
        calls[3],
        Call::Polygon(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 20.0), Point::new(0.0, 20.0)],
            style()
        )
    );
    assert_eq!(calls[4], Call::Circle(Point::new(5.0, 5.0), 3.0, style()));
    // Only the visible handle of the point; the rectangle's handles are hidden.
    assert!(matches!(&calls[5], Call::Circle(p, r, _) if *p == Point::new(5.0, 5.0) && (*r - 3.5).abs() < 1e-12));
    assert!(scene.shape(&rect).is_some());
}

#[test]
fn painter_errors_propagate() {
    let err = draw_scene(&mut BrokenPainter, &Viewport::new(10.0, 10.0), None, &Scene::new()).unwrap_err();
    assert!(matches!(err, RenderError::Surface(_)));
}

#[test]
fn replace_cached_keeps_only_latest_image() {
    let cache = RefCell::new(HashMap::new());
    replace_cached(&cache, "a.png", 1);
    replace_cached(&cache, "b.png", 2);
    let entries = cache.borrow();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.get("b.png"), Some(&2));
    assert!(!entries.contains_key("a.png"));
}
