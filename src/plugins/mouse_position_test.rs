use super::*;
use crate::config::BoardConfig;
use crate::events::PointerInfo;
use crate::fakes::{Call, RecordingPainter};
use crate::geometry::Affine;
use crate::image::LoadedImage;
use crate::input::Modifiers;
use crate::overlay::Overlay;

fn moved_to(core: &BoardCore, x: f64, y: f64) -> BoardEvent {
    let screen = Point::new(x, y);
    BoardEvent::PointerMove(PointerInfo {
        screen,
        scene: core.screen_to_scene(screen),
        button: None,
        modifiers: Modifiers::NONE,
        target: None,
    })
}

#[test]
fn readout_rounds_coordinates() {
    assert_eq!(readout_text(Point::new(1.4, -2.6)), "(1, -3)");
    assert_eq!(readout_text(Point::new(0.0, 10.5)), "(0, 11)");
}

#[test]
fn readout_never_shows_negative_zero() {
    assert_eq!(readout_text(Point::new(-0.4, 3.0)), "(0, 3)");
    assert_eq!(readout_text(Point::new(2.0, -0.2)), "(2, 0)");
}

#[test]
fn pointer_move_redraws_readout_in_image_space() {
    let mut core = BoardCore::new(BoardConfig { width: 100.0, height: 100.0, ..Default::default() });
    core.place_image(LoadedImage { url: "a.png".into(), width: 200.0, height: 200.0 }).unwrap();
    let painter = RecordingPainter::new();
    core.set_overlay(Overlay::new(Box::new(painter.clone()), 100.0, 100.0));

    let mut plugin = MousePosition::new();
    plugin.init(&mut core).unwrap();
    let event = moved_to(&core, 50.0, 50.0);
    plugin.on_event(&mut core, &event);

    let calls = painter.calls();
    assert_eq!(calls[0], Call::SetTransform(Affine::IDENTITY));
    assert_eq!(calls[1], Call::Clear(100.0, 100.0));
    // Canvas center is the image center; the image is shown at half size.
    assert!(calls.iter().any(|c| matches!(c, Call::Text(t, _) if t == "(100, 100)")));
}

#[test]
fn without_overlay_is_inert() {
    let mut core = BoardCore::new(BoardConfig::default());
    let mut plugin = MousePosition::new();
    assert!(plugin.init(&mut core).is_ok());
    let event = moved_to(&core, 10.0, 10.0);
    plugin.on_event(&mut core, &event);
    assert!(core.overlay_mut().is_none());
}

#[test]
fn destroy_clears_overlay() {
    let mut core = BoardCore::new(BoardConfig::default());
    let painter = RecordingPainter::new();
    core.set_overlay(Overlay::new(Box::new(painter.clone()), 100.0, 100.0));
    let mut plugin = MousePosition::new();
    plugin.destroy(&mut core);
    assert_eq!(painter.calls(), vec![Call::SetTransform(Affine::IDENTITY), Call::Clear(100.0, 100.0)]);
}
