use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
    assert_eq!(m, Modifiers::NONE);
}

#[test]
fn move_all_follows_ctrl() {
    assert!(Modifiers { ctrl: true, ..Modifiers::NONE }.move_all());
    assert!(!Modifiers { shift: true, alt: true, meta: true, ..Modifiers::NONE }.move_all());
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
    assert_eq!(Button::from_dom(3), None);
    assert_eq!(Button::from_dom(-1), None);
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_normalized_lowercases() {
    assert_eq!(Key::new("R").normalized(), "r");
    assert_eq!(Key::new("Escape").normalized(), "escape");
}

// =============================================================
// DragState
// =============================================================

#[test]
fn drag_state_default_is_idle() {
    let state = DragState::default();
    assert!(state.is_idle());
    assert_eq!(state.shape_id(), None);
}

#[test]
fn drag_state_reports_target_shape() {
    let shape_id = Uuid::new_v4();
    let shape = DragState::Shape { id: shape_id, grab_offset: Point::new(1.0, 2.0), moved: false };
    let vertex = DragState::Vertex { id: Uuid::new_v4(), shape_id, baseline: Point::default() };
    assert_eq!(shape.shape_id(), Some(shape_id));
    assert_eq!(vertex.shape_id(), Some(shape_id));
    assert!(!vertex.is_idle());
}
