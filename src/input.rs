//! Input model: modifier keys, mouse buttons, keys, wheel deltas, and the
//! drag state machine.
//!
//! `Modifiers` is threaded explicitly through every pointer and key handler;
//! nothing reads a "current event" from ambient state. `DragState` is the
//! gesture tracked between pointer-down and pointer-up, carrying what the
//! sync engine needs on each tick.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::scene::{ShapeId, VertexId};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Also the move-all modifier for point drags.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };

    /// Whether a point-vertex drag should carry every other point along.
    #[must_use]
    pub fn move_all(self) -> bool {
        self.ctrl
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"r"`, `"R"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Lowercased key name, for case-insensitive shortcut matching.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving a whole shape.
    Shape {
        id: ShapeId,
        /// Scene offset from the shape's drag anchor to the pointer at grab time.
        grab_offset: Point,
        /// Set once the shape has actually moved.
        moved: bool,
    },
    /// Moving one vertex handle.
    Vertex {
        id: VertexId,
        shape_id: ShapeId,
        /// Handle position at the previous tick. Reset on every pointer-down.
        baseline: Point,
    },
}

impl DragState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The shape the gesture is acting on.
    #[must_use]
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            Self::Idle => None,
            Self::Shape { id, .. } => Some(*id),
            Self::Vertex { shape_id, .. } => Some(*shape_id),
        }
    }
}
