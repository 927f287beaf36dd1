//! Built-in plugins.
//!
//! [`WheelZoom`], [`CanvasDrag`] and [`CanvasRotate`] are registered on every
//! board unless `default_plugins` is off. [`MousePosition`] is opt-in and
//! needs an overlay.

pub mod canvas_drag;
pub mod canvas_rotate;
pub mod mouse_position;
pub mod wheel_zoom;

pub use canvas_drag::CanvasDrag;
pub use canvas_rotate::{CanvasRotate, Shortcut};
pub use mouse_position::MousePosition;
pub use wheel_zoom::WheelZoom;
