//! Shared numeric constants for the board.

// ── Quantization ────────────────────────────────────────────────

/// Default coordinate grid: integer scene coordinates.
pub const DEFAULT_COORDINATE_GRID: f64 = 1.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Smallest width/height a rectangle may be dragged down to, in scene units.
pub const MIN_RECT_SIZE: f64 = 10.0;

/// Default rectangle placement when the caller gives none.
pub const DEFAULT_RECT_LEFT: f64 = 50.0;
pub const DEFAULT_RECT_TOP: f64 = 50.0;
pub const DEFAULT_RECT_SIZE: f64 = 100.0;

/// Default generated polygon: center, circumradius, and vertex count.
pub const DEFAULT_POLYGON_CENTER: f64 = 200.0;
pub const DEFAULT_POLYGON_RADIUS: f64 = 80.0;
pub const DEFAULT_POLYGON_POINTS: usize = 10;

/// Angular jitter (radians, total span) applied to generated polygon vertices.
pub const POLYGON_ANGLE_JITTER: f64 = 0.5;

/// Generated polygon radii fall in `[RADIUS_MIN_RATIO, 1.0] · radius`.
pub const POLYGON_RADIUS_MIN_RATIO: f64 = 0.6;

/// Default point placement and radius.
pub const DEFAULT_POINT_POSITION: f64 = 100.0;
pub const DEFAULT_POINT_RADIUS: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space slop around vertex handles, in pixels.
pub const VERTEX_HIT_TOLERANCE_PX: f64 = 5.0;

/// Screen-space slop around polygon edges, in pixels.
pub const SHAPE_HIT_TOLERANCE_PX: f64 = 2.0;

// ── Overlay readout ─────────────────────────────────────────────

/// Offset of the coordinate box from the pointer, in pixels.
pub const READOUT_OFFSET_PX: f64 = 10.0;
pub const READOUT_PADDING_PX: f64 = 4.0;
pub const READOUT_BOX_HEIGHT_PX: f64 = 18.0;
pub const READOUT_FONT_SIZE_PX: f64 = 12.0;
pub const READOUT_FONT: &str = "12px system-ui, -apple-system, Segoe UI, Roboto, sans-serif";
pub const READOUT_BACKGROUND: &str = "rgba(0,0,0,0.6)";
pub const READOUT_TEXT_COLOR: &str = "#ffffff";

// ── Wheel zoom ──────────────────────────────────────────────────

/// Magnitude of one wheel notch before multiplying by the zoom step.
pub const WHEEL_NOTCH: f64 = 10.0;
