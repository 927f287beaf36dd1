//! Error taxonomy for the board.
//!
//! Configuration errors are reported and leave state untouched. Shape errors
//! are programmer errors raised by must-succeed factory calls. Load errors
//! wrap the asynchronous image fetch/decode failure. Nothing here is fatal to
//! the board itself.

use crate::scene::ShapeId;

/// Invalid configuration value. The offending operation is a no-op.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("coordinate grid must be greater than 0 (got {0})")]
    InvalidGrid(f64),
    #[error("zoom level must be greater than 0 (got {0})")]
    InvalidZoom(f64),
    #[error("zoom range is empty (min {min}, max {max})")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("canvas size must be positive (got {width}x{height})")]
    InvalidSize { width: f64, height: f64 },
    #[error("malformed shortcut: {0:?}")]
    InvalidShortcut(String),
    #[error("invalid board config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure creating or addressing a shape.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("rectangle requires exactly four corner points (got {0})")]
    CornerCount(usize),
    #[error("polygon requires at least one point")]
    EmptyPolygon,
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    #[error("board has been destroyed")]
    Destroyed,
}

/// Failure loading the background image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("no image loader configured")]
    LoaderUnavailable,
    #[error("failed to fetch image {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("failed to decode image {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("image {url} has no pixels")]
    InvalidDimensions { url: String },
    #[error("board has been destroyed")]
    Destroyed,
}

/// A plugin refused to initialize. Propagated to the caller of `use_plugin`.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("plugin {plugin} failed to initialize: {reason}")]
    Init { plugin: &'static str, reason: String },
}

/// A drawing surface rejected a call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("drawing surface error: {0}")]
    Surface(String),
}
