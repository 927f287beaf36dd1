//! Interactive annotation board for the browser.
//!
//! This crate is compiled to WebAssembly and drives a canvas: it loads a
//! background image, navigates it with pan, zoom and rotation, and lets the
//! user draw and edit points, rectangles and polygons through draggable
//! vertex handles. The host JavaScript layer forwards DOM input to
//! [`board::Board`] and repaints when an input handler returns
//! [`board::Action::RenderNeeded`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Public API: [`board::Board`] and the testable [`board::BoardCore`] |
//! | [`viewport`] | Pan/zoom/rotation transform and screen↔scene conversion |
//! | [`image`] | Background image anchor and scene↔image conversion |
//! | [`scene`] | Arena of shapes and vertex handles |
//! | [`sync`] | Coordinate grid and shape/vertex synchronization |
//! | [`scaling`] | Zoom compensation for handles and outlines |
//! | [`shapes`] | Shape creation, removal, hover, selection and drags |
//! | [`hover`] | Hover state keyed by entity id |
//! | [`hit`] | Hit-testing of handles and shapes |
//! | [`input`] | Input event types and the drag state machine |
//! | [`events`] | Board events and the host event bus |
//! | [`plugin`] / [`plugins`] | Plugin trait, registry and built-in plugins |
//! | [`overlay`] | Pixel-space readout layer above the canvas |
//! | [`render`] | Scene drawing through the [`render::Painter`] seam |
//! | [`config`] | Board configuration and validation |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |

pub mod board;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hit;
pub mod hover;
pub mod image;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod plugins;
pub mod render;
pub mod scaling;
pub mod scene;
pub mod shapes;
pub mod sync;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
#[path = "fakes_test.rs"]
mod fakes;
