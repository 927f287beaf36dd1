//! Scaling compensation: keep handles and outlines a constant on-screen size.
//!
//! Each compensated entity holds one registration. Registering applies the
//! compensation for the current zoom immediately; every later zoom change
//! re-applies it through [`ScalingRegistry::apply`], in registration order.
//! The returned [`CompensationHandle`] must be disposed exactly once when the
//! entity goes away. A registration whose target has vanished is a leak: it
//! is skipped with a warning and still counted by [`ScalingRegistry::len`].

#[cfg(test)]
#[path = "scaling_test.rs"]
mod scaling_test;

use crate::config::is_positive;
use crate::scene::{EntityRef, Scene};

/// How an entity is compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationMode {
    /// Scale the whole object by `1 / zoom`. Vertex stroke is uniform, so its
    /// width is divided by zoom as well.
    Full,
    /// Only the stroke width is divided by zoom; geometry scales with the view.
    StrokeOnly,
}

/// Disposer token for one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompensationHandle(u64);

#[derive(Debug, Clone)]
struct Registration {
    handle: CompensationHandle,
    target: EntityRef,
    mode: CompensationMode,
    /// Stroke width captured at registration.
    original_stroke: f64,
}

#[derive(Debug, Default)]
pub struct ScalingRegistry {
    registrations: Vec<Registration>,
    next_handle: u64,
}

impl ScalingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` and compensate it for `zoom` right away.
    pub fn register(
        &mut self,
        scene: &mut Scene,
        target: EntityRef,
        mode: CompensationMode,
        zoom: f64,
    ) -> CompensationHandle {
        let original_stroke = match target {
            EntityRef::Shape(id) => scene.shape(&id).map(|s| s.style.stroke_width),
            EntityRef::Vertex(id) => scene.vertex(&id).map(|v| v.style.stroke_width),
        }
        .unwrap_or_default();
        self.next_handle += 1;
        let registration =
            Registration { handle: CompensationHandle(self.next_handle), target, mode, original_stroke };
        compensate(scene, &registration, zoom);
        let handle = registration.handle;
        self.registrations.push(registration);
        handle
    }

    /// Drop a registration. Returns `false` if it was already disposed.
    pub fn dispose(&mut self, handle: CompensationHandle) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.handle != handle);
        self.registrations.len() != before
    }

    /// Re-apply every registration for a new zoom level.
    pub fn apply(&self, scene: &mut Scene, zoom: f64) {
        if !is_positive(zoom) {
            tracing::warn!(zoom, "ignoring compensation for non-positive zoom");
            return;
        }
        for registration in &self.registrations {
            compensate(scene, registration, zoom);
        }
    }

    #[must_use]
    pub fn is_registered(&self, handle: CompensationHandle) -> bool {
        self.registrations.iter().any(|r| r.handle == handle)
    }

    /// Live registrations, leaked ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

fn compensate(scene: &mut Scene, registration: &Registration, zoom: f64) {
    if !is_positive(zoom) {
        return;
    }
    let factor = 1.0 / zoom;
    let stroke = registration.original_stroke * factor;
    match (registration.target, registration.mode) {
        (EntityRef::Vertex(id), mode) => {
            let Some(vertex) = scene.vertex_mut(&id) else {
                tracing::warn!(vertex = %id, "compensation target is gone; registration leaked");
                return;
            };
            if mode == CompensationMode::Full {
                vertex.scale = factor;
            }
            vertex.style.stroke_width = stroke;
            vertex.refresh_coords();
        }
        (EntityRef::Shape(id), mode) => {
            let Some(shape) = scene.shape_mut(&id) else {
                tracing::warn!(shape = %id, "compensation target is gone; registration leaked");
                return;
            };
            if mode == CompensationMode::Full {
                tracing::debug!(shape = %id, "shapes have no scale; compensating stroke only");
            }
            shape.style.stroke_width = stroke;
            shape.refresh_coords();
        }
    }
}
