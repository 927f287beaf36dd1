//! Hover state keyed by entity id.
//!
//! The pointer sits over at most one entity at a time, but a shape counts as
//! hovered while the pointer is over the shape or any of its vertices (the
//! shape "group"). Group membership is computed on demand from the set of
//! hovered ids, so moving from a shape onto one of its handles never hides
//! the handles in between.

#[cfg(test)]
#[path = "hover_test.rs"]
mod hover_test;

use std::collections::HashSet;

use crate::scene::{EntityRef, Scene, ShapeId, VertexId};

/// A change in what the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Out(EntityRef),
    Over(EntityRef),
}

#[derive(Debug, Default)]
pub struct HoverTracker {
    hovered: HashSet<EntityRef>,
}

impl HoverTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the tracker at what is under the pointer now. Returns the
    /// out/over transitions, outs first.
    pub fn retarget(&mut self, target: Option<EntityRef>) -> Vec<HoverTransition> {
        let mut transitions: Vec<HoverTransition> = self
            .hovered
            .iter()
            .filter(|e| Some(**e) != target)
            .map(|e| HoverTransition::Out(*e))
            .collect();
        for transition in &transitions {
            if let HoverTransition::Out(e) = transition {
                self.hovered.remove(e);
            }
        }
        if let Some(entity) = target {
            if self.hovered.insert(entity) {
                transitions.push(HoverTransition::Over(entity));
            }
        }
        transitions
    }

    #[must_use]
    pub fn is_hovered(&self, entity: EntityRef) -> bool {
        self.hovered.contains(&entity)
    }

    /// Whether the pointer is over the shape or one of its vertices.
    #[must_use]
    pub fn group_hovered(&self, scene: &Scene, shape_id: &ShapeId) -> bool {
        self.hovered.iter().any(|e| scene.owner_of(*e) == Some(*shape_id))
    }

    /// Forget a shape and its vertices, e.g. when it is removed.
    pub fn forget(&mut self, shape_id: &ShapeId, vertex_ids: &[VertexId]) {
        self.hovered.remove(&EntityRef::Shape(*shape_id));
        for vid in vertex_ids {
            self.hovered.remove(&EntityRef::Vertex(*vid));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hovered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }
}
