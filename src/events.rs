//! Board events and the host-facing event bus.
//!
//! Every notification the board produces is one [`BoardEvent`] variant with a
//! typed payload. Host listeners subscribe to an [`EventKind`] and get back a
//! [`Subscription`] token; unsubscribing twice is harmless. Listeners run
//! synchronously in subscription order.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use crate::error::LoadError;
use crate::geometry::Point;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::scene::{EntityRef, ShapeId};

/// Pointer event payload: where it happened in both spaces and what was under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInfo {
    pub screen: Point,
    pub scene: Point,
    pub button: Option<Button>,
    pub modifiers: Modifiers,
    pub target: Option<EntityRef>,
}

/// Wheel event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInfo {
    pub screen: Point,
    pub scene: Point,
    pub delta: WheelDelta,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// A background image was placed.
    Load { url: String, width: f64, height: f64 },
    /// Image load failed; the same error is returned to the caller.
    ImageLoadError(LoadError),
    /// The background image was taken off the board.
    ImageRemoved { url: String },
    /// New absolute zoom level.
    Zoom(f64),
    /// New cumulative rotation, normalized to `[0, 360)`.
    Rotate(f64),
    PointerDown(PointerInfo),
    PointerMove(PointerInfo),
    PointerUp(PointerInfo),
    PointerOver(EntityRef),
    PointerOut(EntityRef),
    Wheel(WheelInfo),
    KeyDown { key: Key, modifiers: Modifiers },
    ShapeAdded(ShapeId),
    ShapeModified(ShapeId),
    ShapeRemoved(ShapeId),
    SelectionChanged(Option<ShapeId>),
    Destroy,
}

/// Payload-free discriminant of [`BoardEvent`], used to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    ImageLoadError,
    ImageRemoved,
    Zoom,
    Rotate,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerOver,
    PointerOut,
    Wheel,
    KeyDown,
    ShapeAdded,
    ShapeModified,
    ShapeRemoved,
    SelectionChanged,
    Destroy,
}

impl BoardEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Load { .. } => EventKind::Load,
            Self::ImageLoadError(_) => EventKind::ImageLoadError,
            Self::ImageRemoved { .. } => EventKind::ImageRemoved,
            Self::Zoom(_) => EventKind::Zoom,
            Self::Rotate(_) => EventKind::Rotate,
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerOver(_) => EventKind::PointerOver,
            Self::PointerOut(_) => EventKind::PointerOut,
            Self::Wheel(_) => EventKind::Wheel,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::ShapeAdded(_) => EventKind::ShapeAdded,
            Self::ShapeModified(_) => EventKind::ShapeModified,
            Self::ShapeRemoved(_) => EventKind::ShapeRemoved,
            Self::SelectionChanged(_) => EventKind::SelectionChanged,
            Self::Destroy => EventKind::Destroy,
        }
    }
}

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&BoardEvent)>;

struct Entry {
    subscription: Subscription,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
pub struct EventBus {
    entries: Vec<Entry>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, listener: impl FnMut(&BoardEvent) + 'static) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.entries.push(Entry { subscription, kind, listener: Box::new(listener) });
        subscription
    }

    /// Returns `false` if the subscription was already released.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.subscription != subscription);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &BoardEvent) {
        let kind = event.kind();
        for entry in self.entries.iter_mut().filter(|e| e.kind == kind) {
            (entry.listener)(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.entries.len()).finish()
    }
}
