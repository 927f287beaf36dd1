//! Keyboard shortcut that rotates the board.

#[cfg(test)]
#[path = "canvas_rotate_test.rs"]
mod canvas_rotate_test;

use crate::board::BoardCore;
use crate::config::RotateOptions;
use crate::error::ConfigError;
use crate::events::BoardEvent;
use crate::input::{Key, Modifiers};
use crate::plugin::Plugin;

/// A parsed shortcut such as `"Shift+R"` or `"Ctrl+Alt+r"`.
///
/// Parts are separated by `+` and matched case-insensitively. Exactly one
/// part must be a non-modifier key.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Lowercased key name.
    pub key: String,
}

impl Shortcut {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShortcut`] for an empty part, a missing
    /// key, or more than one key.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidShortcut(raw.to_string());
        let mut shortcut = Self { ctrl: false, alt: false, shift: false, meta: false, key: String::new() };
        for part in raw.split('+') {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "" => return Err(invalid()),
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" | "option" => shortcut.alt = true,
                "shift" => shortcut.shift = true,
                "meta" | "cmd" | "command" | "win" | "super" => shortcut.meta = true,
                _ if !shortcut.key.is_empty() => return Err(invalid()),
                _ => shortcut.key = part,
            }
        }
        if shortcut.key.is_empty() {
            return Err(invalid());
        }
        Ok(shortcut)
    }

    /// Rotation direction for a key press: `Some(1.0)` forward, `Some(-1.0)`
    /// when Shift is held but not part of the shortcut, `None` on no match.
    /// Ctrl, Alt and Meta must match exactly.
    #[must_use]
    pub fn direction(&self, key: &Key, modifiers: Modifiers) -> Option<f64> {
        if key.normalized() != self.key
            || modifiers.ctrl != self.ctrl
            || modifiers.alt != self.alt
            || modifiers.meta != self.meta
        {
            return None;
        }
        match (self.shift, modifiers.shift) {
            (true, true) | (false, false) => Some(1.0),
            (true, false) => None,
            (false, true) => Some(-1.0),
        }
    }
}

#[derive(Debug)]
pub struct CanvasRotate {
    /// `None` when the configured shortcut did not parse; the plugin is inert.
    shortcut: Option<Shortcut>,
    step: f64,
}

impl CanvasRotate {
    pub const NAME: &'static str = "canvas-rotate";

    #[must_use]
    pub fn new(options: &RotateOptions) -> Self {
        let shortcut = match Shortcut::parse(&options.shortcut) {
            Ok(shortcut) => Some(shortcut),
            Err(err) => {
                tracing::warn!(%err, "rotate shortcut disabled");
                None
            }
        };
        Self { shortcut, step: options.step }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shortcut.is_some()
    }
}

impl Plugin for CanvasRotate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn on_event(&mut self, core: &mut BoardCore, event: &BoardEvent) {
        let (Some(shortcut), BoardEvent::KeyDown { key, modifiers }) = (&self.shortcut, event) else {
            return;
        };
        if let Some(direction) = shortcut.direction(key, *modifiers) {
            core.rotate(direction * self.step);
        }
    }
}
