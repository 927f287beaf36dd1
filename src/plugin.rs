//! Plugin trait and the ordered registry the board dispatches through.
//!
//! A plugin is owned by the registry once registered. It sees every board
//! event after the board has applied it and before host listeners do, and may
//! act on the board through the [`BoardCore`] it is handed. Plugins are
//! destroyed in reverse registration order.

#[cfg(test)]
#[path = "plugin_test.rs"]
mod plugin_test;

use crate::board::BoardCore;
use crate::error::PluginError;
use crate::events::BoardEvent;

pub trait Plugin {
    /// Stable name, used by [`PluginRegistry::remove`].
    fn name(&self) -> &'static str;

    /// Called once on registration. An error aborts the registration and is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// Implementations return [`PluginError::Init`] when they cannot attach.
    fn init(&mut self, _core: &mut BoardCore) -> Result<(), PluginError> {
        Ok(())
    }

    fn on_event(&mut self, _core: &mut BoardCore, _event: &BoardEvent) {}

    /// Release whatever the plugin drew or held on the board.
    fn destroy(&mut self, _core: &mut BoardCore) {}
}

#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize and append `plugin`. A plugin already registered under the
    /// same name is destroyed and replaced.
    ///
    /// # Errors
    ///
    /// Propagates the plugin's own init failure; the registry is unchanged
    /// apart from the replaced plugin.
    pub fn register(&mut self, core: &mut BoardCore, mut plugin: Box<dyn Plugin>) -> Result<(), PluginError> {
        self.remove(core, plugin.name());
        plugin.init(core)?;
        tracing::debug!(plugin = plugin.name(), "plugin registered");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Destroy and drop the plugin called `name`. Returns whether one was found.
    pub fn remove(&mut self, core: &mut BoardCore, name: &str) -> bool {
        let Some(index) = self.plugins.iter().position(|p| p.name() == name) else {
            return false;
        };
        let mut plugin = self.plugins.remove(index);
        plugin.destroy(core);
        true
    }

    pub fn dispatch(&mut self, core: &mut BoardCore, event: &BoardEvent) {
        for plugin in &mut self.plugins {
            plugin.on_event(core, event);
        }
    }

    /// Destroy every plugin, last registered first.
    pub fn destroy_all(&mut self, core: &mut BoardCore) {
        while let Some(mut plugin) = self.plugins.pop() {
            tracing::debug!(plugin = plugin.name(), "plugin destroyed");
            plugin.destroy(core);
        }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
