//! Renderer configuration.

use tidepool_core::Host;

use crate::Renderer;

/// Knobs controlling how props are interpreted and how reconciliation behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RendererConfig {
    /// Prefix marking a prop as an event callback; `onClick` binds `click`.
    pub event_prefix: String,
    /// Prop names written as direct properties rather than attributes.
    pub direct_properties: Vec<String>,
    /// Whether an element reconciliation pass restores the focus it found on entry.
    pub restore_focus: bool,
    /// Prefix of the positional keys given to children without an explicit key.
    pub index_key_prefix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            event_prefix: "on".to_owned(),
            direct_properties: vec![
                "checked".to_owned(),
                "value".to_owned(),
                "className".to_owned(),
            ],
            restore_focus: true,
            index_key_prefix: "__index_".to_owned(),
        }
    }
}

impl RendererConfig {
    /// Returns the lower-cased event name if `key` names an event prop.
    #[must_use]
    pub fn event_name(&self, key: &str) -> Option<String> {
        key.strip_prefix(self.event_prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns `true` if `key` is written as a direct property.
    #[must_use]
    pub fn is_direct_property(&self, key: &str) -> bool {
        self.direct_properties.iter().any(|name| name == key)
    }

    /// Builds the positional key of the child at `index`.
    #[must_use]
    pub fn index_key(&self, index: usize) -> String {
        format!("{}{index}", self.index_key_prefix)
    }
}

/// Builder for [`Renderer`].
#[derive(Debug, Default, Clone)]
pub struct RendererBuilder {
    config: RendererConfig,
}

impl RendererBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub const fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Sets the prefix marking event props.
    #[must_use]
    pub fn event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.event_prefix = prefix.into();
        self
    }

    /// Adds a prop name to the set written as direct properties.
    #[must_use]
    pub fn direct_property(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.config.is_direct_property(&name) {
            self.config.direct_properties.push(name);
        }
        self
    }

    /// Controls whether reconciliation restores focus.
    #[must_use]
    pub const fn restore_focus(mut self, restore: bool) -> Self {
        self.config.restore_focus = restore;
        self
    }

    /// Sets the prefix of positional keys.
    #[must_use]
    pub fn index_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.index_key_prefix = prefix.into();
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Finalises the builder and creates a [`Renderer`] driving `host`.
    pub fn build<H: Host>(self, host: H) -> Renderer<H> {
        Renderer::with_config(host, self.config)
    }
}
