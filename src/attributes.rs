//! Writing props onto live elements.

use tidepool_core::{Handler, Host, NodeId, Props, Value};
use tracing::trace;

use crate::Renderer;

impl<H: Host> Renderer<H> {
    /// Applies one prop to `node`. Earlier rules win:
    ///
    /// 1. an event-prefixed name with a handler value rebinds the listener
    /// 2. a configured direct property is written as a property
    /// 3. `style` with a mapping merges each entry onto the style surface
    /// 4. `ref` with a node reference is invoked with the node
    /// 5. `key` records the reconciliation key
    /// 6. any other primitive value is written as an attribute
    ///
    /// Values matching no rule are ignored.
    pub(crate) fn apply_prop(&mut self, node: NodeId, name: &str, value: &Value) {
        if let (Some(event), Value::Handler(handler)) = (self.config.event_name(name), value) {
            self.bind_handler(node, event, handler);
        } else if self.config.is_direct_property(name) {
            self.host.set_property(node, name, value);
        } else if name == "style"
            && let Value::Map(styles) = value
        {
            for (property, entry) in styles.iter() {
                let text = entry.as_text().unwrap_or_default();
                self.host.set_style(node, property, &text);
            }
        } else if name == "ref"
            && let Value::Ref(node_ref) = value
        {
            node_ref.call(node);
        } else if name == "key" {
            // Component roots keep the key of the component node that produced them.
            if self.nodes.instance(node).is_none() {
                let key = value.is_truthy().then(|| value.as_text()).flatten();
                self.nodes.set_key(node, key);
            }
        } else if let Some(text) = value.as_text() {
            self.host.set_attribute(node, name, &text);
        } else {
            trace!(prop = name, ?value, "prop ignored");
        }
    }

    /// Clears every attribute of a reused element and writes `props` afresh.
    ///
    /// Listeners whose event prop disappeared are unbound. Direct properties and styles
    /// are not cleared, only overwritten.
    pub(crate) fn reset_props(&mut self, node: NodeId, props: &Props) {
        for name in self.host.attribute_names(node) {
            self.host.remove_attribute(node, &name);
        }

        let live: Vec<String> = props
            .iter()
            .filter(|(_, value)| matches!(value, Value::Handler(_)))
            .filter_map(|(name, _)| self.config.event_name(name))
            .collect();
        for (event, handler) in self
            .nodes
            .unbind_unless(node, |event| live.iter().any(|e| e == event))
        {
            trace!(%event, "unbinding stale handler");
            self.host.remove_event_listener(node, &event, &handler);
        }

        if !props.contains_key("key") && self.nodes.instance(node).is_none() {
            self.nodes.set_key(node, None);
        }
        for (name, value) in props {
            self.apply_prop(node, name, value);
        }
    }

    fn bind_handler(&mut self, node: NodeId, event: String, handler: &Handler) {
        if let Some(previous) = self.nodes.bind(node, event.clone(), handler.clone()) {
            self.host.remove_event_listener(node, &event, &previous);
        }
        self.host.add_event_listener(node, &event, handler);
    }
}
