//! Out-of-band metadata for live nodes.
//!
//! The host's nodes know nothing about reconciliation. Keys, bound handlers and component
//! back-references live in this side-table instead, keyed by [`NodeId`].

use std::collections::HashMap;

use indexmap::IndexMap;
use tidepool_core::{Handler, InstanceId, NodeId};

#[derive(Debug, Default)]
pub(crate) struct NodeMeta {
    pub(crate) key: Option<String>,
    pub(crate) handlers: IndexMap<String, Handler>,
    /// Outermost component whose rendered output is rooted at this node.
    pub(crate) instance: Option<InstanceId>,
}

impl NodeMeta {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.handlers.is_empty() && self.instance.is_none()
    }
}

#[derive(Debug, Default)]
pub(crate) struct NodeTable {
    entries: HashMap<NodeId, NodeMeta>,
}

impl NodeTable {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn key(&self, node: NodeId) -> Option<&str> {
        self.entries.get(&node).and_then(|meta| meta.key.as_deref())
    }

    pub(crate) fn set_key(&mut self, node: NodeId, key: Option<String>) {
        self.update(node, |meta| meta.key = key);
    }

    pub(crate) fn instance(&self, node: NodeId) -> Option<InstanceId> {
        self.entries.get(&node).and_then(|meta| meta.instance)
    }

    pub(crate) fn set_instance(&mut self, node: NodeId, instance: Option<InstanceId>) {
        self.update(node, |meta| meta.instance = instance);
    }

    pub(crate) fn handler(&self, node: NodeId, event: &str) -> Option<&Handler> {
        self.entries
            .get(&node)
            .and_then(|meta| meta.handlers.get(event))
    }

    /// Records `handler` for `event`, returning the handler it displaces.
    pub(crate) fn bind(
        &mut self,
        node: NodeId,
        event: String,
        handler: Handler,
    ) -> Option<Handler> {
        self.entries
            .entry(node)
            .or_default()
            .handlers
            .insert(event, handler)
    }

    /// Forgets every handler whose event is not accepted by `keep`, returning them.
    pub(crate) fn unbind_unless(
        &mut self,
        node: NodeId,
        keep: impl Fn(&str) -> bool,
    ) -> Vec<(String, Handler)> {
        let Some(meta) = self.entries.get_mut(&node) else {
            return Vec::new();
        };
        let stale: Vec<String> = meta
            .handlers
            .keys()
            .filter(|event| !keep(event))
            .cloned()
            .collect();
        stale
            .into_iter()
            .filter_map(|event| {
                meta.handlers
                    .shift_remove(&event)
                    .map(|handler| (event, handler))
            })
            .collect()
    }

    pub(crate) fn remove(&mut self, node: NodeId) -> Option<NodeMeta> {
        self.entries.remove(&node)
    }

    fn update(&mut self, node: NodeId, f: impl FnOnce(&mut NodeMeta)) {
        let meta = self.entries.entry(node).or_default();
        f(meta);
        if meta.is_empty() {
            self.entries.remove(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entries_are_dropped() {
        let mut table = NodeTable::default();
        let node = NodeId::new(1);

        table.set_key(node, Some("a".to_owned()));
        assert_eq!(table.key(node), Some("a"));
        assert_eq!(table.len(), 1);

        table.set_key(node, None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn binding_returns_the_displaced_handler() {
        let mut table = NodeTable::default();
        let node = NodeId::new(1);
        let first = Handler::new(|_| {});
        let second = Handler::new(|_| {});

        assert!(table.bind(node, "click".to_owned(), first.clone()).is_none());
        let displaced = table.bind(node, "click".to_owned(), second.clone());
        assert!(displaced.is_some_and(|handler| handler.ptr_eq(&first)));
        assert!(table.handler(node, "click").is_some_and(|h| h.ptr_eq(&second)));
    }

    #[test]
    fn unbind_unless_keeps_accepted_events() {
        let mut table = NodeTable::default();
        let node = NodeId::new(1);
        table.bind(node, "click".to_owned(), Handler::new(|_| {}));
        table.bind(node, "input".to_owned(), Handler::new(|_| {}));

        let removed = table.unbind_unless(node, |event| event == "click");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, "input");
        assert!(table.handler(node, "click").is_some());
        assert!(table.handler(node, "input").is_none());
    }
}
