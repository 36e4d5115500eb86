//! Arena-backed element tree implementing the [`Host`] contract.

use indexmap::IndexMap;
use tidepool_core::{Event, Handler, Host, NodeId, Value};
use tracing::trace;

use crate::snapshot::Snapshot;

/// Counters of the host operations a [`Document`] has performed.
///
/// Tests use these to tell node reuse apart from node replacement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostStats {
    /// Elements created.
    pub elements_created: usize,
    /// Text nodes created.
    pub texts_created: usize,
    /// `replace_child` calls.
    pub replacements: usize,
    /// `remove_child` calls.
    pub removals: usize,
    /// Listeners bound.
    pub listeners_bound: usize,
    /// Listeners unbound.
    pub listeners_unbound: usize,
}

#[derive(Debug, Default)]
struct ElementData {
    tag: String,
    attributes: IndexMap<String, String>,
    properties: IndexMap<String, Value>,
    styles: IndexMap<String, String>,
    listeners: Vec<(String, Handler)>,
}

#[derive(Debug)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
struct NodeEntry {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
}

impl NodeEntry {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            removed: false,
        }
    }

    const fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    const fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }
}

/// A headless element tree.
///
/// Nodes are never freed; detached nodes stay readable, which lets tests inspect nodes
/// the renderer has discarded.
///
/// The document mirrors a few browser behaviors the renderer has to cope with:
///
/// - `className` is reflected as the `class` attribute.
/// - A non-empty style surface is reported as a `style` attribute, and removing that
///   attribute clears every style.
/// - Moving or removing an attached subtree that contains the focused node blurs it.
/// - Focusing a node inside a removed subtree does nothing. Nodes that were never
///   attached count as roots and stay focusable.
///
/// Every method taking a [`NodeId`] panics if the id was not minted by this document.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<NodeEntry>,
    focused: Option<NodeId>,
    stats: HostStats,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            focused: None,
            stats: HostStats {
                elements_created: 0,
                texts_created: 0,
                replacements: 0,
                removals: 0,
                listeners_bound: 0,
                listeners_unbound: 0,
            },
        }
    }

    /// Returns the number of nodes ever created, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node was ever created.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the operation counters.
    #[must_use]
    pub const fn stats(&self) -> HostStats {
        self.stats
    }

    /// Returns a generic attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.entry(node)
            .element()
            .and_then(|data| data.attributes.get(name))
            .map(String::as_str)
    }

    /// Returns a direct property.
    #[must_use]
    pub fn property(&self, node: NodeId, name: &str) -> Option<&Value> {
        self.entry(node)
            .element()
            .and_then(|data| data.properties.get(name))
    }

    /// Returns one entry of the style surface.
    #[must_use]
    pub fn style(&self, node: NodeId, name: &str) -> Option<&str> {
        self.entry(node)
            .element()
            .and_then(|data| data.styles.get(name))
            .map(String::as_str)
    }

    /// Returns how many listeners are bound for `event`.
    #[must_use]
    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.entry(node).element().map_or(0, |data| {
            data.listeners
                .iter()
                .filter(|(kind, _)| kind == event)
                .count()
        })
    }

    /// Invokes every listener bound on `node` for `event`. Returns how many ran.
    ///
    /// Events do not bubble.
    pub fn dispatch(&self, node: NodeId, event: &str) -> usize {
        let handlers: Vec<Handler> = self.entry(node).element().map_or_else(Vec::new, |data| {
            data.listeners
                .iter()
                .filter(|(kind, _)| kind == event)
                .map(|(_, handler)| handler.clone())
                .collect()
        });
        let event = Event::new(event, node);
        for handler in &handlers {
            handler.call(&event);
        }
        handlers.len()
    }

    /// Returns the concatenated text of `node` and its descendants.
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entry(id).parent;
        }
        false
    }

    /// Captures a comparable structural view of the subtree rooted at `node`.
    #[must_use]
    pub fn snapshot(&self, node: NodeId) -> Snapshot {
        let entry = self.entry(node);
        match &entry.kind {
            NodeKind::Text(text) => Snapshot::Text(text.clone()),
            NodeKind::Element(data) => Snapshot::Element {
                tag: data.tag.clone(),
                attributes: data
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                properties: data
                    .properties
                    .iter()
                    .filter_map(|(k, v)| v.as_text().map(|text| (k.clone(), text)))
                    .collect(),
                styles: data
                    .styles
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                children: entry
                    .children
                    .iter()
                    .map(|child| self.snapshot(*child))
                    .collect(),
            },
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let entry = self.entry(node);
        if let NodeKind::Text(text) = &entry.kind {
            out.push_str(text);
        }
        for child in &entry.children {
            self.collect_text(*child, out);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn entry(&self, node: NodeId) -> &NodeEntry {
        &self.nodes[node.raw() as usize]
    }

    #[allow(clippy::cast_possible_truncation)]
    fn entry_mut(&mut self, node: NodeId) -> &mut NodeEntry {
        &mut self.nodes[node.raw() as usize]
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(NodeEntry::new(kind));
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.entry(node).parent else {
            return;
        };
        if self.focused.is_some_and(|focused| self.contains(node, focused)) {
            self.focused = None;
        }
        self.entry_mut(parent).children.retain(|child| *child != node);
        let entry = self.entry_mut(node);
        entry.parent = None;
        entry.removed = true;
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.entry(current).parent {
            current = parent;
        }
        !self.entry(current).removed
    }
}

impl Host for Document {
    fn create_element(&mut self, tag: &str) -> NodeId {
        self.stats.elements_created += 1;
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_owned(),
            ..ElementData::default()
        }))
    }

    fn create_text_node(&mut self, content: &str) -> NodeId {
        self.stats.texts_created += 1;
        self.push(NodeKind::Text(content.to_owned()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.entry_mut(parent).children.push(child);
        let entry = self.entry_mut(child);
        entry.parent = Some(parent);
        entry.removed = false;
    }

    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) {
        self.stats.replacements += 1;
        trace!(?parent, ?new_child, ?old_child, "replace child");
        self.detach(new_child);
        let Some(index) = self
            .entry(parent)
            .children
            .iter()
            .position(|child| *child == old_child)
        else {
            return;
        };
        if self.focused.is_some_and(|focused| self.contains(old_child, focused)) {
            self.focused = None;
        }
        self.entry_mut(parent).children[index] = new_child;
        let entry = self.entry_mut(new_child);
        entry.parent = Some(parent);
        entry.removed = false;
        let entry = self.entry_mut(old_child);
        entry.parent = None;
        entry.removed = true;
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.entry(child).parent == Some(parent) {
            self.stats.removals += 1;
            trace!(?parent, ?child, "remove child");
            self.detach(child);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entry(node).parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.entry(node).children.clone()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.entry(node).element().map(|data| data.tag.as_str())
    }

    fn text_content(&self, node: NodeId) -> Option<&str> {
        match &self.entry(node).kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            data.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            data.attributes.shift_remove(name);
            if name == "style" {
                data.styles.clear();
            }
        }
    }

    fn attribute_names(&self, node: NodeId) -> Vec<String> {
        self.entry(node).element().map_or_else(Vec::new, |data| {
            let mut names: Vec<String> = data.attributes.keys().cloned().collect();
            if !data.styles.is_empty() && !data.attributes.contains_key("style") {
                names.push("style".to_owned());
            }
            names
        })
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &Value) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            if name == "className" {
                let class = value.as_text().unwrap_or_default();
                data.attributes.insert("class".to_owned(), class);
            } else {
                data.properties.insert(name.to_owned(), value.clone());
            }
        }
    }

    fn set_style(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            if value.is_empty() {
                data.styles.shift_remove(name);
            } else {
                data.styles.insert(name.to_owned(), value.to_owned());
            }
        }
    }

    fn add_event_listener(&mut self, node: NodeId, event: &str, handler: &Handler) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            data.listeners.push((event.to_owned(), handler.clone()));
            self.stats.listeners_bound += 1;
        }
    }

    fn remove_event_listener(&mut self, node: NodeId, event: &str, handler: &Handler) {
        if let Some(data) = self.entry_mut(node).element_mut() {
            let before = data.listeners.len();
            data.listeners
                .retain(|(kind, bound)| !(kind == event && bound.ptr_eq(handler)));
            let removed = before - data.listeners.len();
            self.stats.listeners_unbound += removed;
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn focus(&mut self, node: NodeId) {
        if self.is_connected(node) {
            self.focused = Some(node);
        } else {
            trace!(?node, "ignoring focus on a removed node");
        }
    }
}
