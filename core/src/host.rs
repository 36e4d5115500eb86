//! The host adapter contract.
//!
//! A host owns the platform's native element tree. The renderer never touches native nodes
//! directly; it drives the host through the [`Host`] capability set and refers to nodes by
//! opaque [`NodeId`] handles minted by the host. The host is passive: it never calls back
//! into the renderer.

use crate::{Handler, Value};

/// Opaque handle to a live native node, minted by a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new [`NodeId`] from the raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value backing this identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Capabilities a platform adapter provides to the renderer.
///
/// Text nodes report `None` from [`Host::tag_name`]. Tree operations follow DOM semantics:
/// inserting a node that is already attached moves it.
pub trait Host {
    /// Creates a detached native element of kind `tag`.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Creates a detached text node.
    fn create_text_node(&mut self, content: &str) -> NodeId;

    /// Appends `child` as the last child of `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Puts `new_child` in the position `old_child` occupies under `parent`.
    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId);

    /// Detaches `child` from `parent`.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Detaches `node` from its parent, if it has one.
    fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.remove_child(parent, node);
        }
    }

    /// Returns the parent of `node`.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Returns the children of `node`, in order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Returns the element kind of `node`, or `None` for text nodes.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Returns the content of a text node, or `None` for elements.
    fn text_content(&self, node: NodeId) -> Option<&str>;

    /// Sets a generic string attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Removes a generic attribute.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Lists the names of the attributes currently present on `node`.
    fn attribute_names(&self, node: NodeId) -> Vec<String>;

    /// Sets a direct property such as `value` or `checked`, bypassing attributes.
    fn set_property(&mut self, node: NodeId, name: &str, value: &Value);

    /// Merges one entry onto the node's style surface.
    fn set_style(&mut self, node: NodeId, name: &str, value: &str);

    /// Binds `handler` for events of kind `event`.
    fn add_event_listener(&mut self, node: NodeId, event: &str, handler: &Handler);

    /// Unbinds a handler previously bound with [`Host::add_event_listener`].
    fn remove_event_listener(&mut self, node: NodeId, event: &str, handler: &Handler);

    /// Returns the currently focused node.
    fn focused(&self) -> Option<NodeId>;

    /// Moves focus to `node`.
    fn focus(&mut self, node: NodeId);

    /// Returns `true` if `node` is a text node.
    fn is_text(&self, node: NodeId) -> bool {
        self.tag_name(node).is_none()
    }
}
