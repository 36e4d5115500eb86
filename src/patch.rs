//! Reconciling live subtrees against new virtual trees.
//!
//! Children are matched by key. A child without an explicit key gets a positional one, so
//! unkeyed lists reconcile index by index. Matched live nodes are reconciled in place and
//! re-appended in the new order; unmatched ones are removed. A node whose kind no longer
//! fits the new description is replaced wholesale.

use indexmap::IndexMap;
use tidepool_core::{Host, InstanceId, NodeId, NodeType, Result, VChild, VNode};
use tracing::{debug, debug_span, trace};

use crate::Renderer;

impl<H: Host> Renderer<H> {
    /// Makes the live subtree at `node` match `next`, returning the node now standing in
    /// its place.
    ///
    /// The result is `node` itself when it could be reused, or a fresh node that has taken
    /// its position under `parent`. `parent` defaults to the host parent of `node`; with no
    /// parent at all, a replacement is returned detached.
    ///
    /// # Errors
    ///
    /// Returns [`tidepool_core::Error::InvalidVirtualTree`] if part of `next` has to be
    /// mounted and is invalid. Changes made before the error are not rolled back.
    pub fn patch(&mut self, node: NodeId, next: &VChild, parent: Option<NodeId>) -> Result<NodeId> {
        let parent = parent.or_else(|| self.host.parent(node));
        self.reconcile(node, next, parent, None)
    }

    /// Detaches `node` from its parent and forgets it.
    ///
    /// Every component instance rooted in the subtree receives `will_unmount` first, outer
    /// components before inner ones and in document order.
    pub fn unmount(&mut self, node: NodeId) {
        let doomed = self.instances_within(node);
        self.notify_unmount(&doomed);
        self.host.remove(node);
        for id in doomed {
            self.instances.remove(&id);
        }
        self.forget_nodes(node);
    }

    /// `owner` is the component whose re-render produced `next`. It is `None` when `next`
    /// came from a parent element's child list.
    pub(crate) fn reconcile(
        &mut self,
        node: NodeId,
        next: &VChild,
        parent: Option<NodeId>,
        owner: Option<InstanceId>,
    ) -> Result<NodeId> {
        let Some(vnode) = next.as_node() else {
            return self.reconcile_primitive(node, next, parent, owner);
        };
        match vnode.node_type() {
            NodeType::Component(ty) => self.patch_component(node, vnode, ty, parent, owner),
            NodeType::Function(render) => {
                let output = render.call(&vnode.component_props());
                self.reconcile(node, &VChild::Node(output), parent, owner)
            }
            NodeType::Tag(tag) => {
                let same_kind = self
                    .host
                    .tag_name(node)
                    .is_some_and(|current| current.eq_ignore_ascii_case(tag));
                if same_kind {
                    self.release_candidate(node, owner);
                    self.reconcile_element(node, vnode)
                } else {
                    debug!(tag = &**tag, ?node, "node kind changed; replacing");
                    self.replace(node, next, parent, owner)
                }
            }
        }
    }

    fn reconcile_primitive(
        &mut self,
        node: NodeId,
        next: &VChild,
        parent: Option<NodeId>,
        owner: Option<InstanceId>,
    ) -> Result<NodeId> {
        let unchanged = match (next.text(), self.host.text_content(node)) {
            (Some(text), Some(current)) => text == current,
            _ => false,
        };
        if unchanged {
            trace!(?node, "text unchanged");
            self.release_candidate(node, owner);
            return Ok(node);
        }
        self.replace(node, next, parent, owner)
    }

    fn reconcile_element(&mut self, element: NodeId, vnode: &VNode) -> Result<NodeId> {
        let _span = debug_span!("tidepool::patch", ?element).entered();
        let focused = if self.config.restore_focus {
            self.host.focused()
        } else {
            None
        };

        let mut pool: IndexMap<String, NodeId> = IndexMap::new();
        let mut stale = Vec::new();
        for (index, child) in self.host.children(element).into_iter().enumerate() {
            let key = self
                .nodes
                .key(child)
                .map_or_else(|| self.config.index_key(index), str::to_owned);
            if let Some(displaced) = pool.insert(key, child) {
                trace!(?displaced, "duplicate key; dropping earlier node");
                stale.push(displaced);
            }
        }

        for (index, child) in vnode.children().iter().enumerate() {
            let key = child
                .key()
                .unwrap_or_else(|| self.config.index_key(index));
            let node = if let Some(existing) = pool.shift_remove(&key) {
                trace!(%key, ?existing, "reusing child");
                self.reconcile(existing, child, Some(element), None)?
            } else {
                trace!(%key, "mounting child");
                self.mount(child, None)?
            };
            self.host.append_child(element, node);
        }

        stale.extend(pool.into_values());
        for node in stale {
            trace!(?node, "removing unmatched child");
            self.unmount(node);
        }

        self.reset_props(element, vnode.props());

        if let Some(focused) = focused {
            self.host.focus(focused);
        }
        Ok(element)
    }

    /// Mounts `next` and puts it where `old` stands under `parent`.
    ///
    /// Instances at and below the candidate are dropped without `will_unmount`; the old
    /// subtree's metadata is purged. The replacement inherits `old`'s key if it has none;
    /// a component's output root always takes over `old`'s key.
    pub(crate) fn replace(
        &mut self,
        old: NodeId,
        next: &VChild,
        parent: Option<NodeId>,
        owner: Option<InstanceId>,
    ) -> Result<NodeId> {
        let node = self.mount(next, None)?;
        if let Some(parent) = parent {
            self.host.replace_child(parent, node, old);
        }
        debug!(?old, ?node, "replaced node");

        if let Some(candidate) = self.candidate(old, owner) {
            self.release_chain(candidate);
            self.detach_candidate(old, owner);
        }
        let key = self.nodes.remove(old).and_then(|meta| meta.key);
        for child in self.host.children(old) {
            self.forget(child);
        }
        if owner.is_some() {
            // A component root answers to the component's key, never its output's.
            self.nodes.set_key(node, key);
        } else if let Some(key) = key
            && self.nodes.key(node).is_none()
        {
            self.nodes.set_key(node, Some(key));
        }
        Ok(node)
    }

    /// Drops every instance and metadata entry of a detached subtree, silently.
    fn forget(&mut self, node: NodeId) {
        for id in self.instances_within(node) {
            self.instances.remove(&id);
        }
        self.forget_nodes(node);
    }

    fn forget_nodes(&mut self, node: NodeId) {
        self.nodes.remove(node);
        for child in self.host.children(node) {
            self.forget_nodes(child);
        }
    }
}
