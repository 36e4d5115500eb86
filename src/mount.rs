//! Building live subtrees from virtual trees.

use tidepool_core::node::validate_tag;
use tidepool_core::{Error, Host, NodeId, NodeType, Result, VChild, VNode};
use tracing::trace;

use crate::Renderer;

impl<H: Host> Renderer<H> {
    /// Materializes `vchild` as a new live subtree, appending it to `parent` if given.
    ///
    /// Primitive children become text nodes; `true`, `false` and empty children become empty
    /// text nodes. Component nodes are instantiated and their lifecycle hooks run. Element
    /// nodes are attached to `parent` before their children are mounted and before their
    /// props are applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVirtualTree`] if the tree contains a nested child list or an
    /// invalid element tag.
    pub fn mount(&mut self, vchild: &VChild, parent: Option<NodeId>) -> Result<NodeId> {
        match vchild {
            VChild::Node(vnode) => self.mount_node(vnode, parent),
            VChild::List(items) => Err(Error::invalid(format!(
                "a nested list of {} children cannot be mounted",
                items.len()
            ))),
            primitive => {
                let text = primitive.text().unwrap_or_default();
                let node = self.host.create_text_node(&text);
                self.attach(node, parent);
                Ok(node)
            }
        }
    }

    pub(crate) fn mount_node(&mut self, vnode: &VNode, parent: Option<NodeId>) -> Result<NodeId> {
        match vnode.node_type() {
            NodeType::Component(ty) => self.mount_component(vnode, ty, parent),
            NodeType::Function(render) => {
                let output = render.call(&vnode.component_props());
                self.mount_node(&output, parent)
            }
            NodeType::Tag(tag) => self.mount_element(tag, vnode, parent),
        }
    }

    fn mount_element(
        &mut self,
        tag: &str,
        vnode: &VNode,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        validate_tag(tag)?;
        let element = self.host.create_element(tag);
        trace!(tag, ?element, "mounting element");
        self.attach(element, parent);
        for child in vnode.children() {
            self.mount(child, Some(element))?;
        }
        for (key, value) in vnode.props() {
            self.apply_prop(element, key, value);
        }
        Ok(element)
    }

    fn attach(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(parent) = parent {
            self.host.append_child(parent, node);
        }
    }
}
