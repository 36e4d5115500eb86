//! Callback wrappers carried inside props.
//!
//! - [`Handler`] - an event callback, bound to a node through an `on*` prop
//! - [`NodeRef`] - a `ref` callback, invoked once with the node it was applied to
//!
//! Both are reference counted so that cloning a prop map never clones the closure, and both
//! compare by pointer identity: two handlers are "the same" only if they share an allocation.

use std::rc::Rc;

use crate::{Event, NodeId};

/// An event callback.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl_debug!(Handler);

impl Handler {
    /// Wraps a closure as an event handler.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the handler with the given event.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// Returns `true` if both handlers share the same closure allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A callback receiving the live node a `ref` prop was applied to.
#[derive(Clone)]
pub struct NodeRef(Rc<dyn Fn(NodeId)>);

impl_debug!(NodeRef);

impl NodeRef {
    /// Wraps a closure as a ref callback.
    pub fn new(f: impl Fn(NodeId) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the callback with `node`.
    pub fn call(&self, node: NodeId) {
        (self.0)(node);
    }

    /// Returns `true` if both callbacks share the same closure allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn handler_identity_follows_allocation() {
        let a = Handler::new(|_| {});
        let b = a.clone();
        let c = Handler::new(|_| {});
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn node_ref_receives_node() {
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let node_ref = NodeRef::new(move |node| sink.set(Some(node)));
        node_ref.call(NodeId::new(7));
        assert_eq!(seen.get(), Some(NodeId::new(7)));
    }
}
