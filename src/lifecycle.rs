//! Component instances and their lifecycle.
//!
//! A component whose output is itself a component forms a chain: the outer instance links
//! to the inner one through `inner`, and every instance in the chain shares the same base
//! node. The node's back-reference always names the outermost instance.

use core::fmt;
use std::rc::Rc;

use tidepool_core::{
    Component, ComponentType, Host, InstanceId, NodeId, Props, Result, Scope, VChild, VNode,
    Value,
};
use tracing::{debug, debug_span, trace, warn};

use crate::Renderer;

pub(crate) struct Instance {
    id: InstanceId,
    ty: ComponentType,
    component: Box<dyn Component>,
    props: Rc<Props>,
    state: Value,
    base: Option<NodeId>,
    outer: Option<InstanceId>,
    inner: Option<InstanceId>,
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("type", &self.ty.name())
            .field("state", &self.state)
            .field("base", &self.base)
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl Instance {
    fn new(id: InstanceId, ty: ComponentType, props: Rc<Props>) -> Self {
        let component = ty.construct(&props);
        let state = component.initial_state(&props);
        Self {
            id,
            ty,
            component,
            props,
            state,
            base: None,
            outer: None,
            inner: None,
        }
    }

    pub(crate) const fn state(&self) -> &Value {
        &self.state
    }

    pub(crate) const fn props(&self) -> &Rc<Props> {
        &self.props
    }

    pub(crate) const fn base(&self) -> Option<NodeId> {
        self.base
    }

    pub(crate) const fn inner(&self) -> Option<InstanceId> {
        self.inner
    }

    fn hook(&mut self, f: impl FnOnce(&mut dyn Component, &Scope<'_>)) {
        let scope = Scope::new(self.id, &self.props, &self.state, self.base);
        f(self.component.as_mut(), &scope);
    }

    fn render(&self) -> VNode {
        self.component
            .render(&Scope::new(self.id, &self.props, &self.state, self.base))
    }

    fn should_update(&self, next_props: &Rc<Props>, next_state: &Value) -> bool {
        self.component.should_update(
            &Scope::new(self.id, &self.props, &self.state, self.base),
            next_props,
            next_state,
        )
    }
}

impl<H: Host> Renderer<H> {
    /// Requests a state change for a mounted component.
    ///
    /// Map states are merged shallowly; any other state is replaced. If the component's
    /// `should_update` accepts the change, the component re-renders and its output is
    /// reconciled against its current base node. A rejected change is still stored.
    ///
    /// Updates for instances that were never mounted or are already gone are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`tidepool_core::Error::InvalidVirtualTree`] if the new render output
    /// cannot be mounted.
    pub fn set_state(&mut self, id: InstanceId, next: impl Into<Value>) -> Result<()> {
        let next = next.into();
        let _span = debug_span!("tidepool::set_state", instance = id.raw()).entered();

        let Some(instance) = self.instances.get_mut(&id) else {
            warn!(instance = id.raw(), "state update for an unknown instance ignored");
            return Ok(());
        };

        let Some(base) = instance.base else {
            trace!("instance has no base yet; storing state");
            instance.state = Value::merged(&instance.state, next);
            return Ok(());
        };

        let props = instance.props.clone();
        if !instance.should_update(&props, &next) {
            trace!("update rejected; storing state without re-rendering");
            instance.state = Value::merged(&instance.state, next);
            return Ok(());
        }

        instance.hook(|component, scope| component.will_update(scope, &props, &next));
        let previous = instance.state.clone();
        instance.state = Value::merged(&previous, next);
        let output = instance.render();

        let parent = self.host.parent(base);
        let node = self.reconcile(base, &VChild::Node(output), parent, Some(id))?;
        self.rebase(id, node);

        if let Some(instance) = self.instances.get_mut(&id) {
            instance.hook(|component, scope| component.did_update(scope, &props, &previous));
        }
        Ok(())
    }

    pub(crate) fn mount_component(
        &mut self,
        vnode: &VNode,
        ty: &ComponentType,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        let id = self.next_instance_id();
        debug!(component = ty.name(), instance = id.raw(), "mounting component");
        self.instances
            .insert(id, Instance::new(id, ty.clone(), vnode.component_props()));

        let instance = self.instance_mut(id);
        instance.hook(|component, scope| component.will_mount(scope));
        let output = instance.render();

        let node = match self.mount_node(&output, parent) {
            Ok(node) => node,
            Err(error) => {
                // Instances are numbered in mount order, so everything from `id` on belongs
                // to the abandoned output.
                self.instances.retain(|other, _| *other < id);
                return Err(error);
            }
        };
        if let Some(inner) = self.nodes.instance(node) {
            self.link(id, inner);
        }
        self.instance_mut(id).base = Some(node);
        self.nodes.set_instance(node, Some(id));
        self.nodes.set_key(node, vnode.key());

        self.instance_mut(id)
            .hook(|component, scope| component.did_mount(scope));
        Ok(node)
    }

    /// Reconciles a component vnode against `node`.
    ///
    /// The existing instance is reused when it has the same component type; its props are
    /// replaced and it re-renders unconditionally. Otherwise the node is replaced by a
    /// freshly mounted component.
    pub(crate) fn patch_component(
        &mut self,
        node: NodeId,
        vnode: &VNode,
        ty: &ComponentType,
        parent: Option<NodeId>,
        owner: Option<InstanceId>,
    ) -> Result<NodeId> {
        let reusable = self
            .candidate(node, owner)
            .filter(|id| self.instances.get(id).is_some_and(|c| c.ty.is_same(ty)));
        let Some(id) = reusable else {
            debug!(component = ty.name(), "component type changed; replacing");
            return self.replace(node, &VChild::Node(vnode.clone()), parent, owner);
        };

        trace!(component = ty.name(), instance = id.raw(), "receiving props");
        let props = vnode.component_props();
        let instance = self.instance_mut(id);
        instance.hook(|component, scope| component.will_receive_props(scope, &props));
        instance.props = props;
        let output = instance.render();

        let result = self.reconcile(node, &VChild::Node(output), parent, Some(id))?;
        self.rebase(id, result);
        Ok(result)
    }

    /// The instance that currently renders into `node` at this level of a chain.
    pub(crate) fn candidate(&self, node: NodeId, owner: Option<InstanceId>) -> Option<InstanceId> {
        match owner {
            Some(owner) => self.instances.get(&owner).and_then(|o| o.inner),
            None => self.nodes.instance(node),
        }
    }

    /// Drops the candidate chain when `node` is about to be reused for plain output.
    pub(crate) fn release_candidate(&mut self, node: NodeId, owner: Option<InstanceId>) {
        let Some(candidate) = self.candidate(node, owner) else {
            return;
        };
        debug!(instance = candidate.raw(), "component output became a plain node");
        self.release_chain(candidate);
        self.detach_candidate(node, owner);
    }

    pub(crate) fn detach_candidate(&mut self, node: NodeId, owner: Option<InstanceId>) {
        match owner {
            Some(owner) => {
                if let Some(owner) = self.instances.get_mut(&owner) {
                    owner.inner = None;
                }
            }
            None => self.nodes.set_instance(node, None),
        }
    }

    /// Forgets `id` and every instance nested inside it, without notifying them.
    pub(crate) fn release_chain(&mut self, id: InstanceId) {
        let mut current = Some(id);
        while let Some(id) = current {
            current = self.instances.remove(&id).and_then(|instance| instance.inner);
        }
    }

    /// Points `id` and its outer instances at `node` after a re-render.
    ///
    /// When the output root was replaced, the instance freshly mounted at the new node
    /// (if any) becomes `id`'s inner instance, and the node's back-reference is moved to
    /// the outermost instance of the chain.
    pub(crate) fn rebase(&mut self, id: InstanceId, node: NodeId) {
        let Some(instance) = self.instances.get(&id) else {
            return;
        };
        if instance.base == Some(node) {
            return;
        }
        if let Some(inner) = self.nodes.instance(node).filter(|inner| *inner != id) {
            self.link(id, inner);
        }

        let mut outermost = id;
        let mut current = Some(id);
        while let Some(cursor) = current {
            let Some(instance) = self.instances.get_mut(&cursor) else {
                break;
            };
            instance.base = Some(node);
            outermost = cursor;
            current = instance.outer;
        }
        trace!(instance = id.raw(), ?node, "rebased");
        self.nodes.set_instance(node, Some(outermost));
    }

    fn link(&mut self, outer: InstanceId, inner: InstanceId) {
        self.instance_mut(outer).inner = Some(inner);
        if let Some(instance) = self.instances.get_mut(&inner) {
            instance.outer = Some(outer);
        }
    }

    /// Collects the instances rooted in `node`'s subtree, outer before inner, in document order.
    pub(crate) fn instances_within(&self, node: NodeId) -> Vec<InstanceId> {
        let mut found = Vec::new();
        self.collect_instances(node, &mut found);
        found
    }

    fn collect_instances(&self, node: NodeId, found: &mut Vec<InstanceId>) {
        let mut current = self.nodes.instance(node);
        while let Some(id) = current {
            found.push(id);
            current = self.instances.get(&id).and_then(|instance| instance.inner);
        }
        for child in self.host.children(node) {
            self.collect_instances(child, found);
        }
    }

    pub(crate) fn notify_unmount(&mut self, ids: &[InstanceId]) {
        for id in ids {
            if let Some(instance) = self.instances.get_mut(id) {
                debug!(component = instance.ty.name(), instance = id.raw(), "unmounting");
                instance.hook(|component, scope| component.will_unmount(scope));
            }
        }
    }
}
