//! The component contract.
//!
//! Two kinds of component-typed nodes exist:
//!
//! - [`ComponentType`] - a constructor for a stateful [`Component`]. The renderer keeps one
//!   instance per mounted node, calls its lifecycle hooks, and re-renders it when its state
//!   changes or its parent re-renders.
//! - [`RenderFn`] - a pure function of props. It has no instance, no hooks and no state.

use core::any::{TypeId, type_name};
use core::fmt;
use std::rc::Rc;

use crate::{NodeId, Props, VNode, Value};

/// Handle to a live component instance owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Creates a new [`InstanceId`] from the raw value.
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

/// Read-only view of a component instance, handed to `render` and every hook.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    id: InstanceId,
    props: &'a Rc<Props>,
    state: &'a Value,
    base: Option<NodeId>,
}

impl<'a> Scope<'a> {
    /// Creates a scope over an instance's current props and state.
    #[must_use]
    pub const fn new(
        id: InstanceId,
        props: &'a Rc<Props>,
        state: &'a Value,
        base: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            props,
            state,
            base,
        }
    }

    /// Returns the instance handle, usable with the renderer's `set_state`.
    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Returns the current props, including `children`.
    #[must_use]
    pub const fn props(&self) -> &'a Rc<Props> {
        self.props
    }

    /// Looks up a single prop.
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&'a Value> {
        self.props.get(key)
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &'a Value {
        self.state
    }

    /// Returns the root node of the instance's last rendered output, once mounted.
    #[must_use]
    pub const fn base(&self) -> Option<NodeId> {
        self.base
    }
}

/// A stateful component.
///
/// Only [`Component::render`] is required. Hooks default to doing nothing, and
/// [`Component::should_update`] defaults to "props or state changed identity".
///
/// `render` and the hooks get no access to the renderer, so they cannot trigger updates
/// while an update is in progress.
pub trait Component: 'static {
    /// Produces the state an instance starts with.
    fn initial_state(&self, _props: &Props) -> Value {
        Value::Null
    }

    /// Describes the instance's output from its current props and state.
    fn render(&self, scope: &Scope<'_>) -> VNode;

    /// Called before the first render.
    fn will_mount(&mut self, _scope: &Scope<'_>) {}

    /// Called once the output subtree is mounted and linked as the instance's base.
    fn did_mount(&mut self, _scope: &Scope<'_>) {}

    /// Called before a parent re-render overwrites the instance's props.
    fn will_receive_props(&mut self, _scope: &Scope<'_>, _next_props: &Rc<Props>) {}

    /// Decides whether a state change re-renders the instance.
    fn should_update(&self, scope: &Scope<'_>, next_props: &Rc<Props>, next_state: &Value) -> bool {
        !Rc::ptr_eq(scope.props(), next_props) || !scope.state().same(next_state)
    }

    /// Called before an accepted state update is committed.
    fn will_update(&mut self, _scope: &Scope<'_>, _next_props: &Rc<Props>, _next_state: &Value) {}

    /// Called after an accepted state update has been rendered and patched.
    fn did_update(&mut self, _scope: &Scope<'_>, _prev_props: &Rc<Props>, _prev_state: &Value) {}

    /// Called once, before the instance's node is detached from the tree.
    fn will_unmount(&mut self, _scope: &Scope<'_>) {}
}

type Construct = dyn Fn(&Props) -> Box<dyn Component>;

/// Constructor capability for a stateful component.
///
/// Two component types are the same if they construct the same Rust type.
#[derive(Clone)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
    construct: Rc<Construct>,
}

impl ComponentType {
    /// Creates a component type from a constructor.
    pub fn new<C: Component>(construct: impl Fn(&Props) -> C + 'static) -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            construct: Rc::new(move |props: &Props| -> Box<dyn Component> {
                Box::new(construct(props))
            }),
        }
    }

    /// Creates a component type whose instances start from [`Default`].
    #[must_use]
    pub fn of<C: Component + Default>() -> Self {
        Self::new(|_| C::default())
    }

    /// Constructs a fresh instance with the given props.
    #[must_use]
    pub fn construct(&self, props: &Props) -> Box<dyn Component> {
        (self.construct)(props)
    }

    /// Returns `true` if both types construct the same component.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns the component's type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}

/// A pure render function: props in, output tree out.
#[derive(Clone)]
pub struct RenderFn(Rc<dyn Fn(&Props) -> VNode>);

impl_debug!(RenderFn);

impl RenderFn {
    /// Wraps a closure as a render function.
    pub fn new(f: impl Fn(&Props) -> VNode + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the function.
    #[must_use]
    pub fn call(&self, props: &Props) -> VNode {
        (self.0)(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::h;

    #[derive(Default)]
    struct Label;

    impl Component for Label {
        fn render(&self, scope: &Scope<'_>) -> VNode {
            let text = scope.prop("text").and_then(Value::as_text).unwrap_or_default();
            h("span", Props::new(), [text.into()])
        }
    }

    #[derive(Default)]
    struct Other;

    impl Component for Other {
        fn render(&self, _scope: &Scope<'_>) -> VNode {
            h("div", Props::new(), [])
        }
    }

    #[test]
    fn component_types_compare_by_rust_type() {
        assert!(ComponentType::of::<Label>().is_same(&ComponentType::new(|_| Label)));
        assert!(!ComponentType::of::<Label>().is_same(&ComponentType::of::<Other>()));
    }

    #[test]
    fn default_should_update_compares_identity() {
        let label = Label;
        let props = Rc::new(props! { "text" => "a" });
        let state = Value::from(props! { "n" => 1 });
        let scope = Scope::new(InstanceId::new(1), &props, &state, None);

        assert!(!label.should_update(&scope, &props, &state.clone()));
        assert!(label.should_update(&scope, &props, &Value::from(props! { "n" => 1 })));
        assert!(label.should_update(&scope, &Rc::new(props! { "text" => "a" }), &state));
    }
}
