//! The renderer: owner of the host, the node side-table and every component instance.

use std::collections::HashMap;
use std::rc::Rc;

use tidepool_core::{Handler, Host, InstanceId, NodeId, Props, Value};

use crate::config::RendererConfig;
use crate::lifecycle::Instance;
use crate::meta::NodeTable;

/// Turns virtual trees into live nodes on a [`Host`] and keeps them in sync.
///
/// Use [`RendererBuilder`](crate::RendererBuilder) to change the defaults.
///
/// ```rust
/// use tidepool::{Renderer, h, props};
/// use tidepool_memory::Document;
///
/// let mut renderer = Renderer::new(Document::new());
/// let root = renderer
///     .mount(&h("p", props! { "id" => "greeting" }, ["hello".into()]).into(), None)
///     .unwrap();
/// renderer
///     .patch(root, &h("p", props! { "id" => "greeting" }, ["bye".into()]).into(), None)
///     .unwrap();
/// assert_eq!(renderer.host().text(root), "bye");
/// ```
#[derive(Debug)]
pub struct Renderer<H> {
    pub(crate) host: H,
    pub(crate) config: RendererConfig,
    pub(crate) nodes: NodeTable,
    pub(crate) instances: HashMap<InstanceId, Instance>,
    next_instance: u64,
}

impl<H: Host> Renderer<H> {
    /// Creates a renderer with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RendererConfig::default())
    }

    /// Creates a renderer with an explicit configuration.
    pub fn with_config(host: H, config: RendererConfig) -> Self {
        Self {
            host,
            config,
            nodes: NodeTable::default(),
            instances: HashMap::new(),
            next_instance: 0,
        }
    }

    /// Returns the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably, for operations outside reconciliation such as moving focus.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the renderer, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Returns the reconciliation key recorded for `node`.
    pub fn key_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.key(node)
    }

    /// Returns the outermost component instance rooted at `node`.
    pub fn instance_of(&self, node: NodeId) -> Option<InstanceId> {
        self.nodes.instance(node)
    }

    /// Returns the handler currently bound on `node` for `event`.
    pub fn handler(&self, node: NodeId, event: &str) -> Option<&Handler> {
        self.nodes.handler(node, event)
    }

    /// Returns `true` while the instance is mounted.
    pub fn is_alive(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Returns the number of live component instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Returns the number of nodes carrying a key, a handler or a component back-reference.
    pub fn tracked_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an instance's current state.
    pub fn state(&self, id: InstanceId) -> Option<&Value> {
        self.instances.get(&id).map(Instance::state)
    }

    /// Returns an instance's current props.
    pub fn props(&self, id: InstanceId) -> Option<&Rc<Props>> {
        self.instances.get(&id).map(Instance::props)
    }

    /// Returns the root node of an instance's rendered output.
    pub fn base(&self, id: InstanceId) -> Option<NodeId> {
        self.instances.get(&id).and_then(Instance::base)
    }

    /// Returns the component instance nested directly inside `id`, when its output is another
    /// component.
    pub fn inner_instance(&self, id: InstanceId) -> Option<InstanceId> {
        self.instances.get(&id).and_then(Instance::inner)
    }

    pub(crate) const fn next_instance_id(&mut self) -> InstanceId {
        self.next_instance += 1;
        InstanceId::new(self.next_instance)
    }

    /// Instance lookup for ids the renderer itself just resolved.
    pub(crate) fn instance_mut(&mut self, id: InstanceId) -> &mut Instance {
        self.instances
            .get_mut(&id)
            .expect("component instance should be alive while the renderer works on it")
    }
}
