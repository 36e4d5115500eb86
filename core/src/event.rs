//! Events delivered by a host to bound handlers.

use crate::NodeId;

/// An event dispatched by the host platform to a node's bound handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: String,
    target: NodeId,
}

impl Event {
    /// Creates a new event of the given kind targeting `target`.
    #[must_use]
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            target,
        }
    }

    /// Returns the lower-cased event name, e.g. `click`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the node the event was dispatched to.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }
}
