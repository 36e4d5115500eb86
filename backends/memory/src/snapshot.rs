//! Structural views of a live subtree.

use std::collections::BTreeMap;

/// A comparable copy of a live subtree.
///
/// Attribute, property and style maps are sorted, so two trees built through different
/// sequences of host calls compare equal whenever they look the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// A text node.
    Text(String),
    /// An element.
    Element {
        /// Element kind.
        tag: String,
        /// Generic attributes, including the reflected `class`.
        attributes: BTreeMap<String, String>,
        /// Direct properties with printable values.
        properties: BTreeMap<String, String>,
        /// The style surface.
        styles: BTreeMap<String, String>,
        /// Children, in order.
        children: Vec<Self>,
    },
}

impl Snapshot {
    /// Returns the element kind, or `None` for text.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// Returns the children of an element. Text has none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text(_) => &[],
        }
    }

    /// Returns a generic attribute of an element.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            Self::Text(_) => None,
        }
    }
}
