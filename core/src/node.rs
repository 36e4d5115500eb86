//! Immutable virtual nodes.
//!
//! A [`VNode`] describes "what should exist": a [`NodeType`], a prop map and an ordered list
//! of [`VChild`]ren. Nodes are cheap to clone and never change after construction.

use std::rc::Rc;

use crate::value::format_number;
use crate::{ComponentType, Error, Props, RenderFn, Result, Value};

/// What a [`VNode`] materializes as.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// A native element kind, such as `div`.
    Tag(Rc<str>),
    /// A stateful component.
    Component(ComponentType),
    /// A pure render function.
    Function(RenderFn),
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        Self::Tag(Rc::from(value))
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        Self::Tag(Rc::from(value))
    }
}

impl From<ComponentType> for NodeType {
    fn from(value: ComponentType) -> Self {
        Self::Component(value)
    }
}

impl From<RenderFn> for NodeType {
    fn from(value: RenderFn) -> Self {
        Self::Function(value)
    }
}

/// An immutable virtual node.
#[derive(Debug, Clone)]
pub struct VNode {
    node_type: NodeType,
    props: Rc<Props>,
    children: Rc<[VChild]>,
}

impl VNode {
    /// Creates a node from already flattened children.
    ///
    /// Prefer [`h`], which flattens nested child lists.
    #[must_use]
    pub fn new(node_type: NodeType, props: Props, children: Vec<VChild>) -> Self {
        Self {
            node_type,
            props: Rc::new(props),
            children: Rc::from(children),
        }
    }

    /// Returns the node's type.
    #[must_use]
    pub const fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Returns the node's props.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Returns the node's children.
    #[must_use]
    pub fn children(&self) -> &[VChild] {
        &self.children
    }

    /// Returns the explicit reconciliation key, if the `key` prop is set to a truthy value.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        self.props
            .get("key")
            .filter(|key| key.is_truthy())
            .and_then(Value::as_text)
    }

    /// Builds the props a component sees: the node's props plus `children`.
    ///
    /// A fresh map is allocated on every call, so two calls never yield the [`same`] props.
    ///
    /// [`same`]: Value::same
    #[must_use]
    pub fn component_props(&self) -> Rc<Props> {
        let mut props = Props::clone(&self.props);
        props.insert("children".to_owned(), Value::Children(self.children.clone()));
        Rc::new(props)
    }
}

/// One entry in a node's child list.
#[derive(Debug, Clone, Default)]
pub enum VChild {
    /// A nested node.
    Node(VNode),
    /// Text content.
    Text(Rc<str>),
    /// A number, rendered as text.
    Number(f64),
    /// A boolean, rendered as an empty placeholder.
    Bool(bool),
    /// Nothing, rendered as an empty placeholder.
    #[default]
    Empty,
    /// A list of children. [`h`] flattens one level of lists; deeper nesting is invalid.
    List(Vec<Self>),
}

impl VChild {
    /// Returns the text a primitive child renders as, or `None` for nodes and lists.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.to_string()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Bool(_) | Self::Empty => Some(String::new()),
            Self::Node(_) | Self::List(_) => None,
        }
    }

    /// Returns the node if this child is one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&VNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the explicit reconciliation key of a node child.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        self.as_node().and_then(VNode::key)
    }
}

impl From<VNode> for VChild {
    fn from(value: VNode) -> Self {
        Self::Node(value)
    }
}

impl From<&str> for VChild {
    fn from(value: &str) -> Self {
        Self::Text(Rc::from(value))
    }
}

impl From<String> for VChild {
    fn from(value: String) -> Self {
        Self::Text(Rc::from(value))
    }
}

impl From<f64> for VChild {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for VChild {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for VChild {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for VChild {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Self>> From<Option<T>> for VChild {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl From<Vec<Self>> for VChild {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

/// Creates a virtual node.
///
/// Children that are themselves lists are flattened one level.
///
/// ```rust
/// use tidepool_core::{VChild, h, props};
///
/// let items: Vec<VChild> = vec!["a".into(), "b".into()];
/// let list = h("ul", props! { "class" => "menu" }, [items.into(), "c".into()]);
/// assert_eq!(list.children().len(), 3);
/// ```
pub fn h(
    node_type: impl Into<NodeType>,
    props: Props,
    children: impl IntoIterator<Item = VChild>,
) -> VNode {
    let mut flat = Vec::new();
    for child in children {
        match child {
            VChild::List(items) => flat.extend(items),
            other => flat.push(other),
        }
    }
    VNode::new(node_type.into(), props, flat)
}

/// Checks that `tag` names a native element kind.
///
/// # Errors
///
/// Returns [`Error::InvalidVirtualTree`] for empty names and names containing whitespace,
/// angle brackets or slashes.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(Error::invalid("element tag name is empty"));
    }
    if tag
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/'))
    {
        return Err(Error::invalid(format!("`{tag}` is not an element tag name")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_flattens_one_level() {
        let nested: Vec<VChild> = vec![VChild::List(vec!["deep".into()])];
        let node = h(
            "div",
            Props::new(),
            [
                "a".into(),
                VChild::List(vec!["b".into(), "c".into()]),
                nested.into(),
            ],
        );

        assert_eq!(node.children().len(), 4);
        assert!(matches!(node.children()[3], VChild::List(_)));
    }

    #[test]
    fn falsy_keys_fall_back_to_position() {
        assert_eq!(h("li", props! { "key" => "x" }, []).key().as_deref(), Some("x"));
        assert_eq!(h("li", props! { "key" => 7 }, []).key().as_deref(), Some("7"));
        assert_eq!(h("li", props! { "key" => "" }, []).key(), None);
        assert_eq!(h("li", props! { "key" => 0 }, []).key(), None);
        assert_eq!(VChild::from("text").key(), None);
    }

    #[test]
    fn component_props_carry_children_and_are_fresh() {
        let node = h("x", props! { "title" => "t" }, ["child".into()]);
        let first = node.component_props();
        let second = node.component_props();

        assert_eq!(first.get("children").and_then(Value::as_children).map(<[_]>::len), Some(1));
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn primitive_text() {
        assert_eq!(VChild::from(3).text().as_deref(), Some("3"));
        assert_eq!(VChild::from(true).text().as_deref(), Some(""));
        assert_eq!(VChild::Empty.text().as_deref(), Some(""));
        assert_eq!(VChild::from(h("p", Props::new(), [])).text(), None);
    }

    #[test]
    fn tag_validation() {
        assert!(validate_tag("div").is_ok());
        assert!(validate_tag("my-widget").is_ok());
        assert!(validate_tag("").is_err());
        assert!(validate_tag("two words").is_err());
        assert!(validate_tag("<p>").is_err());
    }
}
