//! Prop and state values.
//!
//! [`Value`] is deliberately small: primitives the host can print, shared mappings and lists,
//! and the two callback kinds props may carry. Shared variants are reference counted, which
//! gives every value a cheap clone and a meaningful notion of identity (see [`Value::same`]).

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{Handler, NodeRef, VChild};

/// An insertion-ordered mapping from prop names to values.
///
/// Iteration order is the order in which props are applied to a host node.
pub type Props = IndexMap<String, Value>;

/// A prop or state value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent or empty.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Str(Rc<str>),
    /// A shared mapping, used for style objects and mapping-typed state.
    Map(Rc<Props>),
    /// A shared list.
    List(Rc<[Self]>),
    /// An event callback.
    Handler(Handler),
    /// A ref callback.
    Ref(NodeRef),
    /// The children of a component node, as handed to the component under `children`.
    Children(Rc<[VChild]>),
}

impl Value {
    /// Compares two values by identity.
    ///
    /// Primitives compare by value, shared variants by allocation. Two separately built maps
    /// with equal contents are *not* the same value.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Children(a), Self::Children(b)) => Rc::ptr_eq(a, b),
            (Self::Handler(a), Self::Handler(b)) => a.ptr_eq(b),
            (Self::Ref(a), Self::Ref(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Returns `true` if the value is a mapping.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `false` for `Null`, `false`, `0`, `NaN` and the empty string.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Str(value) => !value.is_empty(),
            _ => true,
        }
    }

    /// Stringifies a primitive value. Returns `None` for everything else.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Bool(value) => Some(value.to_string()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Str(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the mapping if this is a [`Value::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the children if this is a [`Value::Children`].
    #[must_use]
    pub fn as_children(&self) -> Option<&[VChild]> {
        match self {
            Self::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Looks up `key` if this is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Combines the current state with a proposed update.
    ///
    /// When both sides are mappings the result is a fresh mapping holding every entry of
    /// `current` overwritten by the entries of `next`. Otherwise `next` replaces `current`.
    #[must_use]
    pub fn merged(current: &Self, next: Self) -> Self {
        match (current, next) {
            (Self::Map(current), Self::Map(next)) => {
                let mut merged = Props::clone(current);
                for (key, value) in next.iter() {
                    merged.insert(key.clone(), value.clone());
                }
                Self::Map(Rc::new(merged))
            }
            (_, next) => next,
        }
    }
}

/// Formats a number the way hosts print them: integral values without a fractional part.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(value) => write!(f, "Bool({value})"),
            Self::Number(value) => write!(f, "Number({value})"),
            Self::Str(value) => write!(f, "Str({value:?})"),
            Self::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Self::List(list) => f.debug_list().entries(list.iter()).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Ref(_) => f.write_str("Ref(..)"),
            Self::Children(children) => write!(f, "Children({})", children.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<Props> for Value {
    fn from(value: Props) -> Self {
        Self::Map(Rc::new(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(Rc::from(value))
    }
}

impl From<Handler> for Value {
    fn from(value: Handler) -> Self {
        Self::Handler(value)
    }
}

impl From<NodeRef> for Value {
    fn from(value: NodeRef) -> Self {
        Self::Ref(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_like_host_numbers() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn identity_is_by_value_for_primitives_and_by_pointer_for_maps() {
        assert!(Value::from("a").same(&Value::from("a")));
        assert!(Value::from(3).same(&Value::from(3.0)));

        let map = Value::from(props! { "a" => 1 });
        assert!(map.same(&map.clone()));
        assert!(!map.same(&Value::from(props! { "a" => 1 })));
    }

    #[test]
    fn merging_maps_is_shallow_and_preserves_untouched_keys() {
        let current = Value::from(props! { "count" => 1, "label" => "x" });
        let merged = Value::merged(&current, Value::from(props! { "count" => 2 }));

        assert_eq!(merged.get("count").and_then(Value::as_number), Some(2.0));
        assert_eq!(merged.get("label").and_then(Value::as_str), Some("x"));
        assert!(!merged.same(&current));
    }

    #[test]
    fn merging_non_maps_replaces() {
        let current = Value::from(props! { "count" => 1 });
        let merged = Value::merged(&current, Value::from(5));
        assert_eq!(merged.as_number(), Some(5.0));

        let merged = Value::merged(&Value::Null, Value::from(props! { "a" => 1 }));
        assert!(merged.is_map());
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(Value::from("k").is_truthy());
        assert!(Value::from(props! {}).is_truthy());
    }
}
