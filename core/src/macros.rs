/// Implements a basic `Debug` trait for types using their type name.
///
/// Used for callback wrappers whose contents cannot be printed.
macro_rules! impl_debug {
    ($ty:ty) => {
        impl core::fmt::Debug for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(core::any::type_name::<Self>())
            }
        }
    };
}

/// Builds a [`Props`](crate::Props) map, preserving the order in which entries are written.
///
/// # Usage
///
/// ```rust
/// use tidepool_core::{Value, props};
///
/// let props = props! { "key" => "a", "class" => "item", "tabindex" => 2 };
/// assert_eq!(props.get("class").and_then(Value::as_str), Some("item"));
/// assert_eq!(props.keys().next().map(String::as_str), Some("key"));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(
            props.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        props
    }};
}
