/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Object keys keep the order they are written in. Negative numbers and other
/// multi-token expressions inside arrays or objects need parentheses.
///
/// # Examples
///
/// ```rust
/// use tost::{tost, Value};
///
/// let value = tost!({
///     "name": "Ada",
///     "tags": ["a", "b"],
///     "offset": (-3),
///     "meta": { "active": true, "note": null }
/// });
/// assert_eq!(value["offset"], Value::Int(-3));
/// assert_eq!(value["meta"]["note"], Value::Null);
/// ```
#[macro_export]
macro_rules! tost {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tost!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::tost!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression convertible into a Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
