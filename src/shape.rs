//! Array shape classification.
//!
//! Every array is encoded in one of four layouts. The choice is a pure
//! function of the array's contents, evaluated in priority order:
//!
//! 1. [`ArrayShape::Empty`]: no elements, `key[0]:`
//! 2. [`ArrayShape::Inline`]: only scalars, `key[3]: a,b,c`
//! 3. [`ArrayShape::Tabular`]: objects sharing one ordered list of keys, all
//!    values scalar, `key[2]{id,name}:` followed by one row per object
//! 4. [`ArrayShape::List`]: everything else, one `- ` item per element
//!
//! ## Examples
//!
//! ```rust
//! use tost::shape::{classify, ArrayShape};
//! use tost::tost;
//!
//! let rows = tost!([{ "id": 1, "name": "a" }, { "id": 2, "name": "b" }]);
//! assert_eq!(
//!     classify(rows.as_array().unwrap()),
//!     ArrayShape::Tabular { columns: vec!["id", "name"] }
//! );
//! ```

use crate::Value;

/// The layout chosen for one array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayShape<'a> {
    Empty,
    Inline,
    /// Column names in the shared key order of the elements.
    Tabular { columns: Vec<&'a str> },
    List,
}

/// Picks the layout for `items`.
#[must_use]
pub fn classify(items: &[Value]) -> ArrayShape<'_> {
    if items.is_empty() {
        return ArrayShape::Empty;
    }

    if items.iter().all(Value::is_scalar) {
        return ArrayShape::Inline;
    }

    match tabular_columns(items) {
        Some(columns) => ArrayShape::Tabular { columns },
        None => ArrayShape::List,
    }
}

/// Returns the shared column list if every element is an object with the same
/// non-empty ordered keys and only scalar values.
fn tabular_columns(items: &[Value]) -> Option<Vec<&str>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    for item in items {
        let obj = item.as_object()?;
        if obj.len() != columns.len() {
            return None;
        }
        for ((key, value), column) in obj.iter().zip(&columns) {
            if key != column || !value.is_scalar() {
                return None;
            }
        }
    }

    Some(columns)
}
