//! # tost
//!
//! A compact, line-oriented, human-readable text codec for objects, arrays
//! and scalars that round-trips losslessly: `decode(encode(v)) == v`,
//! including the difference between the number `42` and the string `"42"`.
//!
//! ## Key Features
//!
//! - **Tabular arrays**: arrays of uniform objects are written once as a
//!   header of column names followed by one delimited row per element
//! - **Minimal quoting**: strings are left bare unless they would read back
//!   as something else
//! - **Self-describing headers**: every array states its length and
//!   delimiter, so one [`decode`] reads any option set
//! - **Strict decoding**: wrong row arity, wrong counts and bad indentation
//!   are typed errors carrying the line number
//! - **Serde bridge**: any `Serialize`/`Deserialize` type converts to and
//!   from [`Value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tost::{decode, encode, tost, EncodeOptions};
//!
//! let order = tost!({
//!     "id": 7,
//!     "code": "042",
//!     "items": [
//!         { "sku": "A1", "qty": 2 },
//!         { "sku": "B2", "qty": 1 }
//!     ]
//! });
//!
//! let text = encode(&order, &EncodeOptions::default()).unwrap();
//! assert_eq!(text, "id: 7\ncode: \"042\"\nitems[2]{sku,qty}:\n  A1,2\n  B2,1");
//! assert_eq!(decode(&text).unwrap(), order);
//! ```
//!
//! ### Rust types through serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tost::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Ada".to_string(),
//!     tags: vec!["admin".to_string(), "ops".to_string()],
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Ada\ntags[2]: admin,ops");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(back, user);
//! ```
//!
//! See the [`grammar`] module for the full text format.
//!
//! ## Logging
//!
//! The codec reports through the [`log`](https://docs.rs/log) facade:
//! `debug` for each encoded or decoded document and `trace` for array layout
//! decisions. No logger is installed by the library.
//!
//! ## Examples
//!
//! Runnable demos live in `demos/`:
//!
//! - **`simple.rs`** - encoding and decoding a struct and a dynamic value
//! - **`custom_options.rs`** - indentation, delimiters and length markers
//!
//! Run one with: `cargo run --example <name>`

pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod shape;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use decode::decode;
pub use encode::encode;
pub use error::{DecodeError, EncodeError};
pub use map::Map;
pub use options::{Delimiter, EncodeOptions};
pub use ser::{to_value, ValueSerializer};
pub use value::Value;

use serde::{de::DeserializeOwned, Serialize};

/// Encodes `value` with [`EncodeOptions::default`].
///
/// # Examples
///
/// ```rust
/// use tost::{encode_default, tost};
///
/// assert_eq!(encode_default(&tost!({ "tags": ["a", "b"] })).unwrap(), "tags[2]: a,b");
/// ```
///
/// # Errors
///
/// Returns [`EncodeError::NonFiniteNumber`] if the value holds NaN or an infinity.
pub fn encode_default(value: &Value) -> Result<String, EncodeError> {
    encode(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to text with the default options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tost::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: -2 }).unwrap(), "x: 1\ny: -2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, e.g. a `u64` above
/// `i64::MAX`, a non-finite float, or map keys that collide once stringified.
pub fn to_string<T>(value: &T) -> Result<String, EncodeError>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to text with custom options.
///
/// # Examples
///
/// ```rust
/// use tost::{to_string_with_options, Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_delimiter(Delimiter::Pipe)
///     .with_length_marker('#');
/// let text = to_string_with_options(&vec!["a", "b,c"], &options).unwrap();
/// assert_eq!(text, "[#2|]: a|b,c");
/// ```
///
/// # Errors
///
/// Same as [`to_string`], plus [`EncodeError::InvalidOptions`].
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String, EncodeError>
where
    T: ?Sized + Serialize,
{
    encode(&to_value(value)?, options)
}

/// Deserializes an instance of `T` from text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use tost::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns the [`DecodeError`] raised by [`decode`], or
/// [`DecodeError::Custom`] if the document does not fit `T`.
pub fn from_str<T>(s: &str) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    from_value(decode(s)?)
}
