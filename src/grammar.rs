//! Format reference.
//!
//! This module only holds documentation: the text grammar accepted by
//! [`decode`](crate::decode) and produced by [`encode`](crate::encode).
//!
//! # Documents
//!
//! A document is a sequence of lines separated by `\n` (a trailing `\r` is
//! tolerated when reading). The encoder never emits blank lines or a trailing
//! newline; the decoder skips blank lines.
//!
//! What the first line looks like decides the root:
//!
//! | First line | Root |
//! |------------|------|
//! | (none) | empty object |
//! | `key: ...` or `key[...]...` | object |
//! | `[N]...` | array |
//! | anything else | a single scalar; further lines are an error |
//!
//! # Indentation
//!
//! Nesting is expressed with leading spaces only. The encoder uses
//! [`EncodeOptions::indent`](crate::EncodeOptions) spaces per level; the
//! decoder takes the step from the first indented line it sees. Every line
//! must sit at a whole number of steps, and a child block is exactly one
//! level deeper than its parent.
//!
//! # Objects
//!
//! ```text
//! user:
//!   id: 123
//!   name: Ada
//!   meta:
//! active: true
//! ```
//!
//! `key:` with nothing deeper underneath is an empty object. Keys are written
//! bare when they match `[A-Za-z_][A-Za-z0-9_.]*` and quoted otherwise
//! (`"user-id": 1`). A key may appear only once per object.
//!
//! # Scalars
//!
//! | Kind | Text |
//! |------|------|
//! | null | `null` |
//! | boolean | `true`, `false` |
//! | integer | `-?[0-9]+`, within `i64` |
//! | float | `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?` with a fraction or exponent |
//! | string | bare, or `"quoted"` |
//!
//! Integer literals outside the `i64` range are read as floats. A float
//! literal that overflows to infinity is rejected. Floats are always written
//! with a `.` or an exponent (`2.0`, `1e-7`) so they read back as floats;
//! NaN and the infinities cannot be written.
//!
//! A string is quoted when, unquoted, it would read back differently or break
//! the line structure:
//!
//! - it is empty, or starts or ends with whitespace
//! - it is `true`, `false` or `null`, or matches the numeral grammar above
//! - it contains `:` or the active delimiter
//! - it starts with `-` (list marker) or `"`
//! - it contains a control character
//!
//! Inside quotes, `\"`, `\\`, `\n`, `\r` and `\t` are the escapes written
//! for those characters, and other control characters use `\uXXXX`. Any
//! other escape is an error.
//!
//! # Arrays
//!
//! Every array starts with a header carrying its length:
//!
//! ```text
//! key[<marker><count><delimiter>]{<columns>}:
//! ```
//!
//! - `<marker>` is the optional length marker, any character other than a
//!   digit, whitespace, `[]{}:"` or the delimiter
//! - `<delimiter>` is omitted for `,` and written as `|` or a tab otherwise
//! - `{<columns>}` appears only on tabular arrays
//!
//! The four layouts are picked in order:
//!
//! ```text
//! empty[0]:
//! tags[3]: rust,serde,codec
//! items[2]{sku,qty}:
//!   A1,2
//!   B2,1
//! mixed[3]:
//!   - 1
//!   - name: x
//!     tags[2]: a,b
//!   -
//! ```
//!
//! A tabular array needs every element to be an object with the same
//! non-empty keys in the same order and only scalar values. Anything else
//! that is not all scalars becomes a list. A list item is `- ` followed by
//! the element as if it started one level deeper; an object element carries
//! its remaining fields on the following lines at that depth, and an empty
//! object element is a bare `-`.
//!
//! Rows, inline values and list items must match the declared count, and
//! every row must have one value per column.
//!
//! # Custom options
//!
//! ```text
//! items[#2|]{sku|qty}:
//!     A1|2
//!     B2|1
//! ```
//!
//! The header is self-describing, so the same [`decode`](crate::decode)
//! call reads documents written with any [`EncodeOptions`](crate::EncodeOptions).
