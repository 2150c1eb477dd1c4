//! Encoding a [`Value`] into text.
//!
//! The encoder walks the value top-down and collects `(depth, content)` lines;
//! indentation is applied once at the end. Working on lines rather than on a
//! flat buffer is what makes list items simple: an element is rendered one
//! level deeper, then its first line is pulled back to the item's depth and
//! prefixed with the `- ` marker.
//!
//! ## Examples
//!
//! ```rust
//! use tost::{encode, tost, EncodeOptions};
//!
//! let order = tost!({
//!     "id": 7,
//!     "items": [
//!         { "sku": "A1", "qty": 2, "price": 9.99 },
//!         { "sku": "B2", "qty": 1, "price": 14.5 }
//!     ],
//!     "tags": ["rush", "gift"]
//! });
//!
//! let text = encode(&order, &EncodeOptions::default()).unwrap();
//! assert_eq!(
//!     text,
//!     "id: 7\nitems[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5\ntags[2]: rush,gift"
//! );
//! ```

use crate::scalar;
use crate::shape::{self, ArrayShape};
use crate::{EncodeError, EncodeOptions, Map, Value};
use log::{debug, trace};

/// Encodes `value` as a document.
///
/// Objects become `key: value` lines, arrays at the root get a keyless
/// `[N]` header, and a scalar at the root becomes a single token. An empty
/// root object is the empty document.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidOptions`] if `options` fail
/// [`EncodeOptions::validate`], and [`EncodeError::NonFiniteNumber`] if the
/// value contains NaN or an infinity.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    options.validate()?;

    let mut encoder = Encoder::new(options);
    match value {
        Value::Object(map) => encoder.write_object(map, 0)?,
        Value::Array(items) => encoder.write_array(None, items, 0)?,
        scalar => {
            let token = encoder.scalar(scalar)?;
            encoder.push(0, token);
        }
    }

    debug!(
        "encoded {} as {} line(s) with indent {}",
        value.type_name(),
        encoder.lines.len(),
        options.indent
    );
    Ok(encoder.finish())
}

struct Line {
    depth: usize,
    content: String,
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
    lines: Vec<Line>,
}

impl<'a> Encoder<'a> {
    fn new(options: &'a EncodeOptions) -> Self {
        Encoder {
            options,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, depth: usize, content: String) {
        self.lines.push(Line { depth, content });
    }

    fn scalar(&self, value: &Value) -> Result<String, EncodeError> {
        scalar::format_scalar(value, self.options.delimiter)
    }

    fn write_object(&mut self, map: &Map, depth: usize) -> Result<(), EncodeError> {
        for (key, value) in map {
            self.write_field(key, value, depth)?;
        }
        Ok(())
    }

    fn write_field(&mut self, key: &str, value: &Value, depth: usize) -> Result<(), EncodeError> {
        let key = scalar::format_key(key);
        match value {
            Value::Object(obj) => {
                self.push(depth, format!("{}:", key));
                self.write_object(obj, depth + 1)
            }
            Value::Array(items) => self.write_array(Some(&key), items, depth),
            scalar => {
                let token = self.scalar(scalar)?;
                self.push(depth, format!("{}: {}", key, token));
                Ok(())
            }
        }
    }

    /// Builds `key[<marker><count><delimiter>]{cols}:`.
    fn header(&self, key: Option<&str>, len: usize, columns: Option<&[&str]>) -> String {
        let mut header = String::new();
        if let Some(key) = key {
            header.push_str(key);
        }

        header.push('[');
        if let Some(marker) = self.options.length_marker {
            header.push(marker);
        }
        header.push_str(&len.to_string());
        if let Some(indicator) = self.options.delimiter.header_indicator() {
            header.push(indicator);
        }
        header.push(']');

        if let Some(columns) = columns {
            let names: Vec<String> = columns.iter().map(|c| scalar::format_key(c)).collect();
            header.push('{');
            header.push_str(&names.join(self.options.delimiter.as_str()));
            header.push('}');
        }

        header.push(':');
        header
    }

    fn write_array(
        &mut self,
        key: Option<&str>,
        items: &[Value],
        depth: usize,
    ) -> Result<(), EncodeError> {
        let delimiter = self.options.delimiter.as_str();
        let shape = shape::classify(items);
        trace!("array of {} element(s) at depth {}: {:?}", items.len(), depth, shape);

        match shape {
            ArrayShape::Empty => {
                let header = self.header(key, 0, None);
                self.push(depth, header);
            }
            ArrayShape::Inline => {
                let tokens = items
                    .iter()
                    .map(|item| self.scalar(item))
                    .collect::<Result<Vec<_>, _>>()?;
                let header = self.header(key, items.len(), None);
                self.push(depth, format!("{} {}", header, tokens.join(delimiter)));
            }
            ArrayShape::Tabular { columns } => {
                let header = self.header(key, items.len(), Some(&columns));
                self.push(depth, header);
                for item in items {
                    // Tabular elements are objects whose values follow the column order.
                    let cells = item
                        .as_object()
                        .into_iter()
                        .flat_map(Map::values)
                        .map(|cell| self.scalar(cell))
                        .collect::<Result<Vec<_>, _>>()?;
                    self.push(depth + 1, cells.join(delimiter));
                }
            }
            ArrayShape::List => {
                let header = self.header(key, items.len(), None);
                self.push(depth, header);
                for item in items {
                    self.write_list_item(item, depth + 1)?;
                }
            }
        }

        Ok(())
    }

    fn write_list_item(&mut self, item: &Value, depth: usize) -> Result<(), EncodeError> {
        let first = self.lines.len();

        match item {
            Value::Object(obj) if obj.is_empty() => {
                self.push(depth, "-".to_string());
                return Ok(());
            }
            Value::Object(obj) => self.write_object(obj, depth + 1)?,
            Value::Array(items) => self.write_array(None, items, depth + 1)?,
            scalar => {
                let token = self.scalar(scalar)?;
                self.push(depth + 1, token);
            }
        }

        let line = &mut self.lines[first];
        line.depth = depth;
        line.content.insert_str(0, "- ");
        Ok(())
    }

    fn finish(self) -> String {
        let indent = self.options.indent;
        let mut output = String::with_capacity(
            self.lines
                .iter()
                .map(|line| line.depth * indent + line.content.len() + 1)
                .sum(),
        );

        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.extend(std::iter::repeat(' ').take(line.depth * indent));
            output.push_str(&line.content);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tost, Delimiter};

    fn enc(value: &Value) -> String {
        encode(value, &EncodeOptions::default()).unwrap()
    }

    #[test]
    fn test_simple_object() {
        let value = tost!({ "id": 123, "name": "Ada", "active": true });
        assert_eq!(enc(&value), "id: 123\nname: Ada\nactive: true");
    }

    #[test]
    fn test_nested_object() {
        let value = tost!({ "user": { "id": 123, "name": "Ada" }, "ok": false });
        assert_eq!(enc(&value), "user:\n  id: 123\n  name: Ada\nok: false");
    }

    #[test]
    fn test_empty_nested_object() {
        assert_eq!(enc(&tost!({ "meta": {} })), "meta:");
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(enc(&tost!({ "empty": [] })), "empty[0]:");
    }

    #[test]
    fn test_inline_array() {
        let value = tost!({ "tags": ["javascript", "typescript", "nodejs"] });
        assert_eq!(enc(&value), "tags[3]: javascript,typescript,nodejs");
    }

    #[test]
    fn test_array_of_arrays() {
        let value = tost!({ "matrix": [[1, 2], [3, 4]] });
        assert_eq!(enc(&value), "matrix[2]:\n  - [2]: 1,2\n  - [2]: 3,4");
    }

    #[test]
    fn test_list_of_non_uniform_objects() {
        let value = tost!({ "items": [{ "a": 1 }, { "a": 1, "b": 2 }] });
        assert_eq!(enc(&value), "items[2]:\n  - a: 1\n  - a: 1\n    b: 2");
    }

    #[test]
    fn test_list_item_with_nested_structures() {
        let value = tost!({
            "items": [
                { "name": "x", "tags": ["a", "b"], "meta": { "k": 1 } },
                "plain",
                {}
            ]
        });
        assert_eq!(
            enc(&value),
            "items[3]:\n  - name: x\n    tags[2]: a,b\n    meta:\n      k: 1\n  - plain\n  -"
        );
    }

    #[test]
    fn test_list_item_starting_with_tabular_field() {
        let value = tost!({
            "groups": [
                { "rows": [{ "a": 1 }, { "a": 2 }], "n": 2 },
                [1]
            ]
        });
        assert_eq!(
            enc(&value),
            "groups[2]:\n  - rows[2]{a}:\n      1\n      2\n    n: 2\n  - [1]: 1"
        );
    }

    #[test]
    fn test_root_array_and_scalar() {
        assert_eq!(enc(&tost!(["a", "b"])), "[2]: a,b");
        assert_eq!(enc(&tost!([])), "[0]:");
        assert_eq!(enc(&tost!("hello")), "hello");
        assert_eq!(enc(&tost!("42")), "\"42\"");
        assert_eq!(enc(&tost!({})), "");
    }

    #[test]
    fn test_custom_options() {
        let value = tost!({ "items": [{ "sku": "A1", "qty": 2 }] });
        let options = EncodeOptions::new()
            .with_indent(4)
            .with_delimiter(Delimiter::Pipe)
            .with_length_marker('#');
        assert_eq!(
            encode(&value, &options).unwrap(),
            "items[#1|]{sku|qty}:\n    A1|2"
        );
    }

    #[test]
    fn test_tab_delimiter_header() {
        let value = tost!({ "t": [1, 2] });
        let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
        assert_eq!(encode(&value, &options).unwrap(), "t[2\t]: 1\t2");
    }

    #[test]
    fn test_quoted_keys_and_columns() {
        let value = tost!({ "user-id": 1, "rows": [{ "first name": "A" }] });
        assert_eq!(
            enc(&value),
            "\"user-id\": 1\nrows[1]{\"first name\"}:\n  A"
        );
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(enc(&tost!({ "x": 2.0 })), "x: 2.0");
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let value = tost!({ "x": [1.0, (f64::NAN)] });
        assert!(matches!(
            encode(&value, &EncodeOptions::default()),
            Err(EncodeError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = EncodeOptions::new().with_indent(0);
        assert!(matches!(
            encode(&tost!({ "a": 1 }), &options),
            Err(EncodeError::InvalidOptions(_))
        ));
    }
}
