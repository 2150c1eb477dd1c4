//! Decoding text into a [`Value`].
//!
//! The decoder is a recursive-descent parser over indentation-scoped lines:
//!
//! - **Line preparation**: blank lines are dropped, the indent step is taken
//!   from the first indented line, and every line's indentation must be a
//!   whole number of steps (spaces only).
//! - **Self-describing headers**: the delimiter and length marker are read
//!   from each array's `[...]` header, so no options are needed.
//! - **Strict validation**: row arity, element counts, duplicate keys and
//!   misplaced indentation are errors, never repaired.
//!
//! ## Examples
//!
//! ```rust
//! use tost::{decode, tost};
//!
//! let value = decode("items[2]{sku,qty}:\n  A1,2\n  B2,1").unwrap();
//! assert_eq!(
//!     value,
//!     tost!({ "items": [{ "sku": "A1", "qty": 2 }, { "sku": "B2", "qty": 1 }] })
//! );
//!
//! assert!(decode("items[2]{a,b}:\n  1,2\n  3").is_err());
//! ```

use crate::scalar::{parse_quoted, parse_token, split_delimited};
use crate::{DecodeError, Delimiter, Map, Value};
use log::{debug, trace};

/// Decodes a document.
///
/// The empty document (or one holding only blank lines) decodes to an empty
/// object, mirroring how an empty root object is encoded.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the offending line for any malformed
/// header, arity or length mismatch, bad indentation, unterminated or
/// badly escaped string, duplicate key, or unrecognized line.
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    let (lines, step) = prepare_lines(text)?;
    debug!(
        "decoding {} line(s), indent step {}",
        lines.len(),
        step.map_or_else(|| "n/a".to_string(), |s| s.to_string())
    );

    if lines.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let mut parser = Parser { lines, pos: 0 };
    let value = parser.parse_value_at(0)?;

    if let Some(line) = parser.peek() {
        return Err(if line.depth > 0 {
            unexpected_indent(line, 0)
        } else {
            DecodeError::unrecognized(line.number, line.text)
        });
    }

    Ok(value)
}

/// One non-blank line with its indentation resolved into a depth.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    /// 1-based line number in the source text.
    number: usize,
    depth: usize,
    /// Byte offset of `text` within the source line.
    offset: usize,
    text: &'a str,
}

impl Line<'_> {
    fn col(&self, local: usize) -> usize {
        self.offset + local + 1
    }
}

fn prepare_lines(text: &str) -> Result<(Vec<Line<'_>>, Option<usize>), DecodeError> {
    let mut raw = Vec::new();

    for (idx, source) in text.lines().enumerate() {
        let number = idx + 1;
        if source.trim().is_empty() {
            continue;
        }

        let body = source.trim_start_matches(' ');
        let indent = source.len() - body.len();
        if body.starts_with(char::is_whitespace) {
            return Err(DecodeError::indentation(
                number,
                "indentation must use spaces only".to_string(),
            ));
        }
        raw.push((number, indent, body));
    }

    let step = raw
        .iter()
        .map(|&(_, indent, _)| indent)
        .find(|&indent| indent > 0);

    let mut lines = Vec::with_capacity(raw.len());
    for (number, indent, body) in raw {
        let depth = match step {
            Some(step) if indent % step != 0 => {
                return Err(DecodeError::indentation(
                    number,
                    format!(
                        "{} spaces is not a multiple of the indent step {}",
                        indent, step
                    ),
                ));
            }
            Some(step) => indent / step,
            None => 0,
        };
        lines.push(Line {
            number,
            depth,
            offset: indent,
            text: body,
        });
    }

    if let Some(first) = lines.first() {
        if first.depth != 0 {
            return Err(unexpected_indent(first, 0));
        }
    }

    Ok((lines, step))
}

fn unexpected_indent(line: &Line<'_>, expected: usize) -> DecodeError {
    DecodeError::indentation(
        line.number,
        format!(
            "found nesting level {} where level {} was expected",
            line.depth, expected
        ),
    )
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    /// `key: ...` or `key[...]...`
    Field,
    /// `[...]...` without a key
    Header,
    Scalar,
}

fn line_kind(text: &str) -> LineKind {
    if text.starts_with('"') {
        // A quoted key is followed by `:` or `[`; anything else is a quoted scalar.
        return match parse_quoted(text, 0, 0) {
            Ok((_, end)) if text[end..].starts_with(|c: char| c == ':' || c == '[') => {
                LineKind::Field
            }
            _ => LineKind::Scalar,
        };
    }

    if !text.contains(':') {
        LineKind::Scalar
    } else if text.starts_with('[') {
        LineKind::Header
    } else {
        LineKind::Field
    }
}

/// A parsed `[<marker><count><delimiter>]{cols}:` header.
#[derive(Debug)]
struct ArrayHeader<'a> {
    line: usize,
    len: usize,
    delimiter: Delimiter,
    columns: Option<Vec<String>>,
    /// Text after `: ` on the header line with its byte offset in the
    /// source line, for inline arrays.
    inline: Option<(usize, &'a str)>,
}

/// Parses a header starting at `line.text[start..]`, which must begin with `[`.
fn parse_header<'a>(line: &Line<'a>, start: usize) -> Result<ArrayHeader<'a>, DecodeError> {
    let number = line.number;
    let full: &'a str = line.text;
    let text = &full[start..];

    let close = text
        .find(']')
        .ok_or_else(|| DecodeError::malformed_header(number, "missing ']'"))?;
    let (len, delimiter) = parse_bracket(&text[1..close], number)?;

    let mut after = close + 1;
    let mut columns = None;

    if text[after..].starts_with('{') {
        let (names, end) = parse_columns(line, start + after, delimiter)?;
        columns = Some(names);
        after = end - start;
    }

    let rest = text[after..]
        .strip_prefix(':')
        .ok_or_else(|| DecodeError::malformed_header(number, "expected ':' after the header"))?;
    let rest_offset = start + after + 1;

    let inline = if rest.trim_matches(' ').is_empty() {
        None
    } else if let Some(values) = rest.strip_prefix(' ') {
        Some((line.offset + rest_offset + 1, values))
    } else {
        return Err(DecodeError::malformed_header(
            number,
            "expected a space between ':' and the values",
        ));
    };

    if columns.is_some() && inline.is_some() {
        return Err(DecodeError::malformed_header(
            number,
            "a tabular header cannot carry inline values",
        ));
    }

    trace!(
        "line {}: header len={} delimiter={:?} columns={:?} inline={}",
        number,
        len,
        delimiter,
        columns,
        inline.is_some()
    );

    Ok(ArrayHeader {
        line: number,
        len,
        delimiter,
        columns,
        inline,
    })
}

/// Parses the bracket content: an optional non-digit marker, the count, and
/// an optional delimiter character.
fn parse_bracket(inner: &str, line: usize) -> Result<(usize, Delimiter), DecodeError> {
    let mut rest = inner;

    if let Some(first) = rest.chars().next() {
        if !first.is_ascii_digit() {
            rest = &rest[first.len_utf8()..];
        }
    }

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return Err(DecodeError::malformed_header(line, "missing element count"));
    }
    let len = rest[..digits_end]
        .parse::<usize>()
        .map_err(|_| DecodeError::malformed_header(line, "element count is out of range"))?;

    let mut trailing = rest[digits_end..].chars();
    let delimiter = match (trailing.next(), trailing.next()) {
        (None, _) => Delimiter::Comma,
        (Some(ch), None) => Delimiter::from_char(ch).ok_or_else(|| {
            DecodeError::malformed_header(line, &format!("unsupported delimiter {:?}", ch))
        })?,
        (Some(_), Some(_)) => {
            return Err(DecodeError::malformed_header(
                line,
                "unexpected characters after the element count",
            ))
        }
    };

    Ok((len, delimiter))
}

/// Parses `{col<d>col...}` starting at `line.text[start..]`.
///
/// Returns the column names and the byte index just past the closing brace.
fn parse_columns(
    line: &Line<'_>,
    start: usize,
    delimiter: Delimiter,
) -> Result<(Vec<String>, usize), DecodeError> {
    let number = line.number;
    let text = &line.text[start..];

    // Find the closing brace, stepping over quoted names.
    let mut idx = 1;
    let close = loop {
        let rest = &text[idx..];
        match rest.find(|c: char| c == '}' || c == '"') {
            Some(i) if rest[i..].starts_with('"') => {
                let (_, end) = parse_quoted(&rest[i..], number, line.col(start + idx + i))?;
                idx += i + end;
            }
            Some(i) => break idx + i,
            None => return Err(DecodeError::malformed_header(number, "missing '}'")),
        }
    };

    let body = &text[1..close];
    let mut names: Vec<String> = Vec::new();

    for (local, raw) in split_delimited(body, delimiter.as_char(), number, line.col(start + 1))? {
        let name = raw.trim_matches(' ');
        let col = line.col(start + 1 + local);
        let name = if name.starts_with('"') {
            let (name, end) = parse_quoted(name, number, col)?;
            if end != raw.trim_matches(' ').len() {
                return Err(DecodeError::malformed_header(
                    number,
                    "unexpected text after a quoted column name",
                ));
            }
            name
        } else if name.is_empty() {
            return Err(DecodeError::malformed_header(number, "empty column name"));
        } else {
            name.to_string()
        };

        if names.contains(&name) {
            return Err(DecodeError::malformed_header(
                number,
                &format!("duplicate column `{}`", name),
            ));
        }
        names.push(name);
    }

    Ok((names, start + close + 1))
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    /// Returns the next line if it is nested deeper than `depth`.
    fn peek_deeper(&self, depth: usize) -> Option<Line<'a>> {
        self.peek().filter(|line| line.depth > depth).copied()
    }

    /// Parses whatever value starts at the current line, which sits at `depth`.
    fn parse_value_at(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let line = self.lines[self.pos];

        match line_kind(line.text) {
            LineKind::Field => Ok(Value::Object(self.parse_object(depth)?)),
            LineKind::Header => {
                let header = parse_header(&line, 0)?;
                self.pos += 1;
                self.parse_array_body(header, depth)
            }
            LineKind::Scalar => {
                self.pos += 1;
                parse_token(line.text, line.number, line.col(0))
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Map, DecodeError> {
        let mut map = Map::new();

        while let Some(line) = self.peek().copied() {
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                return Err(unexpected_indent(&line, depth));
            }

            let (key, value) = self.parse_field(line, depth)?;
            if map.contains_key(&key) {
                return Err(DecodeError::DuplicateKey {
                    line: line.number,
                    key,
                });
            }
            map.insert(key, value);
        }

        Ok(map)
    }

    fn parse_field(&mut self, line: Line<'a>, depth: usize) -> Result<(String, Value), DecodeError> {
        let (key, key_end) = parse_key(&line)?;
        let rest = &line.text[key_end..];

        if rest.starts_with('[') {
            let header = parse_header(&line, key_end)?;
            self.pos += 1;
            let value = self.parse_array_body(header, depth)?;
            return Ok((key, value));
        }

        let after = rest
            .strip_prefix(':')
            .ok_or_else(|| DecodeError::unrecognized(line.number, line.text))?;
        self.pos += 1;

        if after.trim_matches(' ').is_empty() {
            let value = match self.peek_deeper(depth) {
                Some(_) => Value::Object(self.parse_object(depth + 1)?),
                None => Value::Object(Map::new()),
            };
            return Ok((key, value));
        }

        let token = after
            .strip_prefix(' ')
            .ok_or_else(|| DecodeError::unrecognized(line.number, line.text))?;
        let value = parse_token(token, line.number, line.col(key_end + 2))?;
        Ok((key, value))
    }

    fn parse_array_body(
        &mut self,
        header: ArrayHeader<'a>,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let ArrayHeader {
            line: header_line,
            len,
            delimiter,
            columns,
            inline,
        } = header;

        let items = if let Some(columns) = columns {
            self.parse_rows(&columns, delimiter, depth + 1)?
        } else if let Some((offset, values)) = inline {
            let line = header_line;
            split_delimited(values, delimiter.as_char(), line, offset + 1)?
                .into_iter()
                .map(|(local, raw)| parse_token(raw, line, offset + local + 1))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut items = Vec::new();
            while self.peek_deeper(depth).is_some() {
                items.push(self.parse_list_item(depth + 1)?);
            }
            items
        };

        if items.len() != len {
            return Err(DecodeError::LengthMismatch {
                line: header_line,
                expected: len,
                found: items.len(),
            });
        }

        Ok(Value::Array(items))
    }

    fn parse_rows(
        &mut self,
        columns: &[String],
        delimiter: Delimiter,
        depth: usize,
    ) -> Result<Vec<Value>, DecodeError> {
        let mut rows = Vec::new();

        while let Some(line) = self.peek_deeper(depth - 1) {
            if line.depth != depth {
                return Err(unexpected_indent(&line, depth));
            }

            let cells = split_delimited(line.text, delimiter.as_char(), line.number, line.col(0))?;
            if cells.len() != columns.len() {
                return Err(DecodeError::RowArity {
                    line: line.number,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }

            let mut row = Map::with_capacity(columns.len());
            for (column, (local, raw)) in columns.iter().zip(cells) {
                row.insert(
                    column.clone(),
                    parse_token(raw, line.number, line.col(local))?,
                );
            }
            rows.push(Value::Object(row));
            self.pos += 1;
        }

        Ok(rows)
    }

    /// Parses one `- ` item at `depth`. The content after the marker is
    /// treated as a line one level deeper, so an object element continues
    /// on the following lines at that level.
    fn parse_list_item(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let line = self.lines[self.pos];
        if line.depth != depth {
            return Err(unexpected_indent(&line, depth));
        }

        if line.text == "-" {
            self.pos += 1;
            return Ok(Value::Object(Map::new()));
        }

        let content = line
            .text
            .strip_prefix("- ")
            .filter(|rest| !rest.is_empty() && !rest.starts_with(char::is_whitespace))
            .ok_or_else(|| DecodeError::unrecognized(line.number, line.text))?;

        self.lines[self.pos] = Line {
            number: line.number,
            depth: depth + 1,
            offset: line.offset + 2,
            text: content,
        };
        let value = self.parse_value_at(depth + 1)?;

        if let Some(next) = self.peek_deeper(depth) {
            // Only objects may continue below their marker line.
            return Err(unexpected_indent(&next, depth));
        }

        Ok(value)
    }
}

/// Reads the key at the start of a field line.
///
/// Returns the key and the byte index where the rest of the line (`:` or `[`) starts.
fn parse_key(line: &Line<'_>) -> Result<(String, usize), DecodeError> {
    let text = line.text;

    if text.starts_with('"') {
        return parse_quoted(text, line.number, line.col(0));
    }

    let end = text
        .find(|c: char| c == ':' || c == '[')
        .ok_or_else(|| DecodeError::unrecognized(line.number, text))?;
    let key = &text[..end];

    if key.is_empty() || key.trim() != key || key.starts_with('-') {
        return Err(DecodeError::unrecognized(line.number, text));
    }

    Ok((key.to_string(), end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tost;

    #[test]
    fn test_simple_object() {
        let value = decode("id: 123\nname: Ada\nactive: true").unwrap();
        assert_eq!(value, tost!({ "id": 123, "name": "Ada", "active": true }));
    }

    #[test]
    fn test_nested_and_empty_objects() {
        let value = decode("user:\n  id: 1\n  meta:\nnext: x").unwrap();
        assert_eq!(
            value,
            tost!({ "user": { "id": 1, "meta": {} }, "next": "x" })
        );
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        assert_eq!(decode("").unwrap(), tost!({}));
        assert_eq!(decode("\n  \n").unwrap(), tost!({}));
    }

    #[test]
    fn test_root_scalar() {
        assert_eq!(decode("hello world").unwrap(), tost!("hello world"));
        assert_eq!(decode("\"42\"").unwrap(), tost!("42"));
        assert_eq!(decode("42").unwrap(), tost!(42));
        assert_eq!(decode("[x]").unwrap(), tost!("[x]"));
    }

    #[test]
    fn test_second_root_scalar_line_is_rejected() {
        assert!(matches!(
            decode("a\nb"),
            Err(DecodeError::UnrecognizedLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_root_inline_array_with_marker_and_pipe() {
        assert_eq!(decode("[#3|]: a|b|c").unwrap(), tost!(["a", "b", "c"]));
    }

    #[test]
    fn test_tab_delimited_rows() {
        let value = decode("t[2\t]{a\tb}:\n  1\tx y\n  2\tz").unwrap();
        assert_eq!(
            value,
            tost!({ "t": [{ "a": 1, "b": "x y" }, { "a": 2, "b": "z" }] })
        );
    }

    #[test]
    fn test_array_of_arrays() {
        let value = decode("matrix[2]:\n  - [2]: 1,2\n  - [2]: 3,4").unwrap();
        assert_eq!(value["matrix"], tost!([[1, 2], [3, 4]]));
    }

    #[test]
    fn test_list_items_with_objects() {
        let text = "items[3]:\n  - name: x\n    tags[2]: a,b\n    meta:\n      k: 1\n  - plain\n  -";
        assert_eq!(
            decode(text).unwrap(),
            tost!({
                "items": [
                    { "name": "x", "tags": ["a", "b"], "meta": { "k": 1 } },
                    "plain",
                    {}
                ]
            })
        );
    }

    #[test]
    fn test_list_item_with_tabular_first_field() {
        let text = "groups[2]:\n  - rows[2]{a}:\n      1\n      2\n    n: 2\n  - [1]: 1";
        assert_eq!(
            decode(text).unwrap(),
            tost!({ "groups": [{ "rows": [{ "a": 1 }, { "a": 2 }], "n": 2 }, [1]] })
        );
    }

    #[test]
    fn test_row_arity_mismatch() {
        assert_eq!(
            decode("items[2]{a,b}:\n  1,2\n  3"),
            Err(DecodeError::RowArity {
                line: 3,
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            decode("items[1]{a,b}:\n  1,2,3"),
            Err(DecodeError::RowArity { found: 3, .. })
        ));
    }

    #[test]
    fn test_length_mismatches() {
        assert!(matches!(
            decode("items[3]{a}:\n  1\n  2"),
            Err(DecodeError::LengthMismatch { line: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            decode("tags[2]: a,b,c"),
            Err(DecodeError::LengthMismatch { expected: 2, found: 3, .. })
        ));
        assert!(matches!(
            decode("list[2]:\n  - a"),
            Err(DecodeError::LengthMismatch { found: 1, .. })
        ));
        assert!(matches!(
            decode("tags[2]:"),
            Err(DecodeError::LengthMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_headers() {
        for text in [
            "a[: 1",
            "a[]: 1",
            "a[x]: 1",
            "a[2;]: 1,2",
            "a[2||]: 1|2",
            "a[1]{b: \n  1",
            "a[1]{}:\n  1",
            "a[1]{b,b}:\n  1,2",
            "a[1]{b}: 1",
            "a[1]x: 1",
            "a[1]:1",
        ] {
            assert!(
                matches!(decode(text), Err(DecodeError::MalformedHeader { line: 1, .. })),
                "expected malformed header for {:?}, got {:?}",
                text,
                decode(text)
            );
        }
    }

    #[test]
    fn test_indentation_errors() {
        assert!(matches!(
            decode("a:\n  b: 1\n   c: 2"),
            Err(DecodeError::Indentation { line: 3, .. })
        ));
        assert!(matches!(
            decode("a: 1\n  b: 2"),
            Err(DecodeError::Indentation { line: 2, .. })
        ));
        assert!(matches!(
            decode("a:\n    b: 1\n  c: 2"),
            Err(DecodeError::Indentation { line: 3, .. })
        ));
        assert!(matches!(
            decode("a:\n\tb: 1"),
            Err(DecodeError::Indentation { line: 2, .. })
        ));
        assert!(matches!(
            decode("  a: 1"),
            Err(DecodeError::Indentation { line: 1, .. })
        ));
    }

    #[test]
    fn test_scalar_list_item_cannot_have_children() {
        assert!(matches!(
            decode("l[1]:\n  - a\n    b: 1"),
            Err(DecodeError::Indentation { line: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(
            decode("a: 1\nb: 2\na: 3"),
            Err(DecodeError::DuplicateKey {
                line: 3,
                key: "a".to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_lines() {
        assert!(matches!(
            decode("a: 1\n- b"),
            Err(DecodeError::UnrecognizedLine { line: 2, .. })
        ));
        assert!(matches!(
            decode("a:1"),
            Err(DecodeError::UnrecognizedLine { line: 1, .. })
        ));
        assert!(matches!(
            decode("l[1]:\n  x"),
            Err(DecodeError::UnrecognizedLine { line: 2, .. })
        ));
        assert!(matches!(
            decode("a: b: c"),
            Err(DecodeError::UnrecognizedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            decode("a: \"open"),
            Err(DecodeError::UnterminatedString { line: 1, col: 4 })
        ));
        assert!(matches!(
            decode("t[2]: x,\"y"),
            Err(DecodeError::UnterminatedString { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_values() {
        assert!(matches!(
            decode("t[2]: a,"),
            Err(DecodeError::MissingValue { line: 1 })
        ));
        assert!(matches!(
            decode("r[1]{a,b}:\n  1,"),
            Err(DecodeError::MissingValue { line: 2 })
        ));
    }

    #[test]
    fn test_quoted_keys_and_columns() {
        let value = decode("\"user-id\": 1\nrows[1]{\"first name\",b}:\n  A,\"x,y\"").unwrap();
        assert_eq!(
            value,
            tost!({ "user-id": 1, "rows": [{ "first name": "A", "b": "x,y" }] })
        );
    }

    #[test]
    fn test_quoted_key_with_array_header() {
        let value = decode("\"my list\"[2]: 1,2").unwrap();
        assert_eq!(value, tost!({ "my list": [1, 2] }));
    }

    #[test]
    fn test_crlf_line_endings() {
        let value = decode("a: 1\r\nb:\r\n  c: x\r\n").unwrap();
        assert_eq!(value, tost!({ "a": 1, "b": { "c": "x" } }));
    }

    #[test]
    fn test_line_kind() {
        assert_eq!(line_kind("a: 1"), LineKind::Field);
        assert_eq!(line_kind("a[2]: 1,2"), LineKind::Field);
        assert_eq!(line_kind("\"a b\": 1"), LineKind::Field);
        assert_eq!(line_kind("[2]: 1,2"), LineKind::Header);
        assert_eq!(line_kind("\"a: b\""), LineKind::Scalar);
        assert_eq!(line_kind("plain text"), LineKind::Scalar);
    }
}
