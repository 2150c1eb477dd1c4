//! Scalar formatting and classification.
//!
//! The encode side decides how a scalar is written and whether a string needs
//! quotes; the decode side decides what type an unquoted token has. The two
//! halves share the same numeral grammar, so every quoting decision is the
//! exact inverse of a classification decision:
//!
//! | Unquoted token | Decodes as |
//! |----------------|------------|
//! | `true`, `false` | `Bool` |
//! | `null` | `Null` |
//! | `-?[0-9]+` | `Int` (falls back to `Float` beyond `i64`) |
//! | `-?[0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)?` with a fraction or exponent | `Float` |
//! | anything else | `String` |
//!
//! A string whose text would be read back as anything but itself is quoted.

use crate::{DecodeError, Delimiter, EncodeError, Value};
use std::fmt::Write as _;

/// Returns `true` if `s` is an integer numeral (`-?[0-9]+`).
///
/// # Examples
///
/// ```rust
/// use tost::scalar::is_integer_literal;
///
/// assert!(is_integer_literal("-42"));
/// assert!(!is_integer_literal("+42"));
/// assert!(!is_integer_literal("4.2"));
/// ```
#[must_use]
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `s` is a float numeral: digits with a fraction, an exponent, or both.
///
/// # Examples
///
/// ```rust
/// use tost::scalar::is_float_literal;
///
/// assert!(is_float_literal("9.99"));
/// assert!(is_float_literal("1e-7"));
/// assert!(!is_float_literal("12"));
/// assert!(!is_float_literal("inf"));
/// assert!(!is_float_literal(".5"));
/// ```
#[must_use]
pub fn is_float_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));

    let skip_digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = skip_digits(i);
    if int_end == i {
        return false;
    }
    i = int_end;

    let mut has_fraction_or_exponent = false;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_end = skip_digits(i + 1);
        if frac_end == i + 1 {
            return false;
        }
        i = frac_end;
        has_fraction_or_exponent = true;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_end = skip_digits(i);
        if exp_end == i {
            return false;
        }
        i = exp_end;
        has_fraction_or_exponent = true;
    }

    i == bytes.len() && has_fraction_or_exponent
}

#[inline]
#[must_use]
pub fn is_numeric_literal(s: &str) -> bool {
    is_integer_literal(s) || is_float_literal(s)
}

/// Decides whether a string value has to be written in quotes.
///
/// # Examples
///
/// ```rust
/// use tost::scalar::needs_quotes;
/// use tost::Delimiter;
///
/// assert!(!needs_quotes("MOUSE-BT", Delimiter::Comma));
/// assert!(needs_quotes("-item", Delimiter::Comma));
/// assert!(needs_quotes("1.0", Delimiter::Comma));
/// assert!(needs_quotes("a|b", Delimiter::Pipe));
/// assert!(!needs_quotes("a|b", Delimiter::Comma));
/// ```
#[must_use]
pub fn needs_quotes(s: &str, delimiter: Delimiter) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || matches!(s, "true" | "false" | "null")
        || is_numeric_literal(s)
        || s.contains(':')
        || s.contains(delimiter.as_char())
        || s.starts_with('-')
        || s.starts_with('"')
        || s.chars().any(char::is_control)
}

/// Appends `s` wrapped in quotes, escaping quotes, backslashes and control characters.
pub(crate) fn write_quoted(output: &mut String, s: &str) {
    output.reserve(s.len() + 2);
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                // Writing into a String cannot fail.
                let _ = write!(output, "\\u{:04x}", u32::from(c));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Returns `s` in quoted form.
///
/// # Examples
///
/// ```rust
/// use tost::scalar::quote;
///
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// assert_eq!(quote("a\nb"), r#""a\nb""#);
/// ```
#[must_use]
pub fn quote(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    write_quoted(&mut output, s);
    output
}

/// Returns `true` for keys that can be written without quotes (`[A-Za-z_][A-Za-z0-9_.]*`).
#[must_use]
pub fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Formats an object key or a tabular column name.
#[must_use]
pub fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Formats a float so it always reads back as a `Float`.
///
/// Uses the shortest representation that round-trips, with a decimal point
/// or an exponent guaranteed.
///
/// # Errors
///
/// Returns [`EncodeError::NonFiniteNumber`] for NaN and the infinities.
///
/// # Examples
///
/// ```rust
/// use tost::scalar::format_float;
///
/// assert_eq!(format_float(2.0).unwrap(), "2.0");
/// assert_eq!(format_float(9.99).unwrap(), "9.99");
/// assert!(format_float(f64::NAN).is_err());
/// ```
pub fn format_float(f: f64) -> Result<String, EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::NonFiniteNumber(f));
    }
    let mut s = format!("{:?}", f);
    if !s.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        s.push_str(".0");
    }
    Ok(s)
}

/// Formats a scalar value as a single token.
///
/// # Errors
///
/// Returns [`EncodeError::NonFiniteNumber`] for non-finite floats, and
/// [`EncodeError::Unsupported`] when handed a container.
pub fn format_scalar(value: &Value, delimiter: Delimiter) -> Result<String, EncodeError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => format_float(*f),
        Value::String(s) => Ok(if needs_quotes(s, delimiter) {
            quote(s)
        } else {
            s.clone()
        }),
        Value::Array(_) | Value::Object(_) => Err(EncodeError::unsupported(format!(
            "{} cannot be written as a single token",
            value.type_name()
        ))),
    }
}

/// Parses a quoted segment at the start of `text`.
///
/// Returns the unescaped content and the byte index just past the closing
/// quote. `col` is the 1-based column of `text`'s first character, used for
/// error positions.
pub(crate) fn parse_quoted(
    text: &str,
    line: usize,
    col: usize,
) -> Result<(String, usize), DecodeError> {
    debug_assert!(text.starts_with('"'));
    let mut result = String::new();
    let mut chars = text.char_indices().skip(1);

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((result, idx + 1)),
            '\\' => match chars.next() {
                Some((_, '"')) => result.push('"'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, 'n')) => result.push('\n'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'u')) => {
                    let mut code = 0u32;
                    for _ in 0..4 {
                        let digit = chars
                            .next()
                            .and_then(|(_, c)| c.to_digit(16))
                            .ok_or_else(|| DecodeError::InvalidEscape {
                                line,
                                col: col + idx,
                                msg: "expected 4 hex digits after \\u".to_string(),
                            })?;
                        code = code * 16 + digit;
                    }
                    let decoded =
                        char::from_u32(code).ok_or_else(|| DecodeError::InvalidEscape {
                            line,
                            col: col + idx,
                            msg: format!("\\u{:04x} is not a valid character", code),
                        })?;
                    result.push(decoded);
                }
                Some((_, other)) => {
                    return Err(DecodeError::InvalidEscape {
                        line,
                        col: col + idx,
                        msg: format!("unknown escape \\{}", other),
                    })
                }
                None => break,
            },
            other => result.push(other),
        }
    }

    Err(DecodeError::UnterminatedString { line, col })
}

/// Classifies one raw token read from the text.
///
/// Surrounding spaces are ignored. Quoted tokens are always strings; unquoted
/// ones are tried as boolean, null, integer and float before falling back to
/// a bare string.
pub(crate) fn parse_token(raw: &str, line: usize, col: usize) -> Result<Value, DecodeError> {
    let leading = raw.len() - raw.trim_start_matches(' ').len();
    let token = raw.trim_matches(' ');
    let col = col + leading;

    if token.is_empty() {
        return Err(DecodeError::MissingValue { line });
    }

    if token.starts_with('"') {
        let (s, end) = parse_quoted(token, line, col)?;
        if end != token.len() {
            return Err(DecodeError::unrecognized(line, token));
        }
        return Ok(Value::String(s));
    }

    match token {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }

    if is_integer_literal(token) {
        if let Ok(i) = token.parse::<i64>() {
            return Ok(Value::Int(i));
        }
    }

    if is_numeric_literal(token) {
        return match token.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(DecodeError::InvalidNumber {
                line,
                token: token.to_string(),
            }),
        };
    }

    if token.contains(':') {
        return Err(DecodeError::unrecognized(line, token));
    }

    Ok(Value::String(token.to_string()))
}

/// Splits `text` on `delimiter`, treating a token that starts with a quote as
/// one unit up to its closing quote.
///
/// Returns each raw token together with its byte offset in `text`. Quotes
/// that do not open a token are ordinary characters.
pub(crate) fn split_delimited(
    text: &str,
    delimiter: char,
    line: usize,
    col: usize,
) -> Result<Vec<(usize, &str)>, DecodeError> {
    let mut tokens = Vec::new();
    let mut start = 0;

    loop {
        let rest = &text[start..];
        let leading = rest.len() - rest.trim_start_matches(' ').len();
        let mut search_from = start + leading;

        if rest[leading..].starts_with('"') {
            let (_, end) = parse_quoted(&rest[leading..], line, col + start + leading)?;
            search_from += end;
        }

        match text[search_from..].find(delimiter) {
            Some(idx) => {
                let end = search_from + idx;
                tokens.push((start, &text[start..end]));
                start = end + delimiter.len_utf8();
            }
            None => {
                tokens.push((start, &text[start..]));
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str) -> Value {
        parse_token(raw, 1, 1).unwrap()
    }

    #[test]
    fn test_quoting_rules() {
        let d = Delimiter::Comma;
        assert!(needs_quotes("", d));
        assert!(needs_quotes("  leading", d));
        assert!(needs_quotes("trailing ", d));
        assert!(needs_quotes("1.0", d));
        assert!(needs_quotes("42", d));
        assert!(needs_quotes("-7", d));
        assert!(needs_quotes("1e5", d));
        assert!(needs_quotes("true", d));
        assert!(needs_quotes("null", d));
        assert!(needs_quotes("A:B", d));
        assert!(needs_quotes("a,b", d));
        assert!(needs_quotes("-item", d));
        assert!(needs_quotes("\"quoted", d));
        assert!(needs_quotes("two\nlines", d));

        assert!(!needs_quotes("MOUSE-BT", d));
        assert!(!needs_quotes("hello world", d));
        assert!(!needs_quotes("True", d));
        assert!(!needs_quotes("inf", d));
        assert!(!needs_quotes("NaN", d));
        assert!(!needs_quotes("1.", d));
        assert!(!needs_quotes("[3]", d));
        assert!(!needs_quotes("say \"hi\"", d));
    }

    #[test]
    fn test_token_classification_order() {
        assert_eq!(token("true"), Value::Bool(true));
        assert_eq!(token("false"), Value::Bool(false));
        assert_eq!(token("null"), Value::Null);
        assert_eq!(token("123"), Value::Int(123));
        assert_eq!(token("-5"), Value::Int(-5));
        assert_eq!(token("2.0"), Value::Float(2.0));
        assert_eq!(token("1e3"), Value::Float(1000.0));
        assert_eq!(token("\"123\""), Value::from("123"));
        assert_eq!(token("MOUSE-BT"), Value::from("MOUSE-BT"));
        assert_eq!(token("inf"), Value::from("inf"));
        assert_eq!(token("  padded "), Value::from("padded"));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(token("99999999999999999999"), Value::Float(1e20));
    }

    #[test]
    fn test_out_of_range_float_is_rejected() {
        assert!(matches!(
            parse_token("1e999", 4, 1),
            Err(DecodeError::InvalidNumber { line: 4, .. })
        ));
    }

    #[test]
    fn test_empty_token_is_missing_value() {
        assert_eq!(
            parse_token("  ", 7, 1),
            Err(DecodeError::MissingValue { line: 7 })
        );
    }

    #[test]
    fn test_unquoted_colon_is_rejected() {
        assert!(matches!(
            parse_token("a:b", 1, 1),
            Err(DecodeError::UnrecognizedLine { .. })
        ));
    }

    #[test]
    fn test_quote_and_unescape_are_inverse() {
        for s in ["", "plain", "a\"b", "back\\slash", "tab\there", "bell\u{7}", "é ü 👋"] {
            let quoted = quote(s);
            let (back, end) = parse_quoted(&quoted, 1, 1).unwrap();
            assert_eq!(back, s);
            assert_eq!(end, quoted.len());
        }
    }

    #[test]
    fn test_unknown_escape_is_rejected() {
        assert!(matches!(
            parse_quoted(r#""a\qb""#, 2, 5),
            Err(DecodeError::InvalidEscape { line: 2, .. })
        ));
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            parse_quoted("\"abc", 3, 9),
            Err(DecodeError::UnterminatedString { line: 3, col: 9 })
        );
    }

    #[test]
    fn test_split_respects_quotes() {
        let tokens = split_delimited(r#"a,"b,c",d"#, ',', 1, 1).unwrap();
        let raw: Vec<_> = tokens.iter().map(|(_, t)| *t).collect();
        assert_eq!(raw, vec!["a", "\"b,c\"", "d"]);
        assert_eq!(tokens[2].0, 8);
    }

    #[test]
    fn test_split_inner_quote_is_literal() {
        let tokens = split_delimited("a\"b|c", '|', 1, 1).unwrap();
        let raw: Vec<_> = tokens.iter().map(|(_, t)| *t).collect();
        assert_eq!(raw, vec!["a\"b", "c"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(matches!(
            split_delimited("a,\"b,c", ',', 1, 1),
            Err(DecodeError::UnterminatedString { col: 3, .. })
        ));
    }

    #[test]
    fn test_keys() {
        assert_eq!(format_key("user_name.first"), "user_name.first");
        assert_eq!(format_key("user-id"), "\"user-id\"");
        assert_eq!(format_key("2nd"), "\"2nd\"");
        assert_eq!(format_key(""), "\"\"");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(14.5).unwrap(), "14.5");
        assert_eq!(format_float(-0.0).unwrap(), "-0.0");
        assert_eq!(format_float(1e300).unwrap(), "1e300");
        assert!(is_float_literal(&format_float(1.5e-9).unwrap()));
        assert!(matches!(
            format_float(f64::NEG_INFINITY),
            Err(EncodeError::NonFiniteNumber(_))
        ));
    }
}
