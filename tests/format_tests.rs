use serde_json::json;
use tost::{decode, encode, encode_default, to_value, tost, Delimiter, EncodeOptions, Value};

fn from_json(json: serde_json::Value) -> Value {
    to_value(&json).unwrap()
}

fn roundtrip(value: &Value) -> Value {
    let text = encode_default(value).unwrap();
    decode(&text).unwrap_or_else(|e| panic!("failed to decode {:?}: {}", text, e))
}

#[test]
fn test_string_quoting_is_inverse_of_decoding() {
    for s in [
        "",
        "  leading",
        "trailing ",
        "1.0",
        "42",
        "-7",
        "1e5",
        "true",
        "false",
        "null",
        "A:B",
        "a,b",
        "MOUSE-BT",
        "-item",
        "\"quoted\"",
        "line\nbreak",
        "tab\there",
        "back\\slash",
        "unicode ✓",
        "[3]",
        "{x}",
        "- dash",
    ] {
        let value = tost!({ "s": s });
        assert_eq!(roundtrip(&value), value, "string {:?} did not survive", s);
    }
}

#[test]
fn test_internal_hyphen_is_bare_and_leading_hyphen_is_quoted() {
    assert_eq!(
        encode_default(&tost!({ "a": "MOUSE-BT", "b": "-item" })).unwrap(),
        "a: MOUSE-BT\nb: \"-item\""
    );
}

#[test]
fn test_number_and_numeric_string_stay_distinct() {
    let value = tost!({ "n": 42, "s": "42", "f": 1.5, "fs": "1.5", "whole": 2.0 });
    let text = encode_default(&value).unwrap();
    assert_eq!(text, "n: 42\ns: \"42\"\nf: 1.5\nfs: \"1.5\"\nwhole: 2.0");

    let back = decode(&text).unwrap();
    assert_eq!(back, value);
    assert_eq!(back["whole"], Value::Float(2.0));
    assert_eq!(back["n"], Value::Int(42));
}

#[test]
fn test_tabular_detection() {
    let value = from_json(json!({
        "items": [
            { "sku": "A1", "qty": 2, "price": 9.99 },
            { "sku": "B2", "qty": 1, "price": 14.5 }
        ]
    }));
    let text = encode_default(&value).unwrap();
    assert!(text.contains("items[2]{sku,qty,price}:"));
    assert!(text.contains("\n  A1,2,9.99"));
    assert!(text.contains("\n  B2,1,14.5"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_non_uniform_objects_fall_back_to_list() {
    let value = from_json(json!({ "items": [{ "a": 1 }, { "a": 1, "b": 2 }] }));
    let text = encode_default(&value).unwrap();
    assert!(!text.contains('{'));
    assert!(text.contains("items[2]:"));
    assert!(text.contains("  - a: 1"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_empty_array() {
    assert_eq!(encode_default(&tost!({ "empty": [] })).unwrap(), "empty[0]:");
    assert_eq!(decode("empty[0]:").unwrap(), tost!({ "empty": [] }));
}

#[test]
fn test_array_of_arrays() {
    let text = encode_default(&tost!({ "matrix": [[1, 2], [3, 4]] })).unwrap();
    assert!(text.contains("matrix[2]:"));
    assert!(text.contains("- [2]:"));
    assert!(text.contains("1,2"));
    assert!(text.contains("3,4"));

    let value = decode("matrix[2]:\n  - [2]: 1,2\n  - [2]: 3,4").unwrap();
    assert_eq!(value["matrix"], tost!([[1, 2], [3, 4]]));
}

#[test]
fn test_custom_options_are_self_describing() {
    let value = tost!({ "items": [{ "sku": "A1", "qty": 2 }] });
    let options = EncodeOptions::new()
        .with_indent(4)
        .with_delimiter(Delimiter::Pipe)
        .with_length_marker('#');

    let text = encode(&value, &options).unwrap();
    assert!(text.contains("items[#1|]{sku|qty}:"));
    assert!(text.contains("A1|2"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_root_level_array() {
    assert_eq!(decode("[#3|]: a|b|c").unwrap(), tost!(["a", "b", "c"]));
}

#[test]
fn test_delimiter_only_quotes_the_active_one() {
    let value = tost!({ "row": ["a,b", "c|d"] });

    let comma = encode_default(&value).unwrap();
    assert_eq!(comma, "row[2]: \"a,b\",c|d");

    let pipe = encode(&value, &EncodeOptions::new().with_delimiter(Delimiter::Pipe)).unwrap();
    assert_eq!(pipe, "row[2|]: a,b|\"c|d\"");

    assert_eq!(decode(&comma).unwrap(), value);
    assert_eq!(decode(&pipe).unwrap(), value);
}

#[test]
fn test_key_order_is_preserved() {
    let value = from_json(json!({ "zeta": 1, "alpha": { "y": 1, "b": 2 }, "mid": [] }));
    let back = roundtrip(&value);
    let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    let inner: Vec<_> = back["alpha"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(inner, vec!["y", "b"]);
}

#[test]
fn test_deeply_mixed_document() {
    let value = from_json(json!({
        "name": "catalog",
        "version": 3,
        "ratio": 0.25,
        "flags": [true, false, null],
        "owners": [],
        "sections": [
            {
                "title": "Tools",
                "entries": [
                    { "id": 1, "label": "hammer", "price": 12.5 },
                    { "id": 2, "label": "saw, hand", "price": 20.0 }
                ],
                "meta": {}
            },
            [1, [2, 3], {}],
            "loose",
            { "note": "x: y" }
        ],
        "empty": {}
    }));

    let text = encode_default(&value).unwrap();
    assert_eq!(decode(&text).unwrap(), value, "document was:\n{}", text);
}

#[test]
fn test_quoted_keys_roundtrip() {
    let value = tost!({
        "user-id": 1,
        "2nd": "b",
        "": "empty key",
        "with space": { "a.b": 1, "x:y": 2 },
        "rows": [{ "first name": "A", "last,name": "B" }]
    });
    let text = encode_default(&value).unwrap();
    assert!(text.starts_with("\"user-id\": 1\n"));
    assert!(text.contains("  a.b: 1"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_root_scalars() {
    for value in [
        tost!(null),
        tost!(true),
        tost!(17),
        tost!((-0.5)),
        tost!("plain words"),
        tost!("7"),
        tost!(""),
    ] {
        assert_eq!(roundtrip(&value), value);
    }
}

#[test]
fn test_empty_root_object() {
    assert_eq!(encode_default(&tost!({})).unwrap(), "");
    assert_eq!(decode("").unwrap(), tost!({}));
}

#[test]
fn test_tab_delimiter_roundtrip() {
    let value = tost!({
        "people": [
            { "name": "Ada Lovelace", "note": "a,b|c" },
            { "name": "tab\tinside", "note": "" }
        ],
        "tags": ["x y", "z"]
    });
    let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    let text = encode(&value, &options).unwrap();
    assert!(text.contains("people[2\t]{name\tnote}:"));
    assert!(text.contains("Ada Lovelace\ta,b|c"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_large_integers_and_floats() {
    let value = tost!({
        "max": (i64::MAX),
        "min": (i64::MIN),
        "tiny": 1e-300,
        "big": 1.5e300,
        "neg_zero_int": 0
    });
    assert_eq!(roundtrip(&value), value);
}

#[test]
fn test_integer_literal_beyond_i64_reads_as_float() {
    let value = decode("n: 92233720368547758070").unwrap();
    assert_eq!(value["n"], Value::Float(92_233_720_368_547_758_070.0));
}
