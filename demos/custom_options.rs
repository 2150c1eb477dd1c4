//! Customizing output with EncodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use std::error::Error;
use tost::{decode, from_str, to_string_with_options, to_value, Delimiter, EncodeOptions};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct DataRow {
    id: u32,
    value: String,
    active: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Report {
    name: String,
    rows: Vec<DataRow>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let report = Report {
        name: "nightly".to_string(),
        rows: vec![
            DataRow {
                id: 1,
                value: "a,b".to_string(),
                active: true,
            },
            DataRow {
                id: 2,
                value: "c|d".to_string(),
                active: false,
            },
        ],
    };

    let variants = [
        ("Default (comma)", EncodeOptions::default()),
        (
            "Tab delimiter",
            EncodeOptions::new().with_delimiter(Delimiter::Tab),
        ),
        (
            "Pipe delimiter, 4-space indent",
            EncodeOptions::new()
                .with_delimiter(Delimiter::Pipe)
                .with_indent(4),
        ),
        (
            "Length marker (#)",
            EncodeOptions::new().with_length_marker('#'),
        ),
    ];

    for (label, options) in &variants {
        let text = to_string_with_options(&report, options)?;
        println!("{}:\n{}\n", label, text);

        // Headers carry the delimiter and marker, so decoding needs no options
        let back: Report = from_str(&text)?;
        assert_eq!(back, report);
        assert_eq!(decode(&text)?, to_value(&report)?);
    }

    // A marker that clashes with the delimiter is rejected up front
    let clash = EncodeOptions::new()
        .with_delimiter(Delimiter::Pipe)
        .with_length_marker('|');
    match to_string_with_options(&report, &clash) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected: {}", e),
    }

    Ok(())
}
