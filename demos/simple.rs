//! Encoding and decoding, through serde and through dynamic values.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use std::error::Error;
use tost::{decode, encode_default, from_str, to_string, tost};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    // Uniform structs become one table
    let text = to_string(&users)?;
    println!("Users:\n{}\n", text);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful\n");

    // Strings that look like other types are quoted
    let value = tost!({
        "zip": "02134",
        "count": 2134,
        "flag": "true",
        "ratio": 1.0,
        "tags": ["-draft", "MOUSE-BT", ""]
    });
    let text = encode_default(&value)?;
    println!("Dynamic value:\n{}\n", text);
    assert_eq!(decode(&text)?, value);
    println!("✓ Types preserved");

    Ok(())
}
