//! # toml-ast
//!
//! A production-grade TOML parser with an explicit typed AST, deterministic
//! semantics, and safe post-parse traversal.
//!
//! ## Scope
//!
//! This crate parses TOML v1.0.0 core documents — nested tables, arrays of
//! tables, inline tables, all four string forms, and the full range of
//! scalar literals (booleans, integers in four bases, floats including
//! `inf`/`nan`, and the four date/time variants) — into an explicit tree of
//! [`Table`] / [`Array`] / [`Value`] nodes.
//!
//! Non-goals, by design:
//!
//! - Comment preservation
//! - Formatting round-trip (no serialization back to TOML text)
//! - Streaming mutation of a parsed tree
//!
//! ## Key Guarantees
//!
//! - **Deterministic**: the same input always yields a structurally
//!   identical tree; table entries keep document order
//! - **No silent overwrites**: rebinding a key, or extending a binding of
//!   the wrong shape, is a hard error with the offending line number
//! - **Typed**: every node reports a [`Kind`] discriminant; typed accessors
//!   fail instead of coercing
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_ast::parse_str;
//!
//! let root = parse_str(r#"
//! title = "example"
//!
//! [owner]
//! name = "Tom"
//! dob = 1979-05-27T07:32:00Z
//!
//! [[products]]
//! name = "Hammer"
//! sku = 738594937
//! "#).unwrap();
//!
//! assert_eq!(root.get(&["title"]).and_then(|n| n.as_str()), Some("example"));
//! assert_eq!(root.get(&["owner", "name"]).and_then(|n| n.as_str()), Some("Tom"));
//!
//! let products = root.get(&["products"]).and_then(|n| n.as_array()).unwrap();
//! assert_eq!(products.len(), 1);
//! ```
//!
//! ## Error Reporting
//!
//! Parsing stops at the first error. Every parse error carries the 1-based
//! line number where the offending logical line began:
//!
//! ```rust
//! use toml_ast::parse_str;
//!
//! let err = parse_str("sku = 1\nsku = 2").unwrap_err();
//! assert_eq!(err.to_string(), "toml:2: duplicate key \"sku\"");
//! assert_eq!(err.line(), Some(2));
//! ```
//!
//! ## Generic Values
//!
//! Callers that do not need the typed AST can convert any node — or the
//! whole document — into a [`serde_json::Value`]:
//!
//! ```rust
//! use toml_ast::parse_str;
//!
//! let root = parse_str("ports = [8001, 8002]").unwrap();
//! assert_eq!(root.get_generic(&["ports"]), Some(serde_json::json!([8001, 8002])));
//! ```

pub mod error;
pub mod map;
pub mod value;

mod decode;
mod key;
mod parser;
mod scanner;

pub use error::{Error, Result};
pub use map::TomlMap;
pub use value::{Array, Kind, Node, Table, Value};

use std::io;

/// Parses a TOML document from a string and returns the root table.
///
/// The whole input is consumed; the first error aborts the parse and no
/// partial tree is returned.
///
/// # Examples
///
/// ```rust
/// use toml_ast::parse_str;
///
/// let root = parse_str("[server]\nport = 8080").unwrap();
/// assert_eq!(root.get(&["server", "port"]).and_then(|n| n.as_integer()), Some(8080));
/// ```
///
/// # Errors
///
/// Returns the first syntax, key-conflict, duplicate-key, unterminated-
/// construct, or decode error encountered, annotated with its line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Table> {
    parser::parse_document(input)
}

/// Parses a TOML document from an I/O stream.
///
/// Reads the stream to completion, then parses it. Any byte source that is
/// UTF-8 text line-splittable on newlines works; no file extension or
/// encoding beyond UTF-8 is assumed.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use toml_ast::parse_reader;
///
/// let root = parse_reader(Cursor::new(b"answer = 42")).unwrap();
/// assert_eq!(root.get(&["answer"]).and_then(|n| n.as_integer()), Some(42));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise any parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R: io::Read>(mut reader: R) -> Result<Table> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse_str(&input)
}

/// Parses a TOML document from bytes.
///
/// # Errors
///
/// Returns a decode error (with the line of the first invalid byte) if the
/// input is not valid UTF-8, otherwise any parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(input: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(input).map_err(|e| {
        let line = input[..e.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        Error::decode(line, "input is not valid utf-8")
    })?;
    parse_str(text)
}
