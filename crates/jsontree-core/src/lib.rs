//! # jsontree-core
//!
//! Parses an in-memory JSON text into an owned tree of named, typed values.
//!
//! The tree mirrors the document's shape: a [`Document`] owns a root [`Node`]
//! named `"root"`, each node holds its members as [`Value`]s in document
//! order, and object members own nested nodes. Arrays are flat sequences of
//! scalars whose elements are named `#0`, `#1`, ...
//!
//! ## Quick start
//!
//! ```rust
//! use jsontree_core::{free, parse, Kind};
//!
//! let doc = parse(r#"{ "item1":"value1" "item3":{ "sub1":"subvalue1" } "item4":["a","b"] }"#).unwrap();
//! let root = doc.root().unwrap();
//!
//! assert_eq!(root.name(), "root");
//! assert_eq!(root.get("item1").and_then(|v| v.as_str()), Some("value1"));
//! assert_eq!(root.get("item3").map(|v| v.kind()), Some(Kind::Object));
//! assert_eq!(root.get("item4").and_then(|v| v.as_array()).map(|a| a.len()), Some(2));
//!
//! let released = free(doc);
//! assert_eq!(released.nodes, 2);
//! ```
//!
//! ## Modules
//!
//! - [`lexer`]: token alphabet and sub-scanners
//! - [`parser`]: the name/value state machine with its enclosing-node stack
//! - [`array`]: the flat array decoder
//! - [`value`]: `Document`, `Node`, `Value`, `Array`
//! - [`free`](mod@free): counted whole-tree deallocation
//! - [`options`]: `ParseOptions`
//! - [`error`]: `JsonError` and its kinds

pub mod array;
pub mod error;
pub mod free;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod value;

pub use error::{ErrorKind, JsonError, Position, Result};
pub use free::{free, Released};
pub use options::{ParseOptions, Precision, DEFAULT_MAX_DEPTH};
pub use value::{Array, ArrayEntry, Diagnostic, Document, Kind, Node, Payload, Value};

/// Parse `input` with default options.
///
/// The input must start (after whitespace) with `{`.
pub fn parse(input: &str) -> Result<Document> {
    parse_with(input, &ParseOptions::default())
}

/// Parse `input` with the given options.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Document> {
    parser::Parser::new(input, options).run()
}
