//! Whole-tree deallocation.
//!
//! [`free`] consumes a [`Document`] and releases it depth-first, counting what
//! it releases. Dropping a document reclaims the same memory; `free` exists
//! for callers that want the release to happen at a known point and want to
//! know how much was in the tree.

use serde::Serialize;
use tracing::trace;

use crate::value::{Array, Document, Node, Payload, Value};

/// Counts of the resources released by [`free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Released {
    /// Nodes, including the root.
    pub nodes: usize,
    /// Values held by nodes and arrays.
    pub values: usize,
    /// Owned text buffers: node names, value names, string and null text.
    pub strings: usize,
    /// Array backing sequences.
    pub arrays: usize,
}

impl Released {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Release every resource reachable from `document`.
///
/// Nested objects go onto a work list instead of the call stack, so the walk
/// handles any depth the parser accepted. A document without a root releases
/// nothing.
pub fn free(mut document: Document) -> Released {
    let mut released = Released::default();
    let mut pending: Vec<Node> = document.take_root().into_iter().collect();
    while let Some(node) = pending.pop() {
        free_node(node, &mut pending, &mut released);
    }
    trace!(?released, "document freed");
    released
}

fn free_node(node: Node, pending: &mut Vec<Node>, released: &mut Released) {
    let (name, values) = node.into_parts();
    for value in values {
        free_value(value, pending, released);
    }
    drop(name);
    released.strings += 1;
    released.nodes += 1;
}

fn free_value(value: Value, pending: &mut Vec<Node>, released: &mut Released) {
    let (name, payload) = value.into_parts();
    match payload {
        Payload::Object(node) => pending.push(node),
        Payload::Null(text) | Payload::String(text) => {
            drop(text);
            released.strings += 1;
        }
        Payload::Array(array) => free_array(array, pending, released),
        Payload::Boolean(_) | Payload::Number(_) | Payload::Float(_) | Payload::Double(_) => {}
    }
    drop(name);
    released.strings += 1;
    released.values += 1;
}

/// Release the elements that precede the sentinel, then the sequence.
fn free_array(array: Array, pending: &mut Vec<Node>, released: &mut Released) {
    let len = array
        .entries()
        .take_while(|entry| !entry.is_sentinel())
        .count();
    trace!(len, "freeing array");
    for item in array.into_items().into_iter().take(len) {
        free_value(item, pending, released);
    }
    released.arrays += 1;
}
