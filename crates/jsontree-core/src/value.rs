//! The owned tree produced by the parser.
//!
//! A [`Document`] owns one root [`Node`]. A node is an ordered list of named
//! [`Value`]s; an object-valued member owns its own nested node, so ownership
//! is a strict tree and dropping (or [`free`](crate::free())ing) the document
//! releases everything exactly once.

use std::fmt;
use std::mem;

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    Float,
    Double,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(s)
    }
}

/// Kind-specific payload of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The literal bare word: `null`, or whatever unrecognized word was
    /// classified as null.
    Null(String),
    Boolean(bool),
    Number(i64),
    Float(f32),
    Double(f64),
    String(String),
    Array(Array),
    Object(Node),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Null(_) => Kind::Null,
            Payload::Boolean(_) => Kind::Boolean,
            Payload::Number(_) => Kind::Number,
            Payload::Float(_) => Kind::Float,
            Payload::Double(_) => Kind::Double,
            Payload::String(_) => Kind::String,
            Payload::Array(_) => Kind::Array,
            Payload::Object(_) => Kind::Object,
        }
    }
}

/// A named, typed member of an object or element of an array.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    name: String,
    payload: Payload,
}

impl Value {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// The member key, or `#<index>` for array elements.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_parts(self) -> (String, Payload) {
        (self.name, self.payload)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null(_))
    }

    /// String text, or the literal word of a null.
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) | Payload::Null(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.payload {
            Payload::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Any numeric payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.payload {
            Payload::Number(n) => Some(n as f64),
            Payload::Float(f) => Some(f64::from(f)),
            Payload::Double(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match &self.payload {
            Payload::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Node> {
        match &self.payload {
            Payload::Object(n) => Some(n),
            _ => None,
        }
    }
}

/// An object's members, in document order.
///
/// Duplicate member names are kept; [`Node::get`] returns the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    name: String,
    values: Vec<Value>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.name == name)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.values.iter().filter(move |v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn into_parts(mut self) -> (String, Vec<Value>) {
        (mem::take(&mut self.name), mem::take(&mut self.values))
    }
}

/// Nested objects are detached onto a work list before they drop, so
/// dropping a tree of any depth uses constant stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_objects(&mut self.values, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_objects(&mut node.values, &mut pending);
        }
    }
}

fn detach_objects(values: &mut [Value], pending: &mut Vec<Node>) {
    for value in values {
        match &mut value.payload {
            Payload::Object(node) => pending.push(mem::take(node)),
            Payload::Array(array) => detach_objects(&mut array.items, pending),
            _ => {}
        }
    }
}

/// A flat sequence of scalar values.
///
/// The length is stored. [`Array::entries`] additionally presents the
/// sentinel-terminated view: every element followed by one
/// [`ArrayEntry::Sentinel`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries {
            items: self.items.iter(),
            done: false,
        }
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One slot of the sentinel-terminated array view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayEntry<'a> {
    Element(&'a Value),
    /// End-of-array marker. Its name is empty.
    Sentinel,
}

impl<'a> ArrayEntry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ArrayEntry::Element(v) => v.name(),
            ArrayEntry::Sentinel => "",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, ArrayEntry::Sentinel)
    }
}

/// Iterator over [`Array::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    items: std::slice::Iter<'a, Value>,
    done: bool,
}

impl<'a> Iterator for Entries<'a> {
    type Item = ArrayEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.items.next() {
            Some(v) => Some(ArrayEntry::Element(v)),
            None => {
                self.done = true;
                Some(ArrayEntry::Sentinel)
            }
        }
    }
}

/// A non-fatal finding recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A bare word that is not `true`, `false` or `null`, stored as null.
    UnrecognizedLiteral {
        name: String,
        word: String,
        offset: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedLiteral { name, word, offset } => write!(
                f,
                "`{name}`: bare word `{word}` at byte {offset} treated as null"
            ),
        }
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Option<Node>,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn new(root: Node, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            root: Some(root),
            diagnostics,
        }
    }

    /// The root node, named `"root"`. `None` after [`Document::take_root`].
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn take_root(&mut self) -> Option<Node> {
        self.root.take()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
