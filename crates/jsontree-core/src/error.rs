//! Error types for parsing.

use std::fmt;

use thiserror::Error;

use crate::lexer::Token;
use crate::value::Kind;

/// What went wrong, without the location.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A token other than the one the grammar requires at this point.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: Token },

    /// End of input inside a quoted string.
    #[error("unterminated string")]
    UnterminatedString,

    /// End of input before the closing `]` of an array.
    #[error("unterminated array")]
    UnterminatedArray,

    /// End of input with `depth` objects still open.
    #[error("unclosed object ({depth} still open)")]
    UnclosedObject { depth: usize },

    /// Non-whitespace input after the root object closed.
    #[error("trailing content after the root object")]
    TrailingContent,

    /// A backslash escape the decoder does not handle (including `\u`).
    #[error("unsupported escape sequence `\\{0}`")]
    UnsupportedEscape(char),

    /// A numeric literal that does not parse.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    /// An integer literal outside the `i64` range.
    #[error("number `{0}` out of range")]
    NumberOutOfRange(String),

    /// Enclosing-node stack would exceed the configured depth.
    #[error("objects nested deeper than {limit}")]
    NestingTooDeep { limit: usize },

    /// An array or object used as an array element.
    #[error("{0} inside an array is not supported")]
    NestedContainer(Kind),

    /// A bare word other than `true`, `false` or `null` under strict literals.
    #[error("unknown literal `{0}`")]
    UnknownLiteral(String),

    /// A member name repeated within one object while duplicates are rejected.
    #[error("duplicate member `{0}`")]
    DuplicateKey(String),
}

/// A parse failure: the kind plus the byte offset where it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at byte {offset}")]
pub struct JsonError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl JsonError {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Resolve the offset against the input it came from.
    ///
    /// Line and column are 1-based; the column counts characters, not bytes.
    pub fn position(&self, input: &str) -> Position {
        Position::locate(input, self.offset)
    }
}

/// A 1-based line/column location in the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut end = offset.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        let before = &input[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Convenience alias used throughout jsontree-core.
pub type Result<T> = std::result::Result<T, JsonError>;
