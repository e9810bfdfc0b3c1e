//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default limit on object nesting below the root.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Storage precision for numbers with a fraction or exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// `f32`, stored as [`Payload::Float`](crate::Payload::Float).
    Single,
    /// `f64`, stored as [`Payload::Double`](crate::Payload::Double).
    #[default]
    Double,
}

/// Options accepted by [`parse_with`](crate::parse_with).
///
/// Deserializes from a partial JSON object; missing fields take their
/// defaults.
///
/// ```
/// use jsontree_core::ParseOptions;
///
/// let opts = ParseOptions::default().with_max_depth(8).with_strict_literals(true);
/// assert_eq!(opts.max_depth, 8);
/// assert!(opts.strict_literals);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest allowed object nesting below the root.
    pub max_depth: usize,
    /// Reject bare words other than `true`, `false` and `null` instead of
    /// storing them as null.
    pub strict_literals: bool,
    /// Reject a member name already present in the same object.
    pub reject_duplicate_keys: bool,
    /// Ignore whatever follows the root object's closing brace.
    pub allow_trailing_content: bool,
    pub precision: Precision,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_literals: false,
            reject_duplicate_keys: false,
            allow_trailing_content: false,
            precision: Precision::Double,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_literals(mut self, strict: bool) -> Self {
        self.strict_literals = strict;
        self
    }

    pub fn with_reject_duplicate_keys(mut self, reject: bool) -> Self {
        self.reject_duplicate_keys = reject;
        self
    }

    pub fn with_allow_trailing_content(mut self, allow: bool) -> Self {
        self.allow_trailing_content = allow;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }
}
