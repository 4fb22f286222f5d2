//! Node type classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Structural kind of a node's value.
///
/// Computed once when a node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Array-like sequence.
    Array,
    /// Keyed map.
    Object,
    /// Anything else: scalars, null, undefined, NaN.
    Value,
}

impl NodeType {
    /// Classifies a value.
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => NodeType::Array,
            Value::Object(_) => NodeType::Object,
            _ => NodeType::Value,
        }
    }

    /// Returns true if nodes of this type can have children.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, NodeType::Array | NodeType::Object)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NodeType::Array => "array",
            NodeType::Object => "object",
            NodeType::Value => "value",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
