use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural category of a [`Value`].
///
/// Two values at the same position are only compared piecewise when they
/// share a shape; otherwise the newer value is taken wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `null`, booleans, numbers and strings.
    Scalar,
    /// An ordered sequence.
    List,
    /// A string-keyed mapping.
    Record,
}

impl Shape {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Shape::List,
            Value::Object(_) => Shape::Record,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shape::Scalar => "scalar",
            Shape::List => "list",
            Shape::Record => "record",
        };
        f.write_str(s)
    }
}
