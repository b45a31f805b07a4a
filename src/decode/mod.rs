// src/decode/mod.rs
//! Pure decoders: located raw text or attributes in, typed cell values out.
//!
//! A decoder that cannot make sense of its input returns `None`. That covers
//! pattern mismatches and out-of-range indices alike; neither is an error.

use std::fmt;

pub mod chart;
pub mod text;

/// A decoded cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Real(f64),
}

/// One cell: a value, or absent (rendered as an empty cell).
pub type Cell = Option<Value>;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s!(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

/// Render a cell for output; absent is the empty string.
pub fn render(cell: &Cell) -> String {
    cell.as_ref().map(Value::to_string).unwrap_or_default()
}
