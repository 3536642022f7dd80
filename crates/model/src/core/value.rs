use crate::core::utils::format_float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of an export table.
///
/// Cells are read as text. Only the stock column is ever turned into a
/// number, and only by the inventory reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl Value {
    /// Builds a cell from raw CSV text. Empty cells become `Null`.
    pub fn from_cell(raw: &str) -> Self {
        if raw.is_empty() {
            Value::Null
        } else {
            Value::String(raw.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::String(v) => v.trim().parse::<f64>().ok(),
            Value::Null => None,
        }
    }

    /// Coerces the cell to a number. Anything that does not parse as a finite
    /// number becomes `Int(0)`.
    pub fn to_numeric(&self) -> Value {
        match self {
            Value::Int(v) => Value::Int(*v),
            Value::Float(v) if v.is_finite() => Value::Float(*v),
            Value::Float(_) | Value::Null => Value::Int(0),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(v) = s.parse::<i64>() {
                    return Value::Int(v);
                }
                match s.parse::<f64>() {
                    Ok(v) if v.is_finite() => Value::Float(v),
                    _ => Value::Int(0),
                }
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            _ => false,
        }
    }

    /// Text written to the spreadsheet for this cell.
    pub fn to_cell_string(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::String(v) => v.clone(),
            Value::Null => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell_string())
    }
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Value::from_cell(raw)
    }
}
