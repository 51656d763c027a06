//! Core types for umbra.
//!
//! `PropValue` is the dynamic value carried by reactive properties. It is
//! deliberately small: the host platform's property surface is untyped, so
//! the runtime moves one of five shapes around and serializes it to the
//! attribute string form on demand.

use std::fmt;

// =============================================================================
// Prop Value
// =============================================================================

/// A dynamic property value.
///
/// Comparison is strict: values of different shapes are never equal, so
/// `Int(1)`, `Float(1.0)` and `Str("1")` are three distinct values. The
/// equality gate in the property setters relies on this.
///
/// The `Display` form is the attribute string form: `null`, `true`/`false`,
/// plain number formatting, and strings verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// Absent / cleared value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl PropValue {
    /// True if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Borrow the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("null"),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Str(s) => f.write_str(s),
        }
    }
}

impl Default for PropValue {
    fn default() -> Self {
        PropValue::Null
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms() {
        assert_eq!(PropValue::Null.to_string(), "null");
        assert_eq!(PropValue::Bool(true).to_string(), "true");
        assert_eq!(PropValue::Bool(false).to_string(), "false");
        assert_eq!(PropValue::Int(42).to_string(), "42");
        assert_eq!(PropValue::Float(1.5).to_string(), "1.5");
        assert_eq!(PropValue::Float(1.0).to_string(), "1");
        assert_eq!(PropValue::Str("hi".into()).to_string(), "hi");
    }

    #[test]
    fn test_strict_equality_across_shapes() {
        assert_ne!(PropValue::Int(1), PropValue::Float(1.0));
        assert_ne!(PropValue::Int(1), PropValue::Str("1".into()));
        assert_ne!(PropValue::Bool(false), PropValue::Null);
        assert_eq!(PropValue::Int(1), PropValue::Int(1));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(PropValue::from(3), PropValue::Int(3));
        assert_eq!(PropValue::from("x"), PropValue::Str("x".into()));
        assert_eq!(PropValue::from(true), PropValue::Bool(true));
    }
}
