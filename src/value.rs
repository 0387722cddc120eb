use std::fmt;
use std::sync::Arc;

use crate::data_type::DataType;

/// Represents a single data value stored in a table.
///
/// This enum wraps every supported runtime type into one tag so values can be
/// passed around the engine and checked exhaustively. Equality compares the
/// tag and the payload at once: `Int(30)` is never equal to `Str("30")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value.
    Int(i64),
    /// A UTF-8 string value, wrapped in an [Arc] for cheap cloning when rows
    /// are snapshotted out of storage.
    Str(Arc<str>),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// Returns the inner integer value if this is a [Value::Int].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a reference to the inner string slice if this is a [Value::Str].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner boolean value if this is a [Value::Bool].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the logical [DataType] corresponding to this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Str(_) => DataType::Str,
            Self::Bool(_) => DataType::Bool,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Str("42".into()).as_int(), None);
        assert_eq!(Value::Str("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
    }

    #[test]
    fn test_data_type() {
        assert_eq!(Value::Int(1).data_type(), DataType::Int);
        assert_eq!(Value::Str("x".into()).data_type(), DataType::Str);
        assert_eq!(Value::Bool(false).data_type(), DataType::Bool);
    }

    #[test]
    fn test_equality_compares_tag_and_payload() {
        assert_eq!(Value::Int(30), Value::Int(30));
        assert_ne!(Value::Int(30), Value::Int(31));
        // Same digits, different declared type: never equal
        assert_ne!(Value::Int(30), Value::Str("30".into()));
        assert_ne!(Value::Bool(true), Value::Str("true".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Str("Ann".into()).to_string(), "Ann");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(5), Value::Int(5));
        assert_eq!(Value::from("a"), Value::Str("a".into()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }
}
