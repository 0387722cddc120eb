use std::fmt;

use crate::error::DbError;

/// Represents the supported column types of the store.
/// These types define the structure of tables and the expected shape of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// A 64-bit signed integer.
    Int,
    /// A variable-length UTF-8 character string.
    Str,
    /// A boolean value (true or false).
    Bool,
}

impl DataType {
    /// Parses a type token from a `create_table` column spec.
    ///
    /// Only the lowercase grammar tokens `int`, `str` and `bool` are
    /// accepted; anything else is an [DbError::InvalidColumnType].
    pub fn parse(token: &str) -> Result<Self, DbError> {
        match token {
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            "bool" => Ok(Self::Bool),
            _ => Err(DbError::InvalidColumnType(token.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::Bool => "bool",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_types() {
        assert_eq!(DataType::parse("int").unwrap(), DataType::Int);
        assert_eq!(DataType::parse("str").unwrap(), DataType::Str);
        assert_eq!(DataType::parse("bool").unwrap(), DataType::Bool);
    }

    #[test]
    fn test_parse_rejects_unknown_and_uppercase() {
        assert!(matches!(
            DataType::parse("float"),
            Err(DbError::InvalidColumnType(t)) if t == "float"
        ));
        // Type tokens are case-sensitive like the rest of the grammar
        assert!(DataType::parse("INT").is_err());
        assert!(DataType::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for dt in [DataType::Int, DataType::Str, DataType::Bool] {
            assert_eq!(DataType::parse(&dt.to_string()).unwrap(), dt);
        }
    }
}
