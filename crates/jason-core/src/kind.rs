//! # Type Kinds — The Closed Primitive Vocabulary
//!
//! Defines [`TypeKind`], the seven primitive JSON value kinds a schema can
//! name, and [`TypeName`], which adds the `any` pseudo-name accepted in
//! `type` and `disallow` properties.
//!
//! `integer` is a kind of its own for schema purposes, but every integral
//! instance is also a `number`. That relationship is enforced by
//! [`TypeSet`](crate::TypeSet), not here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::SchemaError;

/// A primitive JSON value kind recognized in schemas.
///
/// Variants are declared alphabetically; the derived `Ord` is the order used
/// when a set of kinds is formatted in a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TypeKind {
    /// JSON array.
    Array = 0,
    /// `true` or `false`.
    Boolean = 1,
    /// A number with no fractional component.
    Integer = 2,
    /// `null`.
    Null = 3,
    /// Any JSON number, integral or not.
    Number = 4,
    /// JSON object.
    Object = 5,
    /// JSON string.
    String = 6,
}

/// Total number of type kinds.
pub const TYPE_KIND_COUNT: usize = 7;

impl TypeKind {
    /// Returns all seven kinds in canonical order.
    pub fn all_kinds() -> &'static [TypeKind] {
        &[
            Self::Array,
            Self::Boolean,
            Self::Integer,
            Self::Null,
            Self::Number,
            Self::Object,
            Self::String,
        ]
    }

    /// The schema name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
        }
    }

    /// Bit position of this kind inside a [`TypeSet`](crate::TypeSet).
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// The most specific kind of an instance value.
    ///
    /// A number with no fractional component reports `Integer`, including
    /// floating-point literals such as `2.0`.
    pub fn of(value: &Value) -> TypeKind {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.fract() == 0.0 => Self::Integer,
                        _ => Self::Number,
                    }
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(Self::Array),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "null" => Ok(Self::Null),
            "number" => Ok(Self::Number),
            "object" => Ok(Self::Object),
            "string" => Ok(Self::String),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }
}

/// A name accepted in a `type` or `disallow` property: one of the seven
/// kinds, or `any` meaning every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// The unconstrained pseudo-kind.
    Any,
    /// A single primitive kind.
    Kind(TypeKind),
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Kind(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for TypeName {
    type Err = SchemaError;

    /// Parse a type name. Case-sensitive; the error carries the literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            Ok(Self::Any)
        } else {
            s.parse().map(Self::Kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_kinds_count() {
        assert_eq!(TypeKind::all_kinds().len(), TYPE_KIND_COUNT);
    }

    #[test]
    fn test_all_kinds_sorted_and_unique() {
        let kinds = TypeKind::all_kinds();
        for pair in kinds.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for kind in TypeKind::all_kinds() {
            let parsed: TypeKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_from_str_unknown_keeps_literal() {
        let err = "pwet".parse::<TypeKind>().unwrap_err();
        assert_eq!(err, SchemaError::UnknownType("pwet".to_string()));
        assert!("String".parse::<TypeKind>().is_err()); // case-sensitive
        assert!("".parse::<TypeKind>().is_err());
    }

    #[test]
    fn test_any_is_a_name_not_a_kind() {
        assert_eq!("any".parse::<TypeName>().unwrap(), TypeName::Any);
        assert!("any".parse::<TypeKind>().is_err());
        assert_eq!(
            "null".parse::<TypeName>().unwrap(),
            TypeName::Kind(TypeKind::Null)
        );
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for kind in TypeKind::all_kinds() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_kind_of_instances() {
        assert_eq!(TypeKind::of(&json!(null)), TypeKind::Null);
        assert_eq!(TypeKind::of(&json!(false)), TypeKind::Boolean);
        assert_eq!(TypeKind::of(&json!("x")), TypeKind::String);
        assert_eq!(TypeKind::of(&json!([])), TypeKind::Array);
        assert_eq!(TypeKind::of(&json!({})), TypeKind::Object);
        assert_eq!(TypeKind::of(&json!(3)), TypeKind::Integer);
        assert_eq!(TypeKind::of(&json!(-3)), TypeKind::Integer);
        assert_eq!(TypeKind::of(&json!(u64::MAX)), TypeKind::Integer);
        assert_eq!(TypeKind::of(&json!(2.0)), TypeKind::Integer);
        assert_eq!(TypeKind::of(&json!(2.5)), TypeKind::Number);
    }
}
