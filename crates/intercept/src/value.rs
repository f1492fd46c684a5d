//! Value kinds and comparison helpers.
//!
//! Arguments flowing through a [`Wrapper`](crate::wrapper::Wrapper) are
//! `serde_json::Value`s. This module classifies them into [`Kind`]s and
//! provides the loose equality and integral views that the built-in
//! validators are defined in terms of.
//!
//! Quick example:
//! ```rust,ignore
//! use nebula_intercept::value::Kind;
//! use serde_json::json;
//!
//! assert_eq!(Kind::of(&json!(3.5)), Kind::Float);
//! assert!(Kind::Bool.is_subkind_of(Kind::Int));
//! assert_eq!("integer".parse::<Kind>().unwrap(), Kind::Int);
//! ```

use core::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InterceptError;

/// Classification of a dynamic value.
///
/// `Number` is abstract: no value has it as its exact kind, but both `Int`
/// and `Float` are subkinds of it. `Bool` is a subkind of `Int`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Number,
    Str,
    List,
    Map,
}

impl Kind {
    /// Get the exact kind of a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Int,
            Value::String(_) => Self::Str,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Map,
        }
    }

    /// Direct parent in the kind hierarchy
    pub const fn parent(&self) -> Option<Self> {
        match self {
            Self::Bool => Some(Self::Int),
            Self::Int | Self::Float => Some(Self::Number),
            _ => None,
        }
    }

    /// Check if `self` equals `other` or descends from it
    pub fn is_subkind_of(&self, other: Self) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Number)
    }

    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::Str => "str",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "null" | "none" | "nil" => Ok(Self::Null),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" | "i64" => Ok(Self::Int),
            "float" | "f64" | "double" => Ok(Self::Float),
            "number" | "numeric" => Ok(Self::Number),
            "str" | "string" | "text" => Ok(Self::Str),
            "list" | "array" | "tuple" => Ok(Self::List),
            "map" | "dict" | "object" => Ok(Self::Map),
            other => Err(InterceptError::construction(format!(
                "unknown kind '{other}'"
            ))),
        }
    }
}

// ============================================================================
// COMPARISON HELPERS
// ============================================================================

/// Integral view of a value.
///
/// Ints map to themselves, bools to 0/1 and finite floats without a
/// fractional part to the integer they equal.
pub fn as_integral(value: &Value) -> Option<i128> {
    exact_integer(value).or_else(|| value.as_f64().and_then(float_to_integral))
}

/// 2^127, the first float past the `i128` range.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// The integer a float equals exactly, if any.
///
/// Floats outside the `i128` range are rejected rather than saturated, so
/// `1e40` never masquerades as `i128::MAX`.
fn float_to_integral(f: f64) -> Option<i128> {
    (f.fract() == 0.0 && (-I128_LIMIT..I128_LIMIT).contains(&f)).then_some(f as i128)
}

fn exact_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Bool(b) => Some(i128::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Equality that ignores numeric representation.
///
/// `1`, `1.0` and `true` are all loosely equal. Lists and maps compare
/// element-wise under the same rule.
pub fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| loosely_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(k, a)| r.get(k).is_some_and(|b| loosely_equal(a, b)))
        }
        (Value::Bool(_) | Value::Number(_), Value::Bool(_) | Value::Number(_)) => {
            // Int against float compares in the integers: converting the int
            // to f64 would round above 2^53.
            match (exact_integer(left), exact_integer(right)) {
                (Some(l), Some(r)) => l == r,
                (Some(i), None) => right.as_f64().and_then(float_to_integral) == Some(i),
                (None, Some(i)) => left.as_f64().and_then(float_to_integral) == Some(i),
                (None, None) => as_numeric(left) == as_numeric(right),
            }
        }
        _ => false,
    }
}

/// Human readable rendering used in error messages.
///
/// Strings are printed raw, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
        assert_eq!(Kind::of(&json!(true)), Kind::Bool);
        assert_eq!(Kind::of(&json!(1)), Kind::Int);
        assert_eq!(Kind::of(&json!(1.0)), Kind::Float);
        assert_eq!(Kind::of(&json!("x")), Kind::Str);
        assert_eq!(Kind::of(&json!([1])), Kind::List);
        assert_eq!(Kind::of(&json!({"a": 1})), Kind::Map);
    }

    #[test]
    fn test_hierarchy() {
        assert!(Kind::Bool.is_subkind_of(Kind::Int));
        assert!(Kind::Bool.is_subkind_of(Kind::Number));
        assert!(Kind::Float.is_subkind_of(Kind::Number));
        assert!(!Kind::Float.is_subkind_of(Kind::Int));
        assert!(!Kind::Int.is_subkind_of(Kind::Bool));
        assert!(Kind::Str.is_subkind_of(Kind::Str));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Integer".parse::<Kind>().unwrap(), Kind::Int);
        assert_eq!("dict".parse::<Kind>().unwrap(), Kind::Map);
        assert!("complex".parse::<Kind>().unwrap_err().is_construction());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_value(Kind::Str).unwrap(), json!("str"));
        let kind: Kind = serde_json::from_value(json!("float")).unwrap();
        assert_eq!(kind, Kind::Float);
    }

    #[test]
    fn test_loose_equality() {
        assert!(loosely_equal(&json!(1), &json!(1.0)));
        assert!(loosely_equal(&json!(true), &json!(1)));
        assert!(loosely_equal(&json!(0.0), &json!(false)));
        assert!(loosely_equal(&json!([1, "a"]), &json!([1.0, "a"])));
        assert!(!loosely_equal(&json!("1"), &json!(1)));
        assert!(!loosely_equal(&json!(null), &json!(0)));
        assert!(!loosely_equal(&json!(true), &json!(2)));
    }

    #[test]
    fn test_int_float_equality_is_exact() {
        let big = json!(9_007_199_254_740_993_i64);
        assert!(!loosely_equal(&big, &json!(9_007_199_254_740_992.0)));
        assert!(!loosely_equal(&json!(9_007_199_254_740_992.0), &big));
        assert!(loosely_equal(
            &json!(9_007_199_254_740_992_i64),
            &json!(9_007_199_254_740_992.0)
        ));
        assert!(loosely_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!loosely_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_is_numeric() {
        assert!(Kind::Int.is_numeric());
        assert!(Kind::Number.is_numeric());
        assert!(!Kind::Bool.is_numeric());
        assert!(!Kind::Str.is_numeric());
    }

    #[test]
    fn test_as_integral() {
        assert_eq!(as_integral(&json!(4)), Some(4));
        assert_eq!(as_integral(&json!(4.0)), Some(4));
        assert_eq!(as_integral(&json!(4.5)), None);
        assert_eq!(as_integral(&json!(true)), Some(1));
        assert_eq!(as_integral(&json!("4")), None);
        assert_eq!(as_integral(&json!(1e39)), None);
        assert_eq!(as_integral(&json!(-1e39)), None);
        assert_eq!(as_integral(&json!(2_f64.powi(100))), Some(1_i128 << 100));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
