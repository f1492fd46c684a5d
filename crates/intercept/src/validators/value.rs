//! Literal value membership

use serde_json::Value;

use super::Validator;
use crate::value::{Kind, display_value, loosely_equal};

/// Validates that an argument equals one of a set of literal values.
///
/// Equality ignores numeric representation (`1 == 1.0 == true`). With
/// `match_types` enabled (the default) the argument must also have the same
/// exact [`Kind`] as the value it matched, so `1` does not match `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueValidator {
    values: Vec<Value>,
    match_types: bool,
}

impl ValueValidator {
    /// Creates a validator accepting the given values. Exact duplicates are dropped.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self {
            values: unique,
            match_types: true,
        }
    }

    /// Toggles exact kind matching.
    pub fn with_match_types(mut self, match_types: bool) -> Self {
        self.match_types = match_types;
        self
    }

    /// Returns the acceptable values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Validator for ValueValidator {
    fn check(&self, arg: &Value) -> bool {
        self.values.iter().any(|value| {
            loosely_equal(arg, value) && (!self.match_types || Kind::of(arg) == Kind::of(value))
        })
    }

    fn error_message(&self, arg: &Value) -> String {
        let expected = self
            .values
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(" or ");
        format!("Value {expected} expected but got {}", display_value(arg))
    }

    fn name(&self) -> &'static str {
        "ValueValidator"
    }
}
