//! Kind-based validation

use indexmap::IndexSet;
use serde_json::Value;

use super::Validator;
use crate::value::Kind;

/// Validates that an argument has one of the expected kinds.
///
/// By default subkinds match too (an `Int` validator accepts any int), with
/// one carve-out: bools are excluded from numeric matches unless
/// [`with_bool_subclasses`](TypeValidator::with_bool_subclasses) is enabled.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_intercept::prelude::*;
/// use serde_json::json;
///
/// let numbers = TypeValidator::new([Kind::Number]);
/// assert!(numbers.check(&json!(1)));
/// assert!(numbers.check(&json!(1.5)));
/// assert!(!numbers.check(&json!(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValidator {
    kinds: IndexSet<Kind>,
    check_subclasses: bool,
    check_bool_subclasses: bool,
}

impl TypeValidator {
    /// Creates a validator over the given kinds. Duplicates are dropped.
    pub fn new(kinds: impl IntoIterator<Item = Kind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            check_subclasses: true,
            check_bool_subclasses: false,
        }
    }

    /// When false, only exact kinds match.
    pub fn with_subclasses(mut self, check_subclasses: bool) -> Self {
        self.check_subclasses = check_subclasses;
        self
    }

    /// When true, bools may satisfy `Int` and `Number` through subkind matching.
    pub fn with_bool_subclasses(mut self, check_bool_subclasses: bool) -> Self {
        self.check_bool_subclasses = check_bool_subclasses;
        self
    }

    /// Returns the expected kinds in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.iter().copied()
    }
}

impl Validator for TypeValidator {
    fn check(&self, arg: &Value) -> bool {
        let kind = Kind::of(arg);
        if !self.check_subclasses || (!self.check_bool_subclasses && kind == Kind::Bool) {
            return self.kinds.contains(&kind);
        }
        self.kinds.iter().any(|expected| kind.is_subkind_of(*expected))
    }

    fn error_message(&self, arg: &Value) -> String {
        let expected = self
            .kinds
            .iter()
            .map(Kind::name)
            .collect::<Vec<_>>()
            .join(" or ");
        format!("Type {expected} expected but got {}", Kind::of(arg))
    }

    fn name(&self) -> &'static str {
        "TypeValidator"
    }
}
