//! User-defined predicates

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Validator;
use crate::value::display_value;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Delegates acceptance entirely to a user predicate.
///
/// The predicate must be free of side effects and reentrant: it is shared
/// by every call to the wrapped function.
#[derive(Clone)]
pub struct UserValidator {
    label: Cow<'static, str>,
    predicate: Predicate,
}

impl UserValidator {
    /// Creates an anonymous predicate validator.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::named("", predicate)
    }

    /// Creates a predicate validator whose label appears in error messages.
    pub fn named<F>(label: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for UserValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserValidator")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Validator for UserValidator {
    fn check(&self, arg: &Value) -> bool {
        (self.predicate)(arg)
    }

    fn error_message(&self, arg: &Value) -> String {
        format!(
            "Expression {}({}) evaluated to False",
            self.label,
            display_value(arg)
        )
    }

    fn name(&self) -> &'static str {
        "UserValidator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delegates_to_predicate() {
        let even = UserValidator::named("is_even", |v| v.as_i64().is_some_and(|n| n % 2 == 0));
        assert!(even.check(&json!(4)));
        assert!(!even.check(&json!(3)));
        assert!(!even.check(&json!("4")));
        assert_eq!(even.label(), "is_even");
        assert_eq!(UserValidator::new(|_| true).label(), "");
    }

    #[test]
    fn test_error_message() {
        let anonymous = UserValidator::new(|_| false);
        assert_eq!(
            anonymous.error_message(&json!(3)),
            "Expression (3) evaluated to False"
        );

        let named = UserValidator::named("is_even", |_| false);
        assert_eq!(
            named.error_message(&json!(3)),
            "Expression is_even(3) evaluated to False"
        );
    }
}
