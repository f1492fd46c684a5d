//! Union of validators
//!
//! [`ComposedValidator`] accepts an argument when any of its children does.
//! Children are kept flat: adding a composition merges its children rather
//! than nesting it, so `(a | b) | c` and `a | (b | c)` hold the same list.

use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

use serde_json::Value;

use super::Validator;

/// Logical OR over an ordered list of validators.
///
/// An empty composition rejects everything.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_intercept::prelude::*;
/// use serde_json::json;
///
/// let id = ComposedValidator::from(TypeValidator::new([Kind::Int]))
///     | TypeValidator::new([Kind::Str]);
/// assert!(id.check(&json!(7)));
/// assert!(id.check(&json!("seven")));
/// assert!(!id.check(&json!(7.5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComposedValidator {
    validators: Vec<Arc<dyn Validator>>,
}

impl ComposedValidator {
    /// Creates a composition from the given validators, flattening nested ones.
    pub fn new(items: impl IntoIterator<Item = Arc<dyn Validator>>) -> Self {
        let mut composed = Self::default();
        composed.extend(items);
        composed
    }

    /// Adds a validator. A composition is merged child by child.
    pub fn add(&mut self, item: Arc<dyn Validator>) {
        if let Some(nested) = item.as_composed() {
            self.validators.extend(nested.validators.iter().cloned());
        } else {
            self.validators.push(item);
        }
    }

    /// Adds several validators.
    pub fn extend(&mut self, items: impl IntoIterator<Item = Arc<dyn Validator>>) {
        for item in items {
            self.add(item);
        }
    }

    /// Returns a new composition holding this one's children followed by `other`.
    ///
    /// Neither operand is modified.
    #[must_use]
    pub fn union(&self, other: impl Validator + 'static) -> Self {
        let mut result = self.clone();
        result.add(Arc::new(other));
        result
    }

    /// Collapses a single-child composition into that child.
    pub fn simplify(&self) -> Arc<dyn Validator> {
        match self.validators.as_slice() {
            [only] => Arc::clone(only),
            _ => Arc::new(self.clone()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Validator>> {
        self.validators.iter()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for ComposedValidator {
    fn check(&self, arg: &Value) -> bool {
        self.validators.iter().any(|validator| validator.check(arg))
    }

    fn error_message(&self, arg: &Value) -> String {
        self.validators
            .iter()
            .map(|validator| validator.error_message(arg))
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn name(&self) -> &'static str {
        "ComposedValidator"
    }

    fn as_composed(&self) -> Option<&ComposedValidator> {
        Some(self)
    }
}

impl<'a> IntoIterator for &'a ComposedValidator {
    type Item = &'a Arc<dyn Validator>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Validator>>;

    fn into_iter(self) -> Self::IntoIter {
        self.validators.iter()
    }
}

impl FromIterator<Arc<dyn Validator>> for ComposedValidator {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Validator>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

macro_rules! composed_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ComposedValidator {
                fn from(validator: $ty) -> Self {
                    Self::new([Arc::new(validator) as Arc<dyn Validator>])
                }
            }
        )*
    };
}

composed_from!(
    super::TypeValidator,
    super::ValueValidator,
    super::RangeValidator,
    super::UserValidator,
    super::EmptyValidator,
);

impl<V: Validator + 'static> BitOr<V> for ComposedValidator {
    type Output = ComposedValidator;

    fn bitor(mut self, rhs: V) -> Self::Output {
        self.add(Arc::new(rhs));
        self
    }
}

impl<V: Validator + 'static> BitOr<V> for &ComposedValidator {
    type Output = ComposedValidator;

    fn bitor(self, rhs: V) -> Self::Output {
        self.union(rhs)
    }
}

impl<V: Validator + 'static> BitOrAssign<V> for ComposedValidator {
    fn bitor_assign(&mut self, rhs: V) {
        self.add(Arc::new(rhs));
    }
}
