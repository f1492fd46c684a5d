//! Single-argument validators
//!
//! A [`Validator`] is a pure predicate over one argument plus a human
//! readable reason for rejecting it. Validators are built once at decoration
//! time and shared by every call to the wrapped function, so they are
//! immutable and handed around as `Arc<dyn Validator>`.
//!
//! # Built-in validators
//!
//! - [`TypeValidator`]: kind membership, with subkind matching
//! - [`ValueValidator`]: membership in a set of literal values
//! - [`RangeValidator`]: membership in an integer range
//! - [`UserValidator`]: an arbitrary user predicate
//! - [`EmptyValidator`]: accepts everything
//! - [`ComposedValidator`]: logical OR over other validators
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_intercept::prelude::*;
//! use serde_json::json;
//!
//! let small_or_text = RangeValidator::new(0..10).or(TypeValidator::new([Kind::Str]));
//! assert!(small_or_text.check(&json!(3)));
//! assert!(small_or_text.check(&json!("three")));
//! assert!(!small_or_text.check(&json!(30)));
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde_json::Value;

pub mod composed;
pub mod empty;
pub mod kind;
pub mod range;
pub mod user;
pub mod value;

pub use composed::ComposedValidator;
pub use empty::EmptyValidator;
pub use kind::TypeValidator;
pub use range::{IntRange, RangeValidator};
pub use user::UserValidator;
pub use value::ValueValidator;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// A single-argument acceptance predicate.
///
/// Implementors provide [`check`](Validator::check) and usually
/// [`error_message`](Validator::error_message); [`validate`](Validator::validate)
/// combines both and is the contract the rest of the crate relies on.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Returns true if `arg` is accepted. Must be free of side effects.
    fn check(&self, arg: &Value) -> bool;

    /// Explains why `arg` was rejected.
    fn error_message(&self, _arg: &Value) -> String {
        String::new()
    }

    /// Returns `Ok(())` on acceptance or the rejection message.
    fn validate(&self, arg: &Value) -> Result<(), String> {
        if self.check(arg) {
            Ok(())
        } else {
            Err(self.error_message(arg))
        }
    }

    /// Short type name, used by `Debug`-like renderings and logs.
    fn name(&self) -> &'static str;

    /// Downcast hook used to flatten nested compositions.
    fn as_composed(&self) -> Option<&ComposedValidator> {
        None
    }
}

impl Validator for Arc<dyn Validator> {
    fn check(&self, arg: &Value) -> bool {
        (**self).check(arg)
    }

    fn error_message(&self, arg: &Value) -> String {
        (**self).error_message(arg)
    }

    fn validate(&self, arg: &Value) -> Result<(), String> {
        (**self).validate(arg)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn as_composed(&self) -> Option<&ComposedValidator> {
        (**self).as_composed()
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Combinator methods available on every sized validator.
pub trait ValidatorExt: Validator + Sized + 'static {
    /// Combines two validators with logical OR.
    ///
    /// Nested compositions on either side are flattened, so
    /// `a.or(b).or(c)` holds three children rather than a tree.
    fn or<V>(self, other: V) -> ComposedValidator
    where
        V: Validator + 'static,
    {
        let mut composed = ComposedValidator::default();
        composed.add(Arc::new(self));
        composed.add(Arc::new(other));
        composed
    }

    /// Erases the concrete type.
    fn shared(self) -> Arc<dyn Validator> {
        Arc::new(self)
    }
}

impl<T: Validator + 'static> ValidatorExt for T {}

/// Creates a flattened OR composition of two validators.
pub fn union<L, R>(left: L, right: R) -> ComposedValidator
where
    L: Validator + 'static,
    R: Validator + 'static,
{
    left.or(right)
}

// ============================================================================
// DECORATION-TIME SPECS
// ============================================================================

/// A decoration-time description of a per-parameter constraint.
///
/// Each variant corresponds to one kind of object a caller may hand to
/// [`validate`](crate::decorator::validate). Use the `From` conversions for
/// terse call sites and [`from_object`] to turn a spec into a validator.
#[derive(Clone)]
pub enum ValidatorSpec {
    /// A ready-made validator, passed through unchanged.
    Validator(Arc<dyn Validator>),
    /// The "accept anything" wildcard.
    Any,
    /// A kind check including subkinds.
    Kind(crate::value::Kind),
    /// A mapping; its keys become the acceptable values.
    Mapping(serde_json::Map<String, Value>),
    /// A user predicate.
    Predicate(UserValidator),
    /// An integer range.
    Range(IntRange),
    /// A set of acceptable literal values.
    Values(Vec<Value>),
    /// A single acceptable literal value.
    Literal(Value),
}

impl ValidatorSpec {
    /// Wraps any validator.
    pub fn validator(validator: impl Validator + 'static) -> Self {
        Self::Validator(Arc::new(validator))
    }

    /// Builds a predicate spec from a closure.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(UserValidator::new(predicate))
    }

    /// Builds a membership spec.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    /// Converts this spec into a validator.
    pub fn into_validator(self) -> Arc<dyn Validator> {
        from_object(self)
    }
}

impl fmt::Debug for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validator(v) => f.debug_tuple("Validator").field(v).finish(),
            Self::Any => f.write_str("Any"),
            Self::Kind(k) => f.debug_tuple("Kind").field(k).finish(),
            Self::Mapping(m) => f.debug_tuple("Mapping").field(m).finish(),
            Self::Predicate(p) => f.debug_tuple("Predicate").field(p).finish(),
            Self::Range(r) => f.debug_tuple("Range").field(r).finish(),
            Self::Values(v) => f.debug_tuple("Values").field(v).finish(),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
        }
    }
}

/// Classifies a decoration-time spec into a validator.
///
/// Precedence, first match wins: an existing validator, the wildcard, a
/// kind, a mapping, a predicate, a range, and finally literal values.
pub fn from_object(spec: impl Into<ValidatorSpec>) -> Arc<dyn Validator> {
    match spec.into() {
        ValidatorSpec::Validator(validator) => validator,
        ValidatorSpec::Any => Arc::new(EmptyValidator),
        ValidatorSpec::Kind(kind) => Arc::new(TypeValidator::new([kind])),
        ValidatorSpec::Mapping(map) => Arc::new(ValueValidator::new(
            map.keys().map(|key| Value::String(key.clone())),
        )),
        ValidatorSpec::Predicate(predicate) => Arc::new(predicate),
        ValidatorSpec::Range(range) => Arc::new(RangeValidator::new(range)),
        ValidatorSpec::Values(values) => Arc::new(ValueValidator::new(values)),
        ValidatorSpec::Literal(value) => Arc::new(ValueValidator::new([value])),
    }
}

impl From<Arc<dyn Validator>> for ValidatorSpec {
    fn from(validator: Arc<dyn Validator>) -> Self {
        Self::Validator(validator)
    }
}

impl From<crate::value::Kind> for ValidatorSpec {
    fn from(kind: crate::value::Kind) -> Self {
        Self::Kind(kind)
    }
}

impl From<IntRange> for ValidatorSpec {
    fn from(range: IntRange) -> Self {
        Self::Range(range)
    }
}

impl From<Range<i64>> for ValidatorSpec {
    fn from(range: Range<i64>) -> Self {
        Self::Range(range.into())
    }
}

impl From<Vec<Value>> for ValidatorSpec {
    fn from(values: Vec<Value>) -> Self {
        Self::Values(values)
    }
}

impl From<Value> for ValidatorSpec {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            other => Self::Literal(other),
        }
    }
}

macro_rules! literal_spec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ValidatorSpec {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_spec!(bool, i32, i64, u32, u64, f64, &str, String);

macro_rules! validator_spec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ValidatorSpec {
                fn from(validator: $ty) -> Self {
                    Self::Validator(Arc::new(validator))
                }
            }
        )*
    };
}

validator_spec!(
    TypeValidator,
    ValueValidator,
    RangeValidator,
    EmptyValidator,
    ComposedValidator,
);

impl From<UserValidator> for ValidatorSpec {
    fn from(validator: UserValidator) -> Self {
        Self::Predicate(validator)
    }
}
