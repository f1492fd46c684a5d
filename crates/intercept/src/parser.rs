//! Per-position parsing and validation of argument tuples
//!
//! A [`Parser`] owns one item per positional slot and applies item `i` to
//! value `i`. Three processors are built on it:
//!
//! - [`ParseInput`]: transforms arguments before the call
//! - [`ParseOutput`]: transforms results after the call
//! - [`ValidateInput`]: checks arguments and passes them through unchanged
//!
//! Per-position failures carry the zero-based index and the underlying
//! message. A mismatch between item count and value count is a separate
//! [`Arity`](InterceptError::Arity) failure without a position.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BoxError, InterceptError, InterceptResult};
use crate::processor::Processor;
use crate::validators::{ComposedValidator, Validator};

// ============================================================================
// PARSE ITEMS
// ============================================================================

/// Something that can be applied to a single positional value.
pub trait ParseItem: fmt::Debug + Send + Sync {
    /// Converts or checks `value`, returning the value to pass on.
    fn apply(&self, value: Value) -> Result<Value, String>;

    /// Builds the error reported when the item at `index` fails.
    fn failure(index: usize, message: String) -> InterceptError
    where
        Self: Sized,
    {
        InterceptError::parsing(index, message)
    }
}

type TransformFn = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// A single-argument transform function.
#[derive(Clone)]
pub struct Transform {
    func: Option<TransformFn>,
}

impl Transform {
    /// Wraps a fallible transform. Its error message becomes the parsing
    /// failure message.
    pub fn new<F, E>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            func: Some(Arc::new(move |value: Value| -> Result<Value, BoxError> {
                func(value).map_err(Into::into)
            })),
        }
    }

    /// Wraps an infallible transform.
    pub fn map<F>(func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(move |value: Value| -> Result<Value, BoxError> {
                Ok(func(value))
            })),
        }
    }

    /// The transform that returns its input unchanged.
    pub const fn identity() -> Self {
        Self { func: None }
    }

    pub fn is_identity(&self) -> bool {
        self.func.is_none()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("Transform(identity)")
        } else {
            f.write_str("Transform(..)")
        }
    }
}

impl ParseItem for Transform {
    fn apply(&self, value: Value) -> Result<Value, String> {
        match &self.func {
            Some(func) => func(value).map_err(|e| e.to_string()),
            None => Ok(value),
        }
    }
}

impl ParseItem for Arc<dyn Validator> {
    fn apply(&self, value: Value) -> Result<Value, String> {
        self.validate(&value)?;
        Ok(value)
    }

    fn failure(index: usize, message: String) -> InterceptError {
        InterceptError::validation(index, message)
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// A fixed-length sequence of per-position items.
#[derive(Debug, Clone)]
pub struct Parser<T> {
    items: Vec<T>,
}

impl<T: ParseItem> Parser<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Applies item `i` to value `i`, stopping at the first failure.
    pub fn parse(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        if self.items.len() != values.len() {
            return Err(InterceptError::Arity {
                expected: self.items.len(),
                actual: values.len(),
            });
        }

        self.items
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (item, value))| {
                item.apply(value)
                    .map_err(|message| T::failure(index, message))
            })
            .collect()
    }
}

// ============================================================================
// PROCESSORS
// ============================================================================

fn transforms(items: impl IntoIterator<Item = Option<Transform>>) -> Parser<Transform> {
    Parser::new(
        items
            .into_iter()
            .map(|item| item.unwrap_or(Transform::identity())),
    )
}

/// Parses input values with one transform per argument.
///
/// A `None` item leaves its argument unchanged.
#[derive(Debug, Clone)]
pub struct ParseInput {
    parser: Parser<Transform>,
}

impl ParseInput {
    pub fn new(items: impl IntoIterator<Item = Option<Transform>>) -> Self {
        Self {
            parser: transforms(items),
        }
    }

    pub fn parser(&self) -> &Parser<Transform> {
        &self.parser
    }
}

impl Processor for ParseInput {
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.parser.parse(args)
    }
}

/// Parses output values with one transform per result.
///
/// A `None` item leaves its value unchanged.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    parser: Parser<Transform>,
}

impl ParseOutput {
    pub fn new(items: impl IntoIterator<Item = Option<Transform>>) -> Self {
        Self {
            parser: transforms(items),
        }
    }

    pub fn parser(&self) -> &Parser<Transform> {
        &self.parser
    }
}

impl Processor for ParseOutput {
    fn process_output(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.parser.parse(values)
    }
}

/// Validates input values, one validator per argument.
///
/// Acts as a gate: arguments are returned unchanged when every validator
/// accepts, otherwise the first rejection is reported with its position.
#[derive(Debug, Clone)]
pub struct ValidateInput {
    parser: Parser<Arc<dyn Validator>>,
}

impl ValidateInput {
    /// Creates the processor. Single-child compositions are collapsed.
    pub fn new(validators: impl IntoIterator<Item = Arc<dyn Validator>>) -> Self {
        Self {
            parser: Parser::new(validators.into_iter().map(|validator| {
                let simplified = validator.as_composed().map(ComposedValidator::simplify);
                simplified.unwrap_or(validator)
            })),
        }
    }

    /// Creates the processor for a single-argument function.
    pub fn single(validator: impl Validator + 'static) -> Self {
        Self::new([Arc::new(validator) as Arc<dyn Validator>])
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        self.parser.items()
    }

    /// Checks every argument, returning the first rejection.
    pub fn validate(&self, args: &[Value]) -> InterceptResult<()> {
        if self.parser.items().len() != args.len() {
            return Err(InterceptError::Arity {
                expected: self.parser.items().len(),
                actual: args.len(),
            });
        }
        for (index, (validator, arg)) in self.parser.items().iter().zip(args).enumerate() {
            validator
                .validate(arg)
                .map_err(|message| InterceptError::validation(index, message))?;
        }
        Ok(())
    }
}

impl From<ComposedValidator> for ValidateInput {
    fn from(validator: ComposedValidator) -> Self {
        Self::single(validator)
    }
}

impl Processor for ValidateInput {
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.parser.parse(args)
    }
}
