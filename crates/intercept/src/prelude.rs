//! Prelude module for convenient imports.
//!
//! Provides a single `use nebula_intercept::prelude::*;` import that brings
//! in the decorators, the call types, and every built-in validator.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_intercept::prelude::*;
//!
//! let checked = validate().arg(Kind::Int).arg(0_i64..10).apply(function)?;
//! let parsed = parse().skip().arg(Transform::map(|v| v)).apply(checked)?;
//! ```

// ============================================================================
// DECORATORS
// ============================================================================

pub use crate::decorator::{
    Decorator, ParseDecorator, SpecArgs, ValidateDecorator, parse, validate,
};

// ============================================================================
// CALLS: functions, wrappers, binding
// ============================================================================

pub use crate::function::{Callable, Function};
pub use crate::signature::{BoundArguments, CallArgs, Parameter, Signature};
pub use crate::wrapper::{BoundMethod, Member, Wrapper};

// ============================================================================
// PROCESSORS
// ============================================================================

pub use crate::parser::{ParseInput, ParseItem, ParseOutput, Parser, Transform, ValidateInput};
pub use crate::processor::{Processor, ProcessorBundle};

// ============================================================================
// VALIDATORS
// ============================================================================

pub use crate::validators::{
    ComposedValidator, EmptyValidator, IntRange, RangeValidator, TypeValidator, UserValidator,
    Validator, ValidatorExt, ValidatorSpec, ValueValidator, from_object, union,
};

// ============================================================================
// VALUES AND ERRORS
// ============================================================================

pub use crate::error::{BoxError, InterceptError, InterceptResult, SignatureError};
pub use crate::value::Kind;
