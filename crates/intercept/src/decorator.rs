//! Declarative per-parameter decorators
//!
//! A decorator collects one spec per parameter of the target function,
//! addressed by position or by parameter name, and turns them into a single
//! [`Processor`] appended to the target's [`Wrapper`]. Parameters without a
//! spec are left unconstrained.
//!
//! ```rust,ignore
//! use nebula_intercept::prelude::*;
//!
//! let wrapper = validate()
//!     .arg(Kind::Int)
//!     .kwarg("label", Kind::Str)
//!     .apply(function)?;
//! ```
//!
//! Applying a second decorator to the returned wrapper extends the same
//! chain. Spec binding happens when the decorator is applied, so malformed
//! specs surface as [`Construction`](InterceptError::Construction) errors
//! there and never during a call.

use std::sync::Arc;

use tracing::debug;

use crate::error::{InterceptError, InterceptResult};
use crate::parser::{ParseInput, Transform, ValidateInput};
use crate::processor::Processor;
use crate::validators::{EmptyValidator, Validator, ValidatorSpec, from_object};
use crate::wrapper::Wrapper;

/// Specs captured by a decorator, in the order they were given.
#[derive(Debug, Clone)]
pub struct SpecArgs<S> {
    pub positional: Vec<S>,
    pub keyword: Vec<(String, S)>,
}

impl<S> Default for SpecArgs<S> {
    fn default() -> Self {
        Self {
            positional: Vec::new(),
            keyword: Vec::new(),
        }
    }
}

impl<S> SpecArgs<S> {
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Builds one processor from per-parameter specs and attaches it.
pub trait Decorator: Sized {
    /// What the user supplies for a single parameter.
    type Spec;

    /// The processor produced for the target.
    type Output: Processor + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    fn into_specs(self) -> SpecArgs<Self::Spec>;

    /// Creates the processor from specs bound to the target's parameters.
    /// `None` marks a parameter the decorator was given nothing for.
    fn create_processor(slots: Vec<Option<Self::Spec>>) -> Self::Output;

    /// Decorates `target`, which may be a plain function or a wrapper that
    /// already carries processors.
    ///
    /// The target is consumed. To keep an existing wrapper usable when the
    /// specs do not fit it, use [`apply_to`](Decorator::apply_to).
    fn apply(self, target: impl Into<Wrapper>) -> InterceptResult<Wrapper> {
        let mut wrapper = target.into();
        self.apply_to(&mut wrapper)?;
        Ok(wrapper)
    }

    /// Appends the processor to `wrapper` in place.
    ///
    /// On error the wrapper is left exactly as it was.
    fn apply_to(self, wrapper: &mut Wrapper) -> InterceptResult<()> {
        let specs = self.into_specs();

        let slots = wrapper
            .signature()
            .bind_partial(specs.positional, specs.keyword)
            .map_err(|error| {
                InterceptError::construction(format!(
                    "{} arguments do not match {}: {error}",
                    Self::NAME,
                    wrapper.function()
                ))
            })?
            .into_slots();

        debug!(
            decorator = Self::NAME,
            function = %wrapper.name(),
            specified = slots.iter().filter(|slot| slot.is_some()).count(),
            "attaching processor"
        );
        wrapper.append(Self::create_processor(slots));
        Ok(())
    }
}

// ============================================================================
// VALIDATE
// ============================================================================

/// Validates arguments before the call. Created by [`validate`].
#[derive(Debug, Default)]
pub struct ValidateDecorator {
    specs: SpecArgs<ValidatorSpec>,
}

impl ValidateDecorator {
    /// Adds a spec for the next positional parameter.
    #[must_use]
    pub fn arg(mut self, spec: impl Into<ValidatorSpec>) -> Self {
        self.specs.positional.push(spec.into());
        self
    }

    /// Adds a spec for the parameter called `name`.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, spec: impl Into<ValidatorSpec>) -> Self {
        self.specs.keyword.push((name.into(), spec.into()));
        self
    }
}

impl Decorator for ValidateDecorator {
    type Spec = ValidatorSpec;
    type Output = ValidateInput;

    const NAME: &'static str = "validate";

    fn into_specs(self) -> SpecArgs<ValidatorSpec> {
        self.specs
    }

    fn create_processor(slots: Vec<Option<ValidatorSpec>>) -> ValidateInput {
        ValidateInput::new(slots.into_iter().map(|slot| match slot {
            Some(spec) => from_object(spec),
            None => Arc::new(EmptyValidator) as Arc<dyn Validator>,
        }))
    }
}

/// Starts a validation decorator.
pub fn validate() -> ValidateDecorator {
    ValidateDecorator::default()
}

// ============================================================================
// PARSE
// ============================================================================

/// Transforms arguments before the call. Created by [`parse`].
#[derive(Debug, Default)]
pub struct ParseDecorator {
    specs: SpecArgs<Option<Transform>>,
}

impl ParseDecorator {
    /// Adds a transform for the next positional parameter.
    #[must_use]
    pub fn arg(mut self, transform: Transform) -> Self {
        self.specs.positional.push(Some(transform));
        self
    }

    /// Leaves the next positional parameter untouched.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.specs.positional.push(None);
        self
    }

    /// Adds a transform for the parameter called `name`.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.specs.keyword.push((name.into(), Some(transform)));
        self
    }
}

impl Decorator for ParseDecorator {
    type Spec = Option<Transform>;
    type Output = ParseInput;

    const NAME: &'static str = "parse";

    fn into_specs(self) -> SpecArgs<Option<Transform>> {
        self.specs
    }

    fn create_processor(slots: Vec<Option<Option<Transform>>>) -> ParseInput {
        ParseInput::new(slots.into_iter().map(Option::flatten))
    }
}

/// Starts a parsing decorator.
pub fn parse() -> ParseDecorator {
    ParseDecorator::default()
}
