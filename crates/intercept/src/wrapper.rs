//! Call interception around a [`Function`]
//!
//! A [`Wrapper`] owns exactly one [`ProcessorBundle`]. Decorators applied to
//! an existing wrapper append to that bundle instead of nesting another
//! interception layer, so however many decorators are stacked, a call binds
//! its arguments once.
//!
//! # Call protocol
//!
//! 1. Bind the call against the function's own signature and fill defaults
//! 2. Run input processing front to back; a failure aborts the call
//! 3. Invoke the function body
//! 4. Normalize the result: `null` is no value, an array is many values,
//!    anything else is one value
//! 5. Run output processing back to front
//! 6. Reshape: no value is `null`, one value is returned as is, several
//!    values become an array

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::InterceptResult;
use crate::function::{Callable, Function};
use crate::processor::{Processor, ProcessorBundle};
use crate::signature::{CallArgs, Signature};

/// A function plus the processor chain that intercepts its calls.
#[derive(Debug)]
pub struct Wrapper {
    function: Function,
    bundle: ProcessorBundle,
}

impl Wrapper {
    /// Wraps `function` with an empty chain.
    pub fn new(function: Function) -> Self {
        Self {
            function,
            bundle: ProcessorBundle::new(),
        }
    }

    /// Attaches a processor after the ones already present.
    pub fn append(&mut self, processor: impl Processor + 'static) {
        self.bundle.append(processor);
    }

    /// Chainable form of [`append`](Self::append).
    #[must_use]
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.append(processor);
        self
    }

    pub fn processors(&self) -> &ProcessorBundle {
        &self.bundle
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn signature(&self) -> &Signature {
        self.function.signature()
    }

    /// Calls the function through the processor chain.
    pub fn call(&self, args: impl Into<CallArgs>) -> InterceptResult<Value> {
        let mut bound = self.function.signature().bind(args.into())?;
        bound.apply_defaults();
        let args = bound.into_args();

        trace!(
            function = %self.function.name(),
            args = args.len(),
            processors = self.bundle.len(),
            "intercepting call"
        );

        let args = self.bundle.process_input(args).inspect_err(|error| {
            debug!(function = %self.function.name(), %error, "call rejected");
        })?;

        let result = self.function.invoke(&args)?;

        let outputs = self
            .bundle
            .process_output(into_outputs(result))
            .inspect_err(|error| {
                debug!(function = %self.function.name(), %error, "output rejected");
            })?;

        Ok(from_outputs(outputs))
    }

    /// Calls the function directly, bypassing every processor.
    pub fn call_wrapped(&self, args: impl Into<CallArgs>) -> InterceptResult<Value> {
        self.function.call(args)
    }

    /// Binds `receiver` as the first argument of every call.
    pub fn bind_receiver(&self, receiver: Value) -> BoundMethod<'_> {
        BoundMethod {
            wrapper: self,
            receiver,
        }
    }

    /// Attribute-style access: without an instance the wrapper itself is
    /// returned, with one a method bound to it.
    pub fn get(&self, instance: Option<Value>) -> Member<'_> {
        match instance {
            Some(receiver) => Member::Bound(self.bind_receiver(receiver)),
            None => Member::Unbound(self),
        }
    }
}

impl From<Function> for Wrapper {
    fn from(function: Function) -> Self {
        Self::new(function)
    }
}

impl Processor for Wrapper {
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.bundle.process_input(args)
    }

    fn process_output(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.bundle.process_output(values)
    }
}

impl Callable for Wrapper {
    fn name(&self) -> &str {
        self.function.name()
    }

    fn call(&self, args: CallArgs) -> InterceptResult<Value> {
        Self::call(self, args)
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.function, f)
    }
}

fn into_outputs(result: Value) -> Vec<Value> {
    match result {
        Value::Null => Vec::new(),
        Value::Array(values) => values,
        value => vec![value],
    }
}

fn from_outputs(mut outputs: Vec<Value>) -> Value {
    match outputs.len() {
        0 => Value::Null,
        1 => outputs.swap_remove(0),
        _ => Value::Array(outputs),
    }
}

// ============================================================================
// METHOD BINDING
// ============================================================================

/// A wrapper with its first argument fixed to a receiver.
#[derive(Debug, Clone)]
pub struct BoundMethod<'w> {
    wrapper: &'w Wrapper,
    receiver: Value,
}

impl BoundMethod<'_> {
    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn wrapper(&self) -> &Wrapper {
        self.wrapper
    }

    /// Calls the wrapper with the receiver prepended.
    pub fn call(&self, args: impl Into<CallArgs>) -> InterceptResult<Value> {
        self.wrapper
            .call(args.into().with_receiver(self.receiver.clone()))
    }
}

impl Callable for BoundMethod<'_> {
    fn name(&self) -> &str {
        self.wrapper.name()
    }

    fn call(&self, args: CallArgs) -> InterceptResult<Value> {
        Self::call(self, args)
    }
}

/// Result of [`Wrapper::get`].
#[derive(Debug, Clone)]
pub enum Member<'w> {
    Unbound(&'w Wrapper),
    Bound(BoundMethod<'w>),
}

impl Member<'_> {
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl Callable for Member<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Unbound(wrapper) => wrapper.name(),
            Self::Bound(method) => Callable::name(method),
        }
    }

    fn call(&self, args: CallArgs) -> InterceptResult<Value> {
        match self {
            Self::Unbound(wrapper) => wrapper.call(args),
            Self::Bound(method) => method.call(args),
        }
    }
}
