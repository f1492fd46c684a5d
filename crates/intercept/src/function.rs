//! Named function bodies with an explicit parameter manifest

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BoxError, InterceptError, InterceptResult};
use crate::signature::{CallArgs, Signature};

/// Anything that accepts a call with positional and keyword arguments.
///
/// Implemented by plain functions, wrappers and bound methods, so they can be
/// used interchangeably wherever a call target is expected.
pub trait Callable {
    /// Name used in logs and error reports.
    fn name(&self) -> &str;

    fn call(&self, args: CallArgs) -> InterceptResult<Value>;
}

type Body = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// A callable unit: a body over the canonical positional tuple, plus the
/// signature used to bind calls onto it.
///
/// Multiple results are returned as a JSON array, no result as `null`.
#[derive(Clone)]
pub struct Function {
    name: String,
    signature: Signature,
    body: Body,
}

impl Function {
    pub fn new<F, E>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            signature,
            body: Arc::new(move |args: &[Value]| -> Result<Value, BoxError> {
                body(args).map_err(Into::into)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Binds `args`, fills defaults and runs the body.
    pub fn call(&self, args: impl Into<CallArgs>) -> InterceptResult<Value> {
        let mut bound = self.signature.bind(args.into())?;
        bound.apply_defaults();
        self.invoke(&bound.into_args())
    }

    /// Runs the body on an already bound positional tuple.
    pub fn invoke(&self, args: &[Value]) -> InterceptResult<Value> {
        (self.body)(args).map_err(InterceptError::Call)
    }
}

impl Callable for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: CallArgs) -> InterceptResult<Value> {
        Self::call(self, args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}{}>", self.name, self.signature)
    }
}
