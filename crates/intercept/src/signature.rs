//! Parameter manifests and argument binding
//!
//! Rust functions carry no runtime parameter names, so every wrapped
//! function declares its parameters explicitly through a [`Signature`].
//! Binding maps positional and keyword arguments onto those parameters the
//! same way for call values and for decorator specs.
//!
//! Signatures are plain data and can be loaded from JSON manifests:
//!
//! ```rust,ignore
//! use nebula_intercept::signature::Signature;
//!
//! let signature: Signature = serde_json::from_str(
//!     r#"{"parameters": [{"name": "a"}, {"name": "b", "default": 1}]}"#,
//! )?;
//! assert_eq!(signature.len(), 2);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InterceptError, InterceptResult, SignatureError};

// ============================================================================
// PARAMETER
// ============================================================================

/// A named positional-or-keyword parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Parameter {
    /// A parameter without default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter that falls back to `default` when no argument is given.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={default}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// The ordered parameter list of a wrapped function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    /// Creates a signature, rejecting duplicate names and required
    /// parameters that follow a defaulted one.
    pub fn new(parameters: impl IntoIterator<Item = Parameter>) -> InterceptResult<Self> {
        let parameters: Vec<Parameter> = parameters.into_iter().collect();

        for (i, parameter) in parameters.iter().enumerate() {
            if parameters[..i].iter().any(|p| p.name == parameter.name) {
                return Err(InterceptError::construction(format!(
                    "duplicate parameter '{}'",
                    parameter.name
                )));
            }
        }

        let first_default = parameters
            .iter()
            .position(Parameter::has_default)
            .unwrap_or(parameters.len());
        if let Some(late) = parameters[first_default..].iter().find(|p| !p.has_default()) {
            return Err(InterceptError::construction(format!(
                "required parameter '{}' follows a parameter with a default",
                late.name
            )));
        }

        Ok(Self { parameters })
    }

    /// Creates a signature of required parameters.
    pub fn from_names<I, S>(names: I) -> InterceptResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Parameter::required))
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Index of the parameter called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// Maps arguments onto parameter slots without checking for missing ones.
    ///
    /// Works for any item type: decorators bind their specs with it as well.
    pub fn bind_partial<T>(
        &self,
        positional: impl IntoIterator<Item = T>,
        keyword: impl IntoIterator<Item = (String, T)>,
    ) -> Result<BoundArguments<'_, T>, SignatureError> {
        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None)
            .take(self.parameters.len())
            .collect();

        let mut count = 0;
        for value in positional {
            if count >= slots.len() {
                return Err(SignatureError::TooManyPositional {
                    expected: slots.len(),
                    actual: count + 1,
                });
            }
            slots[count] = Some(value);
            count += 1;
        }

        for (name, value) in keyword {
            let Some(index) = self.position(&name) else {
                return Err(SignatureError::UnexpectedKeyword { name });
            };
            if slots[index].is_some() {
                return Err(SignatureError::MultipleValues { name });
            }
            slots[index] = Some(value);
        }

        Ok(BoundArguments {
            signature: self,
            slots,
        })
    }

    /// Binds call arguments, failing if a parameter without default is unbound.
    pub fn bind(&self, args: CallArgs) -> Result<BoundArguments<'_, Value>, SignatureError> {
        let bound = self.bind_partial(args.positional, args.keyword)?;
        if let Some(missing) = self
            .parameters
            .iter()
            .zip(&bound.slots)
            .find(|(parameter, slot)| slot.is_none() && !parameter.has_default())
        {
            return Err(SignatureError::Missing {
                name: missing.0.name.clone(),
            });
        }
        Ok(bound)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Manifest {
            parameters: Vec<Parameter>,
        }

        let manifest = Manifest::deserialize(deserializer)?;
        Self::new(manifest.parameters).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// BOUND ARGUMENTS
// ============================================================================

/// Arguments mapped onto the parameters of a [`Signature`].
#[derive(Debug, Clone)]
pub struct BoundArguments<'s, T> {
    signature: &'s Signature,
    slots: Vec<Option<T>>,
}

impl<T> BoundArguments<'_, T> {
    /// The value bound to parameter `name`, if any.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.signature
            .position(name)
            .and_then(|index| self.slots[index].as_ref())
    }

    /// Per-parameter slots in declaration order; `None` marks an unbound slot.
    pub fn into_slots(self) -> Vec<Option<T>> {
        self.slots
    }
}

impl BoundArguments<'_, Value> {
    /// Fills unbound slots from the parameters' defaults.
    pub fn apply_defaults(&mut self) {
        for (parameter, slot) in self.signature.parameters.iter().zip(&mut self.slots) {
            if slot.is_none() {
                slot.clone_from(&parameter.default);
            }
        }
    }

    /// The canonical positional tuple, stopping at the first unbound slot.
    pub fn args(&self) -> Vec<Value> {
        self.slots.iter().map_while(Option::clone).collect()
    }

    /// Consumes the binding into its positional tuple.
    pub fn into_args(self) -> Vec<Value> {
        self.slots.into_iter().map_while(std::convert::identity).collect()
    }
}

// ============================================================================
// CALL ARGUMENTS
// ============================================================================

/// Positional and keyword arguments of a single call.
///
/// ```rust,ignore
/// use nebula_intercept::signature::CallArgs;
/// use serde_json::json;
///
/// let args = CallArgs::new().arg(json!(1)).kwarg("b", json!("x"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keyword: IndexMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Prepends a positional argument, as a bound method does with its receiver.
    pub fn with_receiver(mut self, receiver: Value) -> Self {
        self.positional.insert(0, receiver);
        self
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            keyword: IndexMap::new(),
        }
    }
}

impl<const N: usize> From<[Value; N]> for CallArgs {
    fn from(positional: [Value; N]) -> Self {
        Self::from(Vec::from(positional))
    }
}
