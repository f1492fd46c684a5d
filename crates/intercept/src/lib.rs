//! # nebula-intercept
//!
//! Call interception for Nebula functions: per-parameter validation and
//! parsing attached declaratively, without touching the function body.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_intercept::prelude::*;
//! use serde_json::{Value, json};
//!
//! let first = Function::new(
//!     "first",
//!     Signature::from_names(["a", "b"])?,
//!     |args: &[Value]| Ok::<_, BoxError>(args[0].clone()),
//! );
//!
//! let first = validate().arg(Kind::Int).arg(Kind::Str).apply(first)?;
//! assert_eq!(first.call([json!(1), json!("x")])?, json!(1));
//! assert!(first.call([json!(1), json!(2)]).unwrap_err().is_validation());
//! ```
//!
//! ## Building blocks
//!
//! - [`Function`](function::Function): a body plus its parameter
//!   [`Signature`](signature::Signature)
//! - [`Wrapper`](wrapper::Wrapper): a function with one chain of
//!   [`Processor`](processor::Processor)s around it
//! - [`ValidateInput`](parser::ValidateInput),
//!   [`ParseInput`](parser::ParseInput), [`ParseOutput`](parser::ParseOutput):
//!   the per-position processors
//! - [`validate`](decorator::validate) and [`parse`](decorator::parse): bind
//!   per-parameter specs to a target and attach the matching processor
//!
//! Arguments and results are [`serde_json::Value`]s. A function returning
//! several values returns an array; returning none returns `null`.

// InterceptError is returned unboxed from every call path.
#![allow(clippy::result_large_err)]

pub mod decorator;
pub mod error;
pub mod function;
pub mod parser;
pub mod prelude;
pub mod processor;
pub mod signature;
pub mod validators;
pub mod value;
pub mod wrapper;
