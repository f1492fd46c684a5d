//! Integer range validation

use std::fmt;
use std::ops::Range;

use serde_json::Value;

use super::Validator;
use crate::error::{InterceptError, InterceptResult};
use crate::value::{Kind, as_integral, display_value};

/// A half-open integer range with an optional step.
///
/// `start` is included, `stop` is excluded. A negative step counts down from
/// `start` towards `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    /// Creates `start..stop` with step 1.
    pub const fn new(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Sets the step. A zero step is rejected.
    pub fn with_step(mut self, step: i64) -> InterceptResult<Self> {
        if step == 0 {
            return Err(InterceptError::construction("range step must not be zero"));
        }
        self.step = step;
        Ok(self)
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn stop(&self) -> i64 {
        self.stop
    }

    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Membership test over the integers.
    pub fn contains(&self, n: i128) -> bool {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        if step > 0 {
            start <= n && n < stop && (n - start) % step == 0
        } else {
            stop < n && n <= start && (start - n) % -step == 0
        }
    }
}

impl From<Range<i64>> for IntRange {
    fn from(range: Range<i64>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "range({}, {})", self.start, self.stop)
        } else {
            write!(f, "range({}, {}, {})", self.start, self.stop, self.step)
        }
    }
}

/// Validates that an argument lies within an [`IntRange`].
///
/// With `match_types` enabled (the default) only ints pass. Otherwise bools
/// and floats without a fractional part are compared by their integral value.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_intercept::prelude::*;
/// use serde_json::json;
///
/// let percent = RangeValidator::new(0..101);
/// assert!(percent.check(&json!(100)));
/// assert!(!percent.check(&json!(101)));
/// assert!(!percent.check(&json!(50.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValidator {
    interval: IntRange,
    match_types: bool,
}

impl RangeValidator {
    pub fn new(interval: impl Into<IntRange>) -> Self {
        Self {
            interval: interval.into(),
            match_types: true,
        }
    }

    /// Toggles the int-only requirement.
    pub fn with_match_types(mut self, match_types: bool) -> Self {
        self.match_types = match_types;
        self
    }

    pub fn interval(&self) -> IntRange {
        self.interval
    }
}

impl Validator for RangeValidator {
    fn check(&self, arg: &Value) -> bool {
        if self.match_types && Kind::of(arg) != Kind::Int {
            return false;
        }
        as_integral(arg).is_some_and(|n| self.interval.contains(n))
    }

    fn error_message(&self, arg: &Value) -> String {
        format!(
            "Value in {} expected but got {}",
            self.interval,
            display_value(arg)
        )
    }

    fn name(&self) -> &'static str {
        "RangeValidator"
    }
}
