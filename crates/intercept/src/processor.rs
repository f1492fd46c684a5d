//! Two-directional processing stages
//!
//! A [`Processor`] sits around a call: it sees the bound arguments on the
//! way in and the normalized results on the way out. Both hooks default to
//! the identity, so a stage only implements the direction it cares about.
//!
//! A [`ProcessorBundle`] chains stages. Inputs flow front to back; outputs
//! flow back to front, so the stage attached last sits innermost around the
//! call.

use std::fmt;

use serde_json::Value;

use crate::error::InterceptResult;

/// A pluggable input/output transform stage.
pub trait Processor: fmt::Debug + Send + Sync {
    /// Transforms the argument tuple before the call.
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        Ok(args)
    }

    /// Transforms the result tuple after the call.
    fn process_output(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        Ok(values)
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        (**self).process_input(args)
    }

    fn process_output(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        (**self).process_output(values)
    }
}

/// An ordered chain of processors that behaves as a single processor.
#[derive(Debug, Default)]
pub struct ProcessorBundle {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a stage at the end of the chain.
    pub fn append(&mut self, processor: impl Processor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// Attaches an already boxed stage.
    pub fn append_boxed(&mut self, processor: Box<dyn Processor>) {
        self.processors.push(processor);
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Stages in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Processor> {
        self.processors.iter().map(|processor| &**processor)
    }
}

impl Processor for ProcessorBundle {
    fn process_input(&self, args: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.processors
            .iter()
            .try_fold(args, |args, processor| processor.process_input(args))
    }

    fn process_output(&self, values: Vec<Value>) -> InterceptResult<Vec<Value>> {
        self.processors
            .iter()
            .rev()
            .try_fold(values, |values, processor| processor.process_output(values))
    }
}
