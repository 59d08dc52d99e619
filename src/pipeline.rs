//! Validation pipeline
//!
//! An ordered, sealed sequence of handlers. Evaluation walks the handlers in
//! registration order and stops at the first rejection:
//!
//! ```text
//! request ──► [0] ──approved──► [1] ──approved──► ... ──► [n-1] ──approved──► Approved
//!              │                 │                          │
//!           rejected          rejected                   rejected
//!              ▼                 ▼                          ▼
//!          Rejected(r0)      Rejected(r1)              Rejected(rn-1)
//! ```
//!
//! Handlers are attached through [`PipelineBuilder`]. Once built, a
//! [`Pipeline`] cannot be changed, so it can be shared across threads and
//! evaluated concurrently without locking.

use crate::handler::{CheckError, FnHandler, Handler};
use crate::outcome::Outcome;
use crate::trace::EvaluationTrace;
use std::fmt;
use tracing::{debug, warn};

// =============================================================================
// PIPELINE
// =============================================================================

/// Immutable, ordered collection of handlers.
pub struct Pipeline<R: ?Sized> {
    handlers: Vec<Box<dyn Handler<R>>>,
}

impl<R: ?Sized> Pipeline<R> {
    /// Pipeline with no handlers. Approves every request.
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn builder() -> PipelineBuilder<R> {
        PipelineBuilder::new()
    }

    /// Build a pipeline from handlers already in evaluation order.
    pub fn from_handlers(handlers: Vec<Box<dyn Handler<R>>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in evaluation order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run `request` through every handler until one rejects it.
    ///
    /// A [`CheckError`] from a handler becomes a rejection naming that
    /// handler. Only `CheckError` is converted: a panicking handler unwinds
    /// through this call.
    pub fn evaluate(&self, request: &R) -> Outcome {
        self.walk(request, |_| {}).0
    }

    /// Same as [`Pipeline::evaluate`], also recording which handlers ran.
    pub fn evaluate_traced(&self, request: &R) -> EvaluationTrace {
        let mut visited = Vec::new();
        let (outcome, rejected_at) =
            self.walk(request, |handler| visited.push(handler.to_string()));
        let rejected_by = rejected_at.map(|idx| self.handlers[idx].name().to_string());
        EvaluationTrace::new(outcome, visited, rejected_by)
    }

    fn walk(&self, request: &R, mut on_visit: impl FnMut(&str)) -> (Outcome, Option<usize>) {
        for (position, handler) in self.handlers.iter().enumerate() {
            let name = handler.name();
            on_visit(name);
            debug!(handler = name, position, "Running check");

            match handler.check(request) {
                Ok(Outcome::Approved) => continue,
                Ok(Outcome::Rejected { reason }) => {
                    debug!(handler = name, position, %reason, "Request rejected");
                    return (Outcome::Rejected { reason }, Some(position));
                }
                Err(err) => {
                    warn!(handler = name, position, error = %err, "Check could not complete");
                    return (check_failure(name, &err), Some(position));
                }
            }
        }
        (Outcome::Approved, None)
    }
}

/// A handler that could not finish its check rejects the request.
fn check_failure(handler: &str, err: &CheckError) -> Outcome {
    Outcome::rejected(format!("{}: {}", handler, err))
}

impl<R: ?Sized> Default for Pipeline<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: ?Sized> fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("handlers", &self.handler_names())
            .finish()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Setup-phase builder. [`PipelineBuilder::build`] consumes it, so nothing
/// can be appended once the pipeline is in use.
pub struct PipelineBuilder<R: ?Sized> {
    handlers: Vec<Box<dyn Handler<R>>>,
}

impl<R: ?Sized> PipelineBuilder<R> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler after the ones already registered.
    pub fn append(mut self, handler: impl Handler<R> + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Add an already boxed handler.
    pub fn append_boxed(mut self, handler: Box<dyn Handler<R>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Add a closure as a named handler.
    pub fn append_fn<F>(self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&R) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        self.append(FnHandler::new(name, check))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn build(self) -> Pipeline<R> {
        Pipeline::from_handlers(self.handlers)
    }
}

impl<R: ?Sized> Default for PipelineBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
