//! Handler capability
//!
//! A handler is one independent check in a pipeline. Concrete handlers are
//! unrelated types that each implement [`Handler`]; there is no base class.
//!
//! A handler that cannot finish its check (missing attribute, unexpected
//! type) returns a [`CheckError`]. The pipeline never propagates it and
//! turns it into a rejection that names the handler.

use crate::outcome::Outcome;
use thiserror::Error;

/// Why a handler could not reach a verdict for a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("attribute '{attribute}' is missing")]
    MissingAttribute { attribute: String },

    #[error("attribute '{attribute}' should be {expected}, found {found}")]
    InvalidAttribute {
        attribute: String,
        expected: &'static str,
        found: String,
    },

    #[error("{0}")]
    Other(String),
}

impl CheckError {
    pub fn missing(attribute: impl Into<String>) -> Self {
        CheckError::MissingAttribute {
            attribute: attribute.into(),
        }
    }
}

/// A single check applied to a request of type `R`.
///
/// Handlers only read the request and keep no per-request state, so one
/// pipeline can be shared between threads.
pub trait Handler<R: ?Sized>: Send + Sync {
    /// Name used in traces and in rejection reasons for failed checks.
    fn name(&self) -> &str;

    fn check(&self, request: &R) -> Result<Outcome, CheckError>;
}

impl<R: ?Sized, H: Handler<R> + ?Sized> Handler<R> for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn check(&self, request: &R) -> Result<Outcome, CheckError> {
        (**self).check(request)
    }
}

/// Adapts a closure into a named [`Handler`].
pub struct FnHandler<F> {
    name: String,
    check: F,
}

impl<F> FnHandler<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<R: ?Sized, F> Handler<R> for FnHandler<F>
where
    F: Fn(&R) -> Result<Outcome, CheckError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, request: &R) -> Result<Outcome, CheckError> {
        (self.check)(request)
    }
}

impl<F> std::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

/// Shorthand for [`FnHandler::new`].
pub fn handler_fn<R, F>(name: impl Into<String>, check: F) -> FnHandler<F>
where
    R: ?Sized,
    F: Fn(&R) -> Result<Outcome, CheckError> + Send + Sync,
{
    FnHandler::new(name, check)
}
