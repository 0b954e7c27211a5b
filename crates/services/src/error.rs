//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by session operations.
///
/// Every variant is a rejected no-op: the operation leaves the session state
/// exactly as it was. Callers that want the submission silently ignored can
/// drop the `Err`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is being presented")]
    NotPresenting,

    #[error("no choice selected")]
    NoSelection,

    #[error("answers are locked after grading")]
    ChoicesLocked,

    #[error("choice is not among the displayed answers")]
    UnknownChoice,
}
