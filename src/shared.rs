//! Shared code for frontend and bytecode

pub mod bounded;
pub mod typed_ids;
pub mod error;

/// How a stage reacts to a recoverable error. Defaults to `Recover`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first error and return it.
    Abort,
    /// Record the error, skip ahead to a safe point and continue.
    Recover,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Recover
    }
}
