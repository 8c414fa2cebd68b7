//! Utility error types.

use thiserror::Error;

/// Errors surfaced by the utility core.
///
/// Coercion failures are never errors (they are `NaN`); missing paths and
/// nullish collections soft-fail to defaults. The only hard failures are
/// handing a non-callable where a function value is required, and whatever a
/// caller-supplied callback chooses to raise — the latter propagates through
/// the utilities unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// An iteratee/predicate argument was not a function value.
    #[error("expected a function, got {0}")]
    NotCallable(String),

    /// A caller-supplied callback failed.
    #[error("{0}")]
    Callback(String),
}
