use lax_core::ValueError;
use thiserror::Error;

/// Errors surfaced by the commerce flows.
#[derive(Debug, Error, PartialEq)]
pub enum CommerceError {
    /// A utility raised while composing a flow (non-callable iteratee or a
    /// failing callback).
    #[error(transparent)]
    Value(#[from] ValueError),
}
