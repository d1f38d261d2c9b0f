//! Errors surfaced by the matching engine.

use crate::{OrderUuid, Tradable};

/// Errors returned by engine-boundary operations.
///
/// `InvalidTradable`, `DuplicateOrder`, `InvalidQuantity`, `InvalidPrice`,
/// and `WrongSide` are recoverable input errors: the engine's state is
/// unchanged when one is returned. `InvariantViolation` is fatal and should
/// never occur from well-formed input; see the `tracing::error!` call
/// emitted alongside it in `engine.rs`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("order belongs to tradable {found}, expected {expected}")]
    InvalidTradable { expected: Tradable, found: Tradable },

    #[error("order {0} is already resting")]
    DuplicateOrder(OrderUuid),

    #[error("order quantity must be positive")]
    InvalidQuantity,

    #[error("limit order price must be positive")]
    InvalidPrice,

    #[error("order side does not match this half-book's side")]
    WrongSide,

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
