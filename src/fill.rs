//! Fill: the immutable record of a single match between two orders.

use crate::{Order, Price, Quantity};

/// A completed (possibly partial) match between a resting ask order and a
/// resting bid order.
///
/// Conservation law: `ask_order.quantity() == quantity +
/// residual_ask.as_ref().map_or(0, Order::quantity)`, and symmetrically for
/// the bid side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fill {
    pub ask_order: Order,
    pub bid_order: Order,
    pub price: Price,
    pub quantity: Quantity,
    pub residual_ask: Option<Order>,
    pub residual_bid: Option<Order>,
}

impl Fill {
    /// Notional value of the fill (price x quantity).
    pub fn notional(&self) -> i64 {
        self.price.0 * self.quantity as i64
    }
}
