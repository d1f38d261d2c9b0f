//! Price-formation strategy: decides the execution price of a match.

use crate::{Order, Price};

/// Inputs available to a price-formation strategy. `ask_book_best_limit_price`
/// is populated by the engine from its own ask half-book immediately before
/// invoking the strategy, so the strategy function itself stays pure.
pub struct PriceFormationContext<'a> {
    pub incoming: &'a Order,
    pub resting: &'a Order,
    pub reference_price: Price,
    pub ask_book_best_limit_price: Option<Price>,
}

/// A pure function computing the execution price of a match.
pub type PriceFormationFn = fn(&PriceFormationContext) -> Price;

/// The default continuous-double-auction pricing policy:
///
/// - both limit: the resting order's price (price improvement accrues to
///   the aggressor).
/// - one limit, one market: the limit order's price.
/// - both market: the reference price, anchored to the best resting limit
///   ask if one exists.
pub fn default_price_formation(ctx: &PriceFormationContext) -> Price {
    match (ctx.incoming.is_market(), ctx.resting.is_market()) {
        (false, false) => ctx.resting.price().expect("limit order has a price"),
        (true, false) => ctx.resting.price().expect("limit order has a price"),
        (false, true) => {
            let incoming_price = ctx.incoming.price().expect("limit order has a price");
            match ctx.incoming.side() {
                crate::Side::Ask => Price(ctx.reference_price.0.max(incoming_price.0)),
                crate::Side::Bid => Price(ctx.reference_price.0.min(incoming_price.0)),
            }
        }
        (true, true) => match ctx.ask_book_best_limit_price {
            Some(anchor) => Price(anchor.0.min(ctx.reference_price.0)),
            None => ctx.reference_price,
        },
    }
}
