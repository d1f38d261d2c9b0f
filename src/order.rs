//! Order representation: a tagged sum type over {limit, market} x {ask, bid}.

use crate::{OrderUuid, Price, Quantity, Side, Tradable, Timestamp};

/// Attributes shared by every order variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderCommon {
    pub issuer_id: String,
    pub quantity: Quantity,
    pub timestamp: Timestamp,
    pub tradable: Tradable,
    pub uuid: OrderUuid,
}

/// An order submitted to the matching engine.
///
/// The variant determines both side and priced-ness, replacing a flat
/// struct with a `price: Option<Price>` sentinel: a market order simply has
/// no `price` field to misuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Order {
    LimitAsk { common: OrderCommon, price: Price },
    LimitBid { common: OrderCommon, price: Price },
    MarketAsk { common: OrderCommon },
    MarketBid { common: OrderCommon },
}

impl Order {
    pub fn new_limit_ask(common: OrderCommon, price: Price) -> Self {
        Order::LimitAsk { common, price }
    }

    pub fn new_limit_bid(common: OrderCommon, price: Price) -> Self {
        Order::LimitBid { common, price }
    }

    pub fn new_market_ask(common: OrderCommon) -> Self {
        Order::MarketAsk { common }
    }

    pub fn new_market_bid(common: OrderCommon) -> Self {
        Order::MarketBid { common }
    }

    #[inline]
    fn common(&self) -> &OrderCommon {
        match self {
            Order::LimitAsk { common, .. }
            | Order::LimitBid { common, .. }
            | Order::MarketAsk { common }
            | Order::MarketBid { common } => common,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        match self {
            Order::LimitAsk { .. } | Order::MarketAsk { .. } => Side::Ask,
            Order::LimitBid { .. } | Order::MarketBid { .. } => Side::Bid,
        }
    }

    #[inline]
    pub fn is_market(&self) -> bool {
        matches!(self, Order::MarketAsk { .. } | Order::MarketBid { .. })
    }

    #[inline]
    pub fn is_limit(&self) -> bool {
        !self.is_market()
    }

    #[inline]
    pub fn price(&self) -> Option<Price> {
        match self {
            Order::LimitAsk { price, .. } | Order::LimitBid { price, .. } => Some(*price),
            Order::MarketAsk { .. } | Order::MarketBid { .. } => None,
        }
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.common().quantity
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.common().timestamp
    }

    #[inline]
    pub fn uuid(&self) -> OrderUuid {
        self.common().uuid
    }

    #[inline]
    pub fn tradable(&self) -> &Tradable {
        &self.common().tradable
    }

    #[inline]
    pub fn issuer_id(&self) -> &str {
        &self.common().issuer_id
    }

    /// Splits this order into a filled part and a residual part.
    ///
    /// The filled part keeps `quantity - residual_quantity`; the residual
    /// keeps `residual_quantity`. Both halves preserve identity (`uuid`),
    /// side, price, and every other common attribute. Pure: does not mutate
    /// `self`.
    ///
    /// # Panics
    ///
    /// Panics if `residual_quantity` is not in `[1, quantity - 1]`. Every
    /// call site derives `residual_quantity` from quantities it has already
    /// validated, so an out-of-range value here is an internal bug, not a
    /// caller-recoverable error.
    pub fn split(&self, residual_quantity: Quantity) -> (Order, Order) {
        let total = self.quantity();
        assert!(
            residual_quantity >= 1 && residual_quantity < total,
            "split residual {} out of range for order of quantity {}",
            residual_quantity,
            total
        );

        let filled_quantity = total - residual_quantity;
        let mut filled_common = self.common().clone();
        filled_common.quantity = filled_quantity;
        let mut residual_common = self.common().clone();
        residual_common.quantity = residual_quantity;

        match self {
            Order::LimitAsk { price, .. } => (
                Order::LimitAsk {
                    common: filled_common,
                    price: *price,
                },
                Order::LimitAsk {
                    common: residual_common,
                    price: *price,
                },
            ),
            Order::LimitBid { price, .. } => (
                Order::LimitBid {
                    common: filled_common,
                    price: *price,
                },
                Order::LimitBid {
                    common: residual_common,
                    price: *price,
                },
            ),
            Order::MarketAsk { .. } => (
                Order::MarketAsk {
                    common: filled_common,
                },
                Order::MarketAsk {
                    common: residual_common,
                },
            ),
            Order::MarketBid { .. } => (
                Order::MarketBid {
                    common: filled_common,
                },
                Order::MarketBid {
                    common: residual_common,
                },
            ),
        }
    }
}

/// Returns true if `a` and `b` would trade against each other, i.e. they are
/// on opposite sides and (for two limits) their prices overlap.
pub fn crosses(a: &Order, b: &Order) -> bool {
    use Order::*;
    match (a, b) {
        (MarketAsk { .. }, MarketBid { .. }) | (MarketBid { .. }, MarketAsk { .. }) => true,
        (MarketAsk { .. }, LimitBid { .. }) | (LimitBid { .. }, MarketAsk { .. }) => true,
        (LimitAsk { .. }, MarketBid { .. }) | (MarketBid { .. }, LimitAsk { .. }) => true,
        (LimitAsk { price: ask, .. }, LimitBid { price: bid, .. }) => ask <= bid,
        (LimitBid { price: bid, .. }, LimitAsk { price: ask, .. }) => ask <= bid,
        _ => false,
    }
}
