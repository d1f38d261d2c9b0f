//! MatchingEngine: the core continuous double-auction algorithm.
//!
//! Owns both half-books for a single [`Tradable`] plus a reference price and
//! a pluggable price-formation strategy, and implements price-time priority
//! matching with partial-fill residuals.

use crate::error::EngineError;
use crate::fill::Fill;
use crate::half_book::HalfBook;
use crate::order::Order;
use crate::ordering::{default_ask_ordering, default_bid_ordering, Comparator};
use crate::price_formation::{default_price_formation, PriceFormationContext, PriceFormationFn};
use crate::side::Side;
use crate::types::{Price, Tradable};

/// A deterministic, single-threaded continuous double-auction matching
/// engine for one tradable instrument.
///
/// The engine performs no I/O and is not `Sync`-safe by convention: callers
/// that need concurrent access must serialize calls externally (a mutex or
/// a single-consumer queue).
pub struct MatchingEngine {
    tradable: Tradable,
    ask_book: HalfBook,
    bid_book: HalfBook,
    reference_price: Price,
    price_formation: PriceFormationFn,
}

impl MatchingEngine {
    /// Creates a new engine bound to `tradable`.
    ///
    /// Returns [`EngineError::InvalidPrice`] if `initial_reference_price` is
    /// not strictly positive.
    pub fn new(
        tradable: Tradable,
        ask_ordering: Comparator,
        bid_ordering: Comparator,
        initial_reference_price: Price,
        price_formation: PriceFormationFn,
    ) -> Result<Self, EngineError> {
        if !initial_reference_price.is_positive() {
            return Err(EngineError::InvalidPrice);
        }
        Ok(Self {
            ask_book: HalfBook::new(Side::Ask, tradable.clone(), ask_ordering),
            bid_book: HalfBook::new(Side::Bid, tradable.clone(), bid_ordering),
            tradable,
            reference_price: initial_reference_price,
            price_formation,
        })
    }

    fn book(&self, side: Side) -> &HalfBook {
        match side {
            Side::Ask => &self.ask_book,
            Side::Bid => &self.bid_book,
        }
    }

    fn book_mut(&mut self, side: Side) -> &mut HalfBook {
        match side {
            Side::Ask => &mut self.ask_book,
            Side::Bid => &mut self.bid_book,
        }
    }

    fn validate_incoming(&self, order: &Order) -> Result<(), EngineError> {
        if order.tradable() != &self.tradable {
            return Err(EngineError::InvalidTradable {
                expected: self.tradable.clone(),
                found: order.tradable().clone(),
            });
        }
        if order.quantity() == 0 {
            return Err(EngineError::InvalidQuantity);
        }
        if let Some(price) = order.price() {
            if !price.is_positive() {
                return Err(EngineError::InvalidPrice);
            }
        }
        if self.ask_book.contains(order.uuid()) || self.bid_book.contains(order.uuid()) {
            return Err(EngineError::DuplicateOrder(order.uuid()));
        }
        Ok(())
    }

    /// Attempts to match `incoming` against the opposite half-book,
    /// repeatedly, until no further cross is possible; any unmatched
    /// residual then rests in `incoming`'s own half-book.
    ///
    /// Returns `Ok(None)` if no trade occurred (the order simply rests, or
    /// was absorbed as the final residual of a series of fills), or
    /// `Ok(Some(fills))` with at least one [`Fill`] in execution order.
    pub fn find_match(&mut self, incoming: Order) -> Result<Option<Vec<Fill>>, EngineError> {
        self.validate_incoming(&incoming)?;

        let mut fills = Vec::new();
        let mut current = incoming;

        loop {
            let opposite_side = current.side().opposite();
            let crosses = match self.book(opposite_side).peek_best() {
                Some(best) => crate::order::crosses(&current, best),
                None => false,
            };

            if !crosses {
                self.rest(current)?;
                break;
            }

            let best = self
                .book_mut(opposite_side)
                .pop_best()
                .expect("peeked a best order that then vanished");

            let trade_quantity = current.quantity().min(best.quantity());

            let ask_book_best_limit_price = self
                .ask_book
                .find(Order::is_limit)
                .and_then(|o| o.price());
            let ctx = PriceFormationContext {
                incoming: &current,
                resting: &best,
                reference_price: self.reference_price,
                ask_book_best_limit_price,
            };
            let execution_price = (self.price_formation)(&ctx);
            if !execution_price.is_positive() {
                tracing::error!(
                    price = execution_price.0,
                    "price-formation strategy produced a non-positive execution price"
                );
                panic!("internal invariant violated: non-positive execution price");
            }
            self.reference_price = execution_price;

            let (ask_order, bid_order) = match current.side() {
                Side::Ask => (current.clone(), best.clone()),
                Side::Bid => (best.clone(), current.clone()),
            };

            use std::cmp::Ordering::*;
            match current.quantity().cmp(&best.quantity()) {
                Greater => {
                    let (filled_current, residual_current) =
                        current.split(current.quantity() - best.quantity());
                    let (residual_ask, residual_bid) = match filled_current.side() {
                        Side::Ask => (Some(residual_current.clone()), None),
                        Side::Bid => (None, Some(residual_current.clone())),
                    };
                    fills.push(Fill {
                        ask_order,
                        bid_order,
                        price: execution_price,
                        quantity: trade_quantity,
                        residual_ask,
                        residual_bid,
                    });
                    current = residual_current;
                }
                Less => {
                    let (filled_best, residual_best) =
                        best.split(best.quantity() - current.quantity());
                    let (residual_ask, residual_bid) = match filled_best.side() {
                        Side::Ask => (Some(residual_best.clone()), None),
                        Side::Bid => (None, Some(residual_best.clone())),
                    };
                    fills.push(Fill {
                        ask_order,
                        bid_order,
                        price: execution_price,
                        quantity: trade_quantity,
                        residual_ask,
                        residual_bid,
                    });
                    self.book_mut(opposite_side)
                        .add(residual_best)
                        .map_err(|e| self.fatal(e))?;
                    break;
                }
                Equal => {
                    fills.push(Fill {
                        ask_order,
                        bid_order,
                        price: execution_price,
                        quantity: trade_quantity,
                        residual_ask: None,
                        residual_bid: None,
                    });
                    break;
                }
            }
        }

        if fills.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fills))
        }
    }

    fn rest(&mut self, order: Order) -> Result<(), EngineError> {
        let side = order.side();
        self.book_mut(side).add(order).map_err(|e| self.fatal(e))
    }

    /// Re-inserting a split residual into its own half-book should never
    /// fail (the half-book just gave up its `uuid`); treat a failure here
    /// as the `InvariantViolation` it would actually represent.
    fn fatal(&self, err: EngineError) -> EngineError {
        tracing::error!(error = %err, "invariant violated while re-resting an order");
        EngineError::InvariantViolation(err.to_string())
    }

    /// Cancels a resting order by identity. Returns `None` if it is not
    /// currently resting (already filled, already cancelled, or never
    /// submitted). Idempotent: a second cancel of the same order returns
    /// `None`.
    pub fn cancel(&mut self, order: &Order) -> Option<Order> {
        self.book_mut(order.side()).remove(order.uuid())
    }

    /// Iterates resting ask orders in priority order.
    pub fn ask_book_iter(&self) -> impl Iterator<Item = &Order> {
        self.ask_book.iter()
    }

    /// Iterates resting bid orders in priority order.
    pub fn bid_book_iter(&self) -> impl Iterator<Item = &Order> {
        self.bid_book.iter()
    }

    #[inline]
    pub fn reference_price(&self) -> Price {
        self.reference_price
    }

    #[inline]
    pub fn len_asks(&self) -> usize {
        self.ask_book.len()
    }

    #[inline]
    pub fn len_bids(&self) -> usize {
        self.bid_book.len()
    }

    #[inline]
    pub fn tradable(&self) -> &Tradable {
        &self.tradable
    }
}

/// Fluent builder for [`MatchingEngine`], defaulting every pluggable
/// parameter to the standard price-time-priority policy so a caller only
/// overrides what it actually needs to.
pub struct MatchingEngineBuilder {
    tradable: Tradable,
    ask_ordering: Comparator,
    bid_ordering: Comparator,
    initial_reference_price: Price,
    price_formation: PriceFormationFn,
}

impl MatchingEngineBuilder {
    pub fn new(tradable: Tradable, initial_reference_price: Price) -> Self {
        Self {
            tradable,
            ask_ordering: default_ask_ordering,
            bid_ordering: default_bid_ordering,
            initial_reference_price,
            price_formation: default_price_formation,
        }
    }

    pub fn ask_ordering(mut self, ordering: Comparator) -> Self {
        self.ask_ordering = ordering;
        self
    }

    pub fn bid_ordering(mut self, ordering: Comparator) -> Self {
        self.bid_ordering = ordering;
        self
    }

    pub fn price_formation(mut self, strategy: PriceFormationFn) -> Self {
        self.price_formation = strategy;
        self
    }

    pub fn build(self) -> Result<MatchingEngine, EngineError> {
        MatchingEngine::new(
            self.tradable,
            self.ask_ordering,
            self.bid_ordering,
            self.initial_reference_price,
            self.price_formation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrderCommon, OrderUuid, Quantity, Timestamp};
    use uuid::Uuid;

    fn engine(tradable: &Tradable) -> MatchingEngine {
        MatchingEngineBuilder::new(tradable.clone(), Price(1))
            .build()
            .unwrap()
    }

    fn common(tradable: &Tradable, qty: Quantity, ts: Timestamp) -> OrderCommon {
        OrderCommon {
            issuer_id: "X".to_string(),
            quantity: qty,
            timestamp: ts,
            tradable: tradable.clone(),
            uuid: OrderUuid(Uuid::new_v4()),
        }
    }

    #[test]
    fn resting_in_empty_book_produces_no_fills() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        let order = Order::new_limit_ask(common(&tradable, 10, 1), Price(50));

        let result = engine.find_match(order).unwrap();

        assert!(result.is_none());
        assert_eq!(engine.len_asks(), 1);
        assert_eq!(engine.len_bids(), 0);
        assert_eq!(engine.reference_price(), Price(1));
    }

    #[test]
    fn equal_quantity_limit_cross_has_no_residuals() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        engine
            .find_match(Order::new_limit_ask(common(&tradable, 10, 1), Price(50)))
            .unwrap();

        let fills = engine
            .find_match(Order::new_limit_bid(common(&tradable, 10, 2), Price(55)))
            .unwrap()
            .unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price, Price(50));
        assert_eq!(fills[0].quantity, 10);
        assert!(fills[0].residual_ask.is_none());
        assert!(fills[0].residual_bid.is_none());
        assert_eq!(engine.len_asks(), 0);
        assert_eq!(engine.len_bids(), 0);
        assert_eq!(engine.reference_price(), Price(50));
    }

    #[test]
    fn incoming_larger_leaves_residual_on_incoming_side() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        engine
            .find_match(Order::new_limit_ask(common(&tradable, 10, 1), Price(50)))
            .unwrap();

        let fills = engine
            .find_match(Order::new_limit_bid(common(&tradable, 15, 2), Price(55)))
            .unwrap()
            .unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].quantity, 10);
        let residual = fills[0].residual_bid.as_ref().unwrap();
        assert_eq!(residual.quantity(), 5);
        assert_eq!(engine.len_asks(), 0);
        assert_eq!(engine.len_bids(), 1);
    }

    #[test]
    fn incoming_smaller_leaves_residual_resting() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        engine
            .find_match(Order::new_limit_ask(common(&tradable, 10, 1), Price(50)))
            .unwrap();

        let fills = engine
            .find_match(Order::new_limit_bid(common(&tradable, 4, 2), Price(55)))
            .unwrap()
            .unwrap();

        assert_eq!(fills[0].quantity, 4);
        let residual = fills[0].residual_ask.as_ref().unwrap();
        assert_eq!(residual.quantity(), 6);
        assert_eq!(engine.len_asks(), 1);
        assert_eq!(engine.ask_book_iter().next().unwrap().quantity(), 6);
    }

    #[test]
    fn cancel_is_idempotent() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        let order = Order::new_limit_ask(common(&tradable, 10, 1), Price(50));
        engine.find_match(order.clone()).unwrap();

        assert_eq!(engine.cancel(&order), Some(order.clone()));
        assert_eq!(engine.cancel(&order), None);
    }

    #[test]
    fn rejects_mismatched_tradable() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        let other = Tradable::new("GOOG");
        let order = Order::new_limit_bid(common(&other, 10, 1), Price(50));

        let err = engine.find_match(order).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTradable { .. }));
        assert_eq!(engine.len_asks(), 0);
        assert_eq!(engine.len_bids(), 0);
    }

    #[test]
    fn rejects_zero_quantity() {
        let tradable = Tradable::new("AAPL");
        let mut engine = engine(&tradable);
        let order = Order::new_limit_bid(common(&tradable, 0, 1), Price(50));
        let err = engine.find_match(order).unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity));
    }

    #[test]
    fn builder_rejects_nonpositive_reference_price() {
        let tradable = Tradable::new("AAPL");
        let err = MatchingEngineBuilder::new(tradable, Price(0)).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPrice));
    }
}
