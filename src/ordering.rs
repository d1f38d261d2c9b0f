//! Price-time priority orderings for each side of the book.

use std::cmp::Ordering;

use crate::{Order, OrderUuid, Timestamp};

/// A total order over orders of one side. Returns `Less` when `a` has
/// strictly higher priority (matches first) than `b`.
pub type Comparator = fn(&Order, &Order) -> Ordering;

/// Sort key for the ask side: market orders first, then ascending price,
/// then ascending timestamp, then `uuid` as a final deterministic tiebreak.
fn ask_key(o: &Order) -> (u8, i64, Timestamp, OrderUuid) {
    match o.price() {
        Some(p) => (1, p.0, o.timestamp(), o.uuid()),
        None => (0, 0, o.timestamp(), o.uuid()),
    }
}

/// Sort key for the bid side: market orders first, then descending price
/// (via negation), then ascending timestamp, then `uuid`.
fn bid_key(o: &Order) -> (u8, i64, Timestamp, OrderUuid) {
    match o.price() {
        Some(p) => (1, -p.0, o.timestamp(), o.uuid()),
        None => (0, 0, o.timestamp(), o.uuid()),
    }
}

/// Default ask-side ordering: lowest price wins, markets ahead of limits,
/// ties broken by earlier timestamp then `uuid`.
pub fn default_ask_ordering(a: &Order, b: &Order) -> Ordering {
    ask_key(a).cmp(&ask_key(b))
}

/// Default bid-side ordering: highest price wins, markets ahead of limits,
/// ties broken by earlier timestamp then `uuid`.
pub fn default_bid_ordering(a: &Order, b: &Order) -> Ordering {
    bid_key(a).cmp(&bid_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrderCommon, Price, Quantity, Tradable};
    use uuid::Uuid;

    fn order(
        side_ask: bool,
        price: Option<i64>,
        timestamp: Timestamp,
        quantity: Quantity,
    ) -> Order {
        let common = OrderCommon {
            issuer_id: "X".to_string(),
            quantity,
            timestamp,
            tradable: Tradable::new("AAPL"),
            uuid: OrderUuid(Uuid::new_v4()),
        };
        match (side_ask, price) {
            (true, Some(p)) => Order::new_limit_ask(common, Price(p)),
            (true, None) => Order::new_market_ask(common),
            (false, Some(p)) => Order::new_limit_bid(common, Price(p)),
            (false, None) => Order::new_market_bid(common),
        }
    }

    #[test]
    fn ask_ordering_prefers_lower_price() {
        let cheap = order(true, Some(50), 1, 10);
        let expensive = order(true, Some(60), 2, 10);
        assert_eq!(default_ask_ordering(&cheap, &expensive), Ordering::Less);
    }

    #[test]
    fn bid_ordering_prefers_higher_price() {
        let high = order(false, Some(60), 1, 10);
        let low = order(false, Some(50), 2, 10);
        assert_eq!(default_bid_ordering(&high, &low), Ordering::Less);
    }

    #[test]
    fn market_beats_limit_on_both_sides() {
        let market_ask = order(true, None, 5, 10);
        let limit_ask = order(true, Some(1), 1, 10);
        assert_eq!(default_ask_ordering(&market_ask, &limit_ask), Ordering::Less);

        let market_bid = order(false, None, 5, 10);
        let limit_bid = order(false, Some(1_000_000), 1, 10);
        assert_eq!(default_bid_ordering(&market_bid, &limit_bid), Ordering::Less);
    }

    #[test]
    fn ties_broken_by_timestamp() {
        let earlier = order(true, Some(50), 1, 10);
        let later = order(true, Some(50), 2, 10);
        assert_eq!(default_ask_ordering(&earlier, &later), Ordering::Less);
    }
}
