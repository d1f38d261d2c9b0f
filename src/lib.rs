#![allow(clippy::inconsistent_digit_grouping)]

//! # microbook
//!
//! A deterministic continuous double-auction (CDA) matching engine: two
//! sorted half-books, price-time priority, and partial fills with
//! residuals, for a single tradable instrument.
//!
//! ## Quick Start
//!
//! ```
//! use microbook::{MatchingEngineBuilder, Order, OrderCommon, OrderUuid, Price, Tradable};
//!
//! let tradable = Tradable::new("AAPL");
//! let mut engine = MatchingEngineBuilder::new(tradable.clone(), Price(1))
//!     .build()
//!     .unwrap();
//!
//! let common = |ts| OrderCommon {
//!     issuer_id: "alice".to_string(),
//!     quantity: 10,
//!     timestamp: ts,
//!     tradable: tradable.clone(),
//!     uuid: OrderUuid::new(),
//! };
//!
//! // Rest an ask.
//! engine.find_match(Order::new_limit_ask(common(1), Price(50))).unwrap();
//!
//! // A crossing bid matches immediately.
//! let fills = engine
//!     .find_match(Order::new_limit_bid(common(2), Price(55)))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(fills[0].price, Price(50));
//! assert_eq!(fills[0].quantity, 10);
//! ```
//!
//! ## Market orders
//!
//! A market order carries no price; it executes at whatever price the
//! price-formation strategy derives from the resting order it matches:
//!
//! ```
//! use microbook::{MatchingEngineBuilder, Order, OrderCommon, OrderUuid, Price, Tradable};
//!
//! let tradable = Tradable::new("AAPL");
//! let mut engine = MatchingEngineBuilder::new(tradable.clone(), Price(1))
//!     .build()
//!     .unwrap();
//! let common = |ts| OrderCommon {
//!     issuer_id: "alice".to_string(),
//!     quantity: 10,
//!     timestamp: ts,
//!     tradable: tradable.clone(),
//!     uuid: OrderUuid::new(),
//! };
//!
//! engine.find_match(Order::new_limit_ask(common(1), Price(50))).unwrap();
//! let fills = engine
//!     .find_match(Order::new_market_bid(common(2)))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(fills[0].price, Price(50));
//! ```
//!
//! ## Cancellation
//!
//! ```
//! use microbook::{MatchingEngineBuilder, Order, OrderCommon, OrderUuid, Price, Tradable};
//!
//! let tradable = Tradable::new("AAPL");
//! let mut engine = MatchingEngineBuilder::new(tradable.clone(), Price(1))
//!     .build()
//!     .unwrap();
//! let order = Order::new_limit_ask(
//!     OrderCommon {
//!         issuer_id: "alice".to_string(),
//!         quantity: 10,
//!         timestamp: 1,
//!         tradable: tradable.clone(),
//!         uuid: OrderUuid::new(),
//!     },
//!     Price(50),
//! );
//! engine.find_match(order.clone()).unwrap();
//!
//! assert!(engine.cancel(&order).is_some());
//! assert!(engine.cancel(&order).is_none());
//! ```

mod engine;
mod error;
mod fill;
mod half_book;
mod order;
mod ordering;
mod price_formation;
mod side;
mod types;

pub use engine::{MatchingEngine, MatchingEngineBuilder};
pub use error::EngineError;
pub use fill::Fill;
pub use half_book::HalfBook;
pub use order::{crosses, Order, OrderCommon};
pub use ordering::{default_ask_ordering, default_bid_ordering, Comparator};
pub use price_formation::{default_price_formation, PriceFormationContext, PriceFormationFn};
pub use side::Side;
pub use types::{OrderUuid, Price, Quantity, Tradable, Timestamp};
