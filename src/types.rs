//! Core types: Tradable, Price, Quantity, Timestamp, OrderUuid.

use std::fmt;

use uuid::Uuid;

/// Price in smallest units (e.g., cents, basis points).
///
/// `Price(10050)` represents $100.50 if tick size is $0.01.
/// Using fixed-point avoids floating-point errors in financial calculations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const MAX: Price = Price(i64::MAX);
    pub const MIN: Price = Price(i64::MIN);

    /// Returns true if the price is a valid limit price (strictly positive).
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

/// Quantity of shares/contracts. Always positive while an order is live.
pub type Quantity = u64;

/// Timestamp assigned by the caller, monotonically increasing per engine.
pub type Timestamp = u64;

/// Globally unique order identifier.
///
/// Wraps a [`Uuid`] rather than an engine-assigned sequence number: identity
/// is minted by the order's issuer before submission, so two engines (or an
/// engine and its test harness) never need to coordinate an ID allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderUuid(pub Uuid);

impl OrderUuid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a tradable instrument.
///
/// Two `Tradable`s are equal iff their `id` matches; `symbol` is carried for
/// display and for the `InvalidTradable` error message, not for equality.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tradable {
    pub symbol: String,
    pub id: Uuid,
}

impl Tradable {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            id: Uuid::new_v4(),
        }
    }
}

impl PartialEq for Tradable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Tradable {}

impl std::hash::Hash for Tradable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Tradable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
