//! HalfBook: one side of the order book, keyed by `uuid` and kept sorted by
//! a pluggable priority [`Comparator`].
//!
//! A half-book cannot assume its ordering key is `Price` — the ordering is
//! a caller-supplied function, so ties, market-order priority, and
//! tiebreakers are entirely up to it. The tradeoff: insertion and removal
//! locate their position with a binary search (`O(log n)` comparisons) but
//! still pay an `O(n)` shift to keep the sorted vector contiguous.

use rustc_hash::FxHashMap;

use crate::{Order, OrderUuid, Side, Tradable};
use crate::error::EngineError;
use crate::ordering::Comparator;

/// One side of the order book: all resting orders of a single [`Side`] for
/// a single [`Tradable`], sorted by priority.
#[derive(Clone)]
pub struct HalfBook {
    side: Side,
    tradable: Tradable,
    ordering: Comparator,
    sorted: Vec<OrderUuid>,
    index: FxHashMap<OrderUuid, Order>,
}

impl HalfBook {
    pub fn new(side: Side, tradable: Tradable, ordering: Comparator) -> Self {
        Self {
            side,
            tradable,
            ordering,
            sorted: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Position at which `order` would be inserted to keep `sorted` ordered,
    /// found by binary search against the resolved orders in `index`.
    fn insertion_position(&self, order: &Order) -> usize {
        self.sorted.partition_point(|uuid| {
            let existing = self.index.get(uuid).expect("sorted/index out of sync");
            (self.ordering)(existing, order) != std::cmp::Ordering::Greater
        })
    }

    /// Inserts a resting order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTradable`] if `order.tradable()` differs from
    ///   this book's tradable.
    /// - [`EngineError::WrongSide`] if `order.side()` differs from this
    ///   book's side.
    /// - [`EngineError::DuplicateOrder`] if `order.uuid()` is already
    ///   resting.
    pub fn add(&mut self, order: Order) -> Result<(), EngineError> {
        if order.tradable() != &self.tradable {
            return Err(EngineError::InvalidTradable {
                expected: self.tradable.clone(),
                found: order.tradable().clone(),
            });
        }
        if order.side() != self.side {
            return Err(EngineError::WrongSide);
        }
        if self.index.contains_key(&order.uuid()) {
            return Err(EngineError::DuplicateOrder(order.uuid()));
        }

        let pos = self.insertion_position(&order);
        let uuid = order.uuid();
        self.sorted.insert(pos, uuid);
        self.index.insert(uuid, order);
        Ok(())
    }

    /// Removes and returns the order with the given `uuid`, if resting.
    pub fn remove(&mut self, uuid: OrderUuid) -> Option<Order> {
        let order = self.index.remove(&uuid)?;
        let pos = self
            .sorted
            .iter()
            .position(|u| *u == uuid)
            .expect("sorted/index out of sync");
        self.sorted.remove(pos);
        Some(order)
    }

    /// Removes and returns the highest-priority resting order.
    pub fn pop_best(&mut self) -> Option<Order> {
        if self.sorted.is_empty() {
            return None;
        }
        let uuid = self.sorted.remove(0);
        Some(self.index.remove(&uuid).expect("sorted/index out of sync"))
    }

    /// Returns a reference to the highest-priority resting order.
    pub fn peek_best(&self) -> Option<&Order> {
        let uuid = self.sorted.first()?;
        self.index.get(uuid)
    }

    /// Returns the first order in priority order matching `predicate`.
    pub fn find<P: FnMut(&Order) -> bool>(&self, mut predicate: P) -> Option<Order> {
        self.sorted
            .iter()
            .map(|uuid| self.index.get(uuid).expect("sorted/index out of sync"))
            .find(|order| predicate(order))
            .cloned()
    }

    /// Returns every resting order matching `predicate`, in priority order,
    /// or `None` when nothing matches (an explicit "no matches" signal,
    /// distinct from an empty collection).
    pub fn filter<P: FnMut(&Order) -> bool>(&self, mut predicate: P) -> Option<Vec<Order>> {
        let matches: Vec<Order> = self
            .sorted
            .iter()
            .map(|uuid| self.index.get(uuid).expect("sorted/index out of sync"))
            .filter(|order| predicate(order))
            .cloned()
            .collect();
        if matches.is_empty() { None } else { Some(matches) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[inline]
    pub fn contains(&self, uuid: OrderUuid) -> bool {
        self.index.contains_key(&uuid)
    }

    /// Iterates resting orders in priority order (best first).
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.sorted
            .iter()
            .map(|uuid| self.index.get(uuid).expect("sorted/index out of sync"))
    }
}
