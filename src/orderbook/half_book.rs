//! `HalfBook`: one side (bids or asks) of the order book.
//!
//! Levels are held in a `BTreeMap<Price, PriceLevel>` (design note §9.2:
//! an ordered map keeps best-price recomputation at O(log n) after a level
//! empties, instead of rescanning every key). `best` is cached explicitly
//! rather than re-derived on every read.

use super::order::{Order, OrderIdx, Price};
use super::price_level::PriceLevel;
use std::collections::BTreeMap;

/// Which extreme of the map counts as "best" for this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Bids: best is the highest price.
    Bid,
    /// Asks: best is the lowest price.
    Ask,
}

/// One side of the book: a map of price -> resting queue, plus a pointer
/// to the best (highest bid / lowest ask) level.
#[derive(Debug, Clone)]
pub struct HalfBook {
    /// Which side this is; governs `is_new_best` and best-price extremum.
    pub side: Side,
    /// Levels keyed by price.
    pub book: BTreeMap<Price, PriceLevel>,
    /// Cached best price. `None` iff `book` is empty.
    pub best: Option<Price>,
}

impl HalfBook {
    /// An empty half-book for the given side.
    pub fn new(side: Side) -> Self {
        HalfBook {
            side,
            book: BTreeMap::new(),
            best: None,
        }
    }

    /// True iff `candidate` would replace the current best for this side.
    fn is_new_best(&self, candidate: Price) -> bool {
        match self.best {
            None => true,
            Some(best) => match self.side {
                Side::Bid => candidate > best,
                Side::Ask => candidate < best,
            },
        }
    }

    /// Append `order_idx` (at `price`) to its level, creating the level if
    /// this is the first order at that price, and updating `best` and
    /// `order.active` as needed.
    pub fn add(&mut self, order_idx: OrderIdx, price: Price, arena: &mut [Order]) {
        if let Some(level) = self.book.get_mut(&price) {
            level.link_append(order_idx, arena);
        } else {
            let level = PriceLevel::new(price, order_idx);
            self.book.insert(price, level);
            if self.is_new_best(price) {
                self.best = Some(price);
            }
        }
        arena[order_idx.0].active = true;
    }

    /// Remove the level at `price` entirely and restore `best` from the
    /// remaining keys. Only valid to call once the level is empty.
    pub fn remove_price(&mut self, price: Price) {
        self.book.remove(&price);
        self.best = match self.side {
            Side::Bid => self.book.keys().next_back().copied(),
            Side::Ask => self.book.keys().next().copied(),
        };
    }

    /// The best level, if any.
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best.and_then(|p| self.book.get(&p))
    }

    /// The best level, mutably, if any.
    pub fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        self.best.and_then(move |p| self.book.get_mut(&p))
    }
}
