//! The `Order` record and the arena that owns it.
//!
//! Orders are never removed from the arena: a filled or cancelled order
//! stays addressable by uid for status queries (§3 of the design). What
//! changes is whether the order is linked into a [`PriceLevel`](super::price_level::PriceLevel)
//! queue, tracked via `active` plus the `prev`/`next` arena indices.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit price, or one of the unbounded-market-order sentinels
/// (`f64::INFINITY` for buys, `f64::NEG_INFINITY` for sells).
///
/// Wraps [`OrderedFloat`] so it can key a `BTreeMap` while still comparing
/// NaN-free floats the way a quote actually behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(pub OrderedFloat<f64>);

impl Price {
    /// The unbounded buy-side sentinel: crosses every resting ask.
    pub const BUY_MARKET: Price = Price(OrderedFloat(f64::INFINITY));
    /// The unbounded sell-side sentinel: crosses every resting bid.
    pub const SELL_MARKET: Price = Price(OrderedFloat(f64::NEG_INFINITY));

    /// Build a `Price`, rejecting NaN.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else {
            Some(Price(OrderedFloat(value)))
        }
    }

    /// The raw `f64` value.
    pub fn value(self) -> f64 {
        self.0.0
    }

    /// True for either unbounded-market sentinel.
    pub fn is_unbounded(self) -> bool {
        self.0.0.is_infinite()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.0)
    }
}

/// Compact index into the order arena. Stable for the lifetime of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderIdx(pub usize);

/// One resting or filled/cancelled order.
///
/// Also doubles as a node in its `PriceLevel`'s intrusive doubly-linked
/// list via `prev`/`next`, which index back into the same arena rather than
/// holding raw pointers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Identity. Negative => participant's own order, non-negative =>
    /// replayed historical order.
    pub uid: i64,
    /// Side of the book this order trades on.
    pub is_buy: bool,
    /// Original size at arrival.
    pub qty: u64,
    /// Remaining unfilled size. Zero once fully matched or cancelled.
    pub leavesqty: u64,
    /// Cumulative quantity frozen at cancel time. `None` while the order is
    /// still live (use `cumqty()` for the derived value in that case).
    pub(crate) frozen_cumqty: Option<u64>,
    /// Limit price (post market-impact adjustment for historical orders).
    pub price: Price,
    /// Arrival time, assigned by the caller.
    pub timestamp: u64,
    /// True iff currently resting in a half-book.
    pub active: bool,
    /// Previous order in this price level's FIFO queue.
    pub(crate) prev: Option<OrderIdx>,
    /// Next order in this price level's FIFO queue.
    pub(crate) next: Option<OrderIdx>,
}

impl Order {
    pub(crate) fn new(uid: i64, is_buy: bool, qty: u64, price: Price, timestamp: u64) -> Self {
        Order {
            uid,
            is_buy,
            qty,
            leavesqty: qty,
            frozen_cumqty: None,
            price,
            timestamp,
            active: false,
            prev: None,
            next: None,
        }
    }

    /// `qty - leavesqty` while active; the pre-cancel remainder once
    /// cancelled (frozen at cancel time, per §3).
    pub fn cumqty(&self) -> u64 {
        self.frozen_cumqty.unwrap_or(self.qty - self.leavesqty)
    }
}

/// Read-only snapshot of an order's current status, returned by
/// `OrderBook::get`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderStatus {
    /// Order identity.
    pub uid: i64,
    /// Side of the book.
    pub is_buy: bool,
    /// Original size at arrival.
    pub qty: u64,
    /// `qty - leavesqty` while active; frozen at cancel time.
    pub cumqty: u64,
    /// Remaining unfilled size.
    pub leavesqty: u64,
    /// Limit price.
    pub price: f64,
    /// Arrival timestamp.
    pub timestamp: u64,
    /// True iff currently resting in a half-book.
    pub active: bool,
}

impl From<&Order> for OrderStatus {
    fn from(order: &Order) -> Self {
        OrderStatus {
            uid: order.uid,
            is_buy: order.is_buy,
            qty: order.qty,
            cumqty: order.cumqty(),
            leavesqty: order.leavesqty,
            price: order.price.value(),
            timestamp: order.timestamp,
            active: order.active,
        }
    }
}
