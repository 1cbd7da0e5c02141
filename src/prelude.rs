//! Prelude module that re-exports commonly used types.
//!
//! ```rust
//! use marketsim_orderbook::prelude::*;
//! ```

pub use crate::orderbook::{
    band_for, Band, MarketImpact, Order, OrderBook, OrderBookError, OrderIdx, OrderStatus, Price,
    Side, TickGrid, Trade, TradeLog, MyTrade, DEFAULT_BAND,
};
