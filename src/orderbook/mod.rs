//! The order book module: matching engine, tick grid, market impact, and
//! the trade/statistics projections built on top of them.

mod bands;
mod book;
mod error;
mod half_book;
mod impact;
mod order;
mod price_level;
mod stats;
mod tick_grid;
mod trade_log;
#[cfg(test)]
mod tests;

pub use bands::{band_for, Band, DEFAULT_BAND};
pub use book::OrderBook;
pub use error::OrderBookError;
pub use half_book::Side;
pub use impact::MarketImpact;
pub use order::{Order, OrderIdx, OrderStatus, Price};
pub use tick_grid::TickGrid;
pub use trade_log::{MyTrade, Trade, TradeLog};
