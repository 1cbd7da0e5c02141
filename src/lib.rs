//! # marketsim-orderbook
//!
//! A limit-order-book matching engine with price-time priority, built for
//! backtesting execution algorithms against recorded historical order flow.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: standard FIFO-within-price-level
//!   limit order matching, with unbounded market-order sentinels on both
//!   sides.
//! - **Historical market-impact replay**: a signed, accumulating impact
//!   value tracks participant aggression and its erosion by opposing
//!   historical flow, and nudges inbound historical order prices by a
//!   bounded number of ticks before they reach the book.
//! - **Liquidity-band tick grids**: non-uniform per-instrument tick
//!   schedules, with extrapolation above the top of the table.
//! - **Columnar trade and participant-trade logs**: incremental VWAP
//!   accumulators alongside the raw trade tape.
//!
//! ## Use Cases
//!
//! - **Backtesting execution algorithms** against recorded order flow,
//!   with the book's own reaction to the algorithm's activity folded in.
//! - **Market microstructure research** on price-time priority matching
//!   under simulated impact feedback.
//!
//! ## Status
//!
//! This crate implements the matching/impact/statistics core only; it is
//! not a production exchange engine. See `SPEC_FULL.md` for scope.

pub mod orderbook;
pub mod prelude;
