//! `TradeLog`: append-only columnar trade buffers (spec.md §4.8).
//!
//! The original keeps fixed-capacity NumPy arrays grown by explicit
//! increments (`inc`/`low_inc`) so the hot append path never reallocates
//! per-trade; a `Vec` pre-reserved to the same increment and left to its own
//! amortized-doubling growth gives the same observable behavior (geometric
//! growth keyed off the band's average trade count) without hand-rolling
//! resize-by-`inc` bookkeeping that Rust's allocator already does better.
//! `last_trades`/`my_last_trades` are genuinely ephemeral per the spec —
//! here they are the `Vec`s a single sweep builds locally and hands to
//! [`TradeLog::record_sweep`] in one bulk append, rather than persistent
//! struct fields.

/// One row of the all-trades columnar log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    /// Execution price.
    pub price: f64,
    /// Quantity traded.
    pub vol: u64,
    /// uid of the aggressor (incoming) order.
    pub agg_ord: i64,
    /// uid of the passive (resting) order.
    pub pas_ord: i64,
    /// True iff the aggressor was a buy.
    pub buy_init: bool,
    /// Aggressor's arrival timestamp.
    pub timestamp: u64,
}

/// One row of the participant-only columnar log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MyTrade {
    /// Execution price.
    pub price: f64,
    /// Quantity traded.
    pub vol: u64,
    /// uid of the participant side of the trade.
    pub my_uid: i64,
    /// Aggressor's arrival timestamp.
    pub timestamp: u64,
}

/// The durable trade logs for one order book, plus their incremental vwap
/// accumulators.
#[derive(Debug, Clone)]
pub struct TradeLog {
    trades: Vec<Trade>,
    my_trades: Vec<MyTrade>,
    vol_sum: u64,
    turn_sum: f64,
    my_vol_sum: u64,
    my_turn_sum: f64,
}

impl TradeLog {
    /// A fresh log, pre-reserved per the band's `inc`/`low_inc` baseline.
    pub fn new(inc: usize) -> Self {
        TradeLog {
            trades: Vec::with_capacity(inc),
            my_trades: Vec::with_capacity(inc),
            vol_sum: 0,
            turn_sum: 0.0,
            my_vol_sum: 0,
            my_turn_sum: 0.0,
        }
    }

    /// Drop all recorded trades and zero the vwap accumulators (`reset_ob`).
    pub fn clear(&mut self) {
        self.trades.clear();
        self.my_trades.clear();
        self.vol_sum = 0;
        self.turn_sum = 0.0;
        self.my_vol_sum = 0;
        self.my_turn_sum = 0.0;
    }

    /// Append one sweep's worth of trades in bulk.
    pub fn record_sweep(&mut self, last_trades: &[Trade], my_last_trades: &[MyTrade]) {
        for t in last_trades {
            self.vol_sum += t.vol;
            self.turn_sum += t.price * t.vol as f64;
        }
        self.trades.extend_from_slice(last_trades);

        for t in my_last_trades {
            self.my_vol_sum += t.vol;
            self.my_turn_sum += t.price * t.vol as f64;
        }
        self.my_trades.extend_from_slice(my_last_trades);
    }

    /// Number of trades recorded (`ntrds`).
    pub fn ntrds(&self) -> usize {
        self.trades.len()
    }

    /// Number of participant trades recorded (`my_ntrds`).
    pub fn my_ntrds(&self) -> usize {
        self.my_trades.len()
    }

    /// All recorded trades, in match order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// All recorded participant trades, in match order.
    pub fn my_trades(&self) -> &[MyTrade] {
        &self.my_trades
    }

    /// Volume-weighted average price across all trades; NaN if empty.
    pub fn vwap(&self) -> f64 {
        if self.vol_sum == 0 {
            f64::NAN
        } else {
            self.turn_sum / self.vol_sum as f64
        }
    }

    /// Volume-weighted average price across participant trades; NaN if
    /// empty.
    pub fn my_vwap(&self) -> f64 {
        if self.my_vol_sum == 0 {
            f64::NAN
        } else {
            self.my_turn_sum / self.my_vol_sum as f64
        }
    }

    /// `trades_vol`: quantities of all recorded trades.
    pub fn trades_vol(&self) -> Vec<u64> {
        self.trades.iter().map(|t| t.vol).collect()
    }

    /// `trades_px`: prices of all recorded trades.
    pub fn trades_px(&self) -> Vec<f64> {
        self.trades.iter().map(|t| t.price).collect()
    }

    /// `trades_time`: timestamps of all recorded trades.
    pub fn trades_time(&self) -> Vec<u64> {
        self.trades.iter().map(|t| t.timestamp).collect()
    }

    /// `my_trades_vol`: quantities of all recorded participant trades.
    pub fn my_trades_vol(&self) -> Vec<u64> {
        self.my_trades.iter().map(|t| t.vol).collect()
    }

    /// `my_trades_px`: prices of all recorded participant trades.
    pub fn my_trades_px(&self) -> Vec<f64> {
        self.my_trades.iter().map(|t| t.price).collect()
    }

    /// `my_trades_time`: timestamps of all recorded participant trades.
    pub fn my_trades_time(&self) -> Vec<u64> {
        self.my_trades.iter().map(|t| t.timestamp).collect()
    }
}

/// `inc`: ~10% of the band's average trade count, floored at 10 (spec.md
/// §4.8).
pub fn inc_for_avg_trades(avg_trades: u64) -> usize {
    ((avg_trades as f64 * 0.1) as u64).max(10) as usize
}

/// `low_inc`: the fixed ephemeral-staging increment.
pub const LOW_INC: usize = 10;
