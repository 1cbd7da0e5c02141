//! Read-only book projections: best price/volume, top-N grid walks, vwap,
//! and participation-of-volume (spec.md §4.9).
//!
//! The top-N queries walk the instrument's tick grid one tick at a time
//! from the best price, testing each grid price against the half-book's
//! resting levels, rather than iterating the `BTreeMap` directly — this
//! matches the original's price-grid-indexed walk and is what lets a
//! caller ask for "the best 5 *grid* levels" even when intervening ticks
//! are empty.

use super::book::OrderBook;
use super::half_book::HalfBook;
use super::tick_grid::TickGrid;

impl OrderBook {
    /// Best bid price and the total resting volume at it, if any.
    pub fn bbid(&self) -> Option<(f64, u64)> {
        self.bids
            .best_level()
            .map(|level| (level.price.value(), level.volume(&self.arena)))
    }

    /// Best ask price and the total resting volume at it, if any.
    pub fn bask(&self) -> Option<(f64, u64)> {
        self.asks
            .best_level()
            .map(|level| (level.price.value(), level.volume(&self.arena)))
    }

    /// The `n` best bid prices, grid-walked from the top; padded with
    /// `f64::NAN` past the last occupied level.
    pub fn top_bidpx(&self, n: usize) -> Vec<f64> {
        self.top_px(&self.bids, n)
    }

    /// The `n` best ask prices, grid-walked from the top; padded with
    /// `f64::NAN` past the last occupied level.
    pub fn top_askpx(&self, n: usize) -> Vec<f64> {
        self.top_px(&self.asks, n)
    }

    /// The `n` best bid levels: parallel vectors of price and that level's
    /// total resting volume.
    pub fn top_bids(&self, n: usize) -> (Vec<f64>, Vec<u64>) {
        self.top_levels(&self.bids, n)
    }

    /// The `n` best ask levels: parallel vectors of price and that level's
    /// total resting volume.
    pub fn top_asks(&self, n: usize) -> (Vec<f64>, Vec<u64>) {
        self.top_levels(&self.asks, n)
    }

    /// Total resting volume across the `n` best bid levels, and the price
    /// of the `n`th (or the last level reached, if fewer than `n` exist).
    pub fn top_bids_cumvol(&self, n: usize) -> (u64, f64) {
        self.cumvol_to_n(&self.bids, n)
    }

    /// Total resting volume across the `n` best ask levels, and the price
    /// of the `n`th (or the last level reached, if fewer than `n` exist).
    pub fn top_asks_cumvol(&self, n: usize) -> (u64, f64) {
        self.cumvol_to_n(&self.asks, n)
    }

    fn step(half: &HalfBook) -> i64 {
        match half.side {
            super::half_book::Side::Bid => -1,
            super::half_book::Side::Ask => 1,
        }
    }

    fn top_px(&self, half: &HalfBook, n: usize) -> Vec<f64> {
        let mut out = vec![f64::NAN; n];
        let Some(best) = half.best else { return out };
        if n == 0 {
            return out;
        }
        out[0] = best.value();

        let grid = TickGrid::new(self.band);
        let step = Self::step(half);
        let n_px = n.min(half.book.len());
        let mut found = 1;
        let mut cur = best;
        while found < n_px {
            let Ok(next) = grid.shift(cur, step) else { break };
            cur = next;
            if half.book.contains_key(&next) {
                out[found] = next.value();
                found += 1;
            }
        }
        out
    }

    fn top_levels(&self, half: &HalfBook, n: usize) -> (Vec<f64>, Vec<u64>) {
        let mut prices = vec![f64::NAN; n];
        let mut vols = vec![0u64; n];
        let Some(best) = half.best else { return (prices, vols) };
        if n == 0 {
            return (prices, vols);
        }
        prices[0] = best.value();
        vols[0] = half.book[&best].volume(&self.arena);

        let grid = TickGrid::new(self.band);
        let step = Self::step(half);
        let n_px = n.min(half.book.len());
        let mut found = 1;
        let mut cur = best;
        while found < n_px {
            let Ok(next) = grid.shift(cur, step) else { break };
            cur = next;
            if let Some(level) = half.book.get(&next) {
                prices[found] = next.value();
                vols[found] = level.volume(&self.arena);
                found += 1;
            }
        }
        (prices, vols)
    }

    fn cumvol_to_n(&self, half: &HalfBook, n: usize) -> (u64, f64) {
        let Some(best) = half.best else { return (0, f64::NAN) };
        if n == 0 {
            return (0, f64::NAN);
        }
        let mut total = half.book[&best].volume(&self.arena);
        let mut last_px = best.value();

        let grid = TickGrid::new(self.band);
        let step = Self::step(half);
        let n_px = n.min(half.book.len());
        let mut found = 1;
        let mut cur = best;
        while found < n_px {
            let Ok(next) = grid.shift(cur, step) else { break };
            cur = next;
            if let Some(level) = half.book.get(&next) {
                total += level.volume(&self.arena);
                last_px = next.value();
                found += 1;
            }
        }
        (total, last_px)
    }

    /// Volume-weighted average price across all recorded trades.
    pub fn vwap(&self) -> f64 {
        self.trade_log.vwap()
    }

    /// Volume-weighted average price across the participant's own trades.
    pub fn my_vwap(&self) -> f64 {
        self.trade_log.my_vwap()
    }

    /// The participant's share of total traded volume (`my_cumvol /
    /// cumvol`); `0.0` before any trade has occurred, matching the
    /// original's guard against a zero-volume division (spec.md §9 Open
    /// Question: the guard is preserved here, not silently dropped).
    pub fn my_pov(&self) -> f64 {
        if self.cumvol == 0 {
            0.0
        } else {
            self.my_cumvol as f64 / self.cumvol as f64
        }
    }

    /// Last traded price, if any trade has occurred on this book.
    pub fn last_px(&self) -> Option<f64> {
        self.last_px
    }

    /// Current signed market-impact value.
    pub fn market_impact(&self) -> f64 {
        self.market_impact.value()
    }

    /// Total traded volume across all participants.
    pub fn cumvol(&self) -> u64 {
        self.cumvol
    }

    /// Total traded volume in which the participant took part.
    pub fn my_cumvol(&self) -> u64 {
        self.my_cumvol
    }

    /// Total quantity sent by the participant across all live orders still
    /// resting (decremented by cancel/modify/fill).
    pub fn my_cumvol_sent(&self) -> u64 {
        self.my_cumvol_sent
    }

    /// Number of orders the participant has sent.
    pub fn n_my_orders(&self) -> u64 {
        self.n_my_orders
    }

    /// Quantities of every recorded trade, in match order.
    pub fn trades_vol(&self) -> Vec<u64> {
        self.trade_log.trades_vol()
    }

    /// Prices of every recorded trade, in match order.
    pub fn trades_px(&self) -> Vec<f64> {
        self.trade_log.trades_px()
    }

    /// Timestamps of every recorded trade, in match order.
    pub fn trades_time(&self) -> Vec<u64> {
        self.trade_log.trades_time()
    }

    /// Quantities of every recorded participant trade, in match order.
    pub fn my_trades_vol(&self) -> Vec<u64> {
        self.trade_log.my_trades_vol()
    }

    /// Prices of every recorded participant trade, in match order.
    pub fn my_trades_px(&self) -> Vec<f64> {
        self.trade_log.my_trades_px()
    }

    /// Timestamps of every recorded participant trade, in match order.
    pub fn my_trades_time(&self) -> Vec<u64> {
        self.trade_log.my_trades_time()
    }

    /// Number of trades recorded so far.
    pub fn ntrds(&self) -> usize {
        self.trade_log.ntrds()
    }

    /// Number of participant trades recorded so far.
    pub fn my_ntrds(&self) -> usize {
        self.trade_log.my_ntrds()
    }
}
