//! The `OrderBook` orchestrator: owns both half-books, the order index,
//! the trade logs, and the market-impact state; implements `send`,
//! `cancel`, `modify`, aggression detection, sweeping, and impact updates
//! (spec.md §4.3-§4.7).

use super::bands::{self, Band};
use super::error::OrderBookError;
use super::half_book::{HalfBook, Side};
use super::impact::{MarketImpact, SweepImpactInputs};
use super::order::{Order, OrderIdx, OrderStatus, Price};
use super::tick_grid::TickGrid;
use super::trade_log::{self, MyTrade, Trade, TradeLog};
use std::collections::HashMap;
use tracing::trace;

/// A limit-order-book matching engine for one instrument, with price-time
/// priority and a historical market-impact replay model.
///
/// `OrderBook` is single-threaded and cooperative (spec.md §5): it carries
/// no internal synchronization, and every method that mutates state runs
/// to completion before returning.
#[derive(Debug)]
pub struct OrderBook {
    pub(crate) ticker: String,
    pub(crate) band: &'static Band,
    pub(crate) max_impact: i64,
    pub(crate) resilience: f64,

    pub(crate) bids: HalfBook,
    pub(crate) asks: HalfBook,

    pub(crate) arena: Vec<Order>,
    pub(crate) orders: HashMap<i64, OrderIdx>,

    pub(crate) n_my_orders: u64,
    pub(crate) cumvol: u64,
    pub(crate) my_cumvol: u64,
    pub(crate) cumturn: f64,
    pub(crate) my_cumturn: f64,
    pub(crate) my_cumvol_sent: u64,
    pub(crate) last_px: Option<f64>,

    pub(crate) market_impact: MarketImpact,
    pub(crate) trade_log: TradeLog,
}

impl OrderBook {
    /// Construct a book for `ticker`, resolving its liquidity band from the
    /// static table (spec.md §6). `max_impact` bounds the tick shift
    /// applied to historical order prices; `resilience` scales it.
    pub fn new(ticker: &str, max_impact: i64, resilience: f64) -> Self {
        let band = bands::band_for(ticker);
        OrderBook {
            ticker: ticker.to_string(),
            band,
            max_impact,
            resilience,
            bids: HalfBook::new(Side::Bid),
            asks: HalfBook::new(Side::Ask),
            arena: Vec::new(),
            orders: HashMap::new(),
            n_my_orders: 0,
            cumvol: 0,
            my_cumvol: 0,
            cumturn: 0.0,
            my_cumturn: 0.0,
            my_cumvol_sent: 0,
            last_px: None,
            market_impact: MarketImpact::new(),
            trade_log: TradeLog::new(trade_log::inc_for_avg_trades(band.avg_trades)),
        }
    }

    /// The instrument this book was constructed for.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Reset counters (and, if `reset_all`, the book and order index
    /// entirely), per spec.md §6. The trade log's cursors (`ntrds`,
    /// `my_ntrds`) are zeroed unconditionally, regardless of `reset_all`.
    pub fn reset_ob(&mut self, reset_all: bool) {
        if reset_all {
            self.bids = HalfBook::new(Side::Bid);
            self.asks = HalfBook::new(Side::Ask);
            self.arena.clear();
            self.orders.clear();
        }
        self.trade_log.clear();
        self.n_my_orders = 0;
        self.cumvol = 0;
        self.my_cumvol = 0;
        self.cumturn = 0.0;
        self.my_cumturn = 0.0;
        self.market_impact.reset();
    }

    /// Submit a new order. See spec.md §4.3 for the full step sequence.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidPrice`] for a NaN price,
    /// [`OrderBookError::InvalidQuantity`] for a non-positive `qty`,
    /// [`OrderBookError::InvalidSide`] when `uid`'s sign disagrees with
    /// `is_mine`, or [`OrderBookError::DuplicateUid`] when `uid` has
    /// already been used on this book. All validation happens before any
    /// mutation, so a rejected `send` never leaves a half-inserted order.
    pub fn send(
        &mut self,
        is_buy: bool,
        qty: u64,
        price: f64,
        uid: i64,
        is_mine: bool,
        timestamp: u64,
    ) -> Result<(), OrderBookError> {
        if price.is_nan() {
            return Err(OrderBookError::InvalidPrice {
                message: "price cannot be NaN; use +/- infinity for unbounded market orders"
                    .to_string(),
            });
        }
        if qty == 0 {
            return Err(OrderBookError::InvalidQuantity { qty });
        }
        if (uid < 0) != is_mine {
            return Err(OrderBookError::InvalidSide { uid, is_mine });
        }
        if self.orders.contains_key(&uid) {
            return Err(OrderBookError::DuplicateUid { uid });
        }

        let mut order_price =
            Price::new(price).expect("NaN already rejected above, so Price::new cannot fail");

        if is_mine {
            self.n_my_orders += 1;
            self.my_cumvol_sent += qty;
        } else {
            order_price = self.affect_price_with_market_impact(order_price);
        }

        trace!(uid, is_buy, qty, price = order_price.value(), is_mine, "send");

        let idx = OrderIdx(self.arena.len());
        self.arena.push(Order::new(uid, is_buy, qty, order_price, timestamp));
        self.orders.insert(uid, idx);

        loop {
            if self.arena[idx.0].leavesqty == 0 {
                break;
            }
            if self.is_aggressive(idx) {
                self.sweep_best_price(idx);
            } else {
                let price = self.arena[idx.0].price;
                if is_buy {
                    self.bids.add(idx, price, self.arena.as_mut_slice());
                } else {
                    self.asks.add(idx, price, self.arena.as_mut_slice());
                }
                break;
            }
        }

        Ok(())
    }

    /// Cancel a resting order. A no-op (not an error) if the order exists
    /// but is already inactive; errors for a uid never seen by `send`.
    pub fn cancel(&mut self, uid: i64) -> Result<(), OrderBookError> {
        let idx = *self
            .orders
            .get(&uid)
            .ok_or(OrderBookError::UnknownUid { uid })?;

        if uid < 0 {
            self.my_cumvol_sent = self.my_cumvol_sent.saturating_sub(self.arena[idx.0].leavesqty);
        }

        if self.arena[idx.0].active {
            let price = self.arena[idx.0].price;
            let is_buy = self.arena[idx.0].is_buy;
            let half = if is_buy { &mut self.bids } else { &mut self.asks };
            let level = half
                .book
                .get_mut(&price)
                .expect("an active order's price must have a live level");
            level.remove(idx, self.arena.as_mut_slice());
            if level.is_empty() {
                half.remove_price(price);
            }

            let cumqty = self.arena[idx.0].qty - self.arena[idx.0].leavesqty;
            self.arena[idx.0].frozen_cumqty = Some(cumqty);
            self.arena[idx.0].leavesqty = 0;
            self.arena[idx.0].active = false;
            trace!(uid, "cancel");
        }

        Ok(())
    }

    /// Downsize a resting order by `qty_down` (clamped to its current
    /// `leavesqty`). Silently does nothing for an unknown uid (spec.md
    /// §4.5/§7). Cancels the order via [`Self::cancel`] if it reaches zero.
    pub fn modify(&mut self, uid: i64, qty_down: u64) {
        let idx = match self.orders.get(&uid) {
            Some(&idx) => idx,
            None => return,
        };

        let clamped = qty_down.min(self.arena[idx.0].leavesqty);
        self.arena[idx.0].leavesqty -= clamped;
        self.arena[idx.0].qty -= clamped;
        if uid < 0 {
            self.my_cumvol_sent = self.my_cumvol_sent.saturating_sub(clamped);
        }

        if self.arena[idx.0].leavesqty == 0 {
            let _ = self.cancel(uid);
        }
    }

    /// Current status of the order identified by `uid`.
    ///
    /// # Errors
    /// Returns [`OrderBookError::UnknownUid`] if `uid` was never passed to
    /// `send`.
    pub fn get(&self, uid: i64) -> Result<OrderStatus, OrderBookError> {
        let idx = self
            .orders
            .get(&uid)
            .ok_or(OrderBookError::UnknownUid { uid })?;
        Ok(OrderStatus::from(&self.arena[idx.0]))
    }

    /// Move `price` by `n_moves` ticks on this instrument's grid
    /// (`TickGrid::shift`, spec.md §4.1).
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidPrice`] if `price` is NaN or the
    /// shift cannot be resolved under the grid's extrapolation rules.
    pub fn get_new_price(&self, price: f64, n_moves: i64) -> Result<f64, OrderBookError> {
        let p = Price::new(price).ok_or_else(|| OrderBookError::InvalidPrice {
            message: "price cannot be NaN".to_string(),
        })?;
        TickGrid::new(self.band).shift(p, n_moves).map(Price::value)
    }

    fn affect_price_with_market_impact(&self, price: Price) -> Price {
        let Some(n) = self.market_impact.tick_shift(self.resilience, self.max_impact) else {
            return price;
        };
        TickGrid::new(self.band).shift(price, n).unwrap_or(price)
    }

    fn is_aggressive(&self, idx: OrderIdx) -> bool {
        let order = &self.arena[idx.0];
        if order.is_buy {
            self.asks.best.is_some_and(|best| best <= order.price)
        } else {
            self.bids.best.is_some_and(|best| best >= order.price)
        }
    }

    /// Consume one pass of the opposite side's best level against the
    /// order at `idx` (spec.md §4.6). Re-entered by `send`'s outer loop if
    /// the incoming order remains aggressive after the level empties.
    fn sweep_best_price(&mut self, idx: OrderIdx) {
        let is_buy = self.arena[idx.0].is_buy;
        let agg_effect_side: i8 = if is_buy { 1 } else { -1 };
        let best_price = if is_buy { self.asks.best } else { self.bids.best }
            .expect("sweep_best_price is only called when send() has confirmed aggression");

        let mut my_agg_vol = 0u64;
        let mut ob_agg_vol = 0u64;
        let mut last_trades: Vec<Trade> = Vec::new();
        let mut my_last_trades: Vec<MyTrade> = Vec::new();
        let mut level_emptied = false;
        let init_best_vol;

        {
            let opposite = if is_buy { &mut self.asks } else { &mut self.bids };
            let arena = &mut self.arena;
            let level = opposite
                .book
                .get_mut(&best_price)
                .expect("best price must have a live level while aggressive");

            init_best_vol = arena[level
                .head
                .expect("a non-empty level always has a head")
                .0]
                .leavesqty;

            loop {
                if arena[idx.0].leavesqty == 0 {
                    break;
                }
                let Some(head_idx) = level.head else { break };

                let trdqty = arena[head_idx.0].leavesqty.min(arena[idx.0].leavesqty);
                arena[head_idx.0].leavesqty -= trdqty;
                arena[idx.0].leavesqty -= trdqty;

                let head_uid = arena[head_idx.0].uid;
                let agg_uid = arena[idx.0].uid;
                let timestamp = arena[idx.0].timestamp;
                let price = best_price.value();

                if head_uid < 0 {
                    // Passive participant, including a participant self-cross:
                    // neither counter moves.
                } else if agg_uid < 0 {
                    my_agg_vol += trdqty;
                } else {
                    ob_agg_vol += trdqty;
                }

                last_trades.push(Trade {
                    price,
                    vol: trdqty,
                    agg_ord: agg_uid,
                    pas_ord: head_uid,
                    buy_init: is_buy,
                    timestamp,
                });
                if head_uid < 0 || agg_uid < 0 {
                    let my_uid = if agg_uid < 0 { agg_uid } else { head_uid };
                    my_last_trades.push(MyTrade {
                        price,
                        vol: trdqty,
                        my_uid,
                        timestamp,
                    });
                }

                if arena[head_idx.0].leavesqty == 0 {
                    level.pop_head(arena.as_mut_slice());
                    if level.is_empty() {
                        level_emptied = true;
                        break;
                    }
                }
            }
        }

        if level_emptied {
            let opposite = if is_buy { &mut self.asks } else { &mut self.bids };
            opposite.remove_price(best_price);
        }

        let vol_total: u64 = last_trades.iter().map(|t| t.vol).sum();
        let turn_total: f64 = last_trades.iter().map(|t| t.price * t.vol as f64).sum();
        let my_vol_total: u64 = my_last_trades.iter().map(|t| t.vol).sum();
        let my_turn_total: f64 = my_last_trades.iter().map(|t| t.price * t.vol as f64).sum();

        self.cumvol += vol_total;
        self.cumturn += turn_total;
        self.my_cumvol += my_vol_total;
        self.my_cumturn += my_turn_total;

        self.market_impact.apply_sweep(SweepImpactInputs {
            my_agg_vol,
            ob_agg_vol,
            init_best_vol,
            agg_effect_side,
            my_cumvol_after: self.my_cumvol,
            cumvol_after: self.cumvol,
        });

        self.trade_log.record_sweep(&last_trades, &my_last_trades);
        self.last_px = Some(best_price.value());
    }
}
