//! `TickGrid::shift` — move a price by `n` ticks along a liquidity band's
//! grid, extrapolating above the top of the table with the band's coarsest
//! tick (spec.md §4.1).

use super::bands::Band;
use super::error::OrderBookError;
use super::order::Price;

/// A liquidity band's price grid, with the `shift` operation used by both
/// market-impact price adjustment and the top-N grid-walk queries.
#[derive(Debug, Clone, Copy)]
pub struct TickGrid<'a> {
    band: &'a Band,
}

impl<'a> TickGrid<'a> {
    /// Build a grid view over `band`.
    pub fn new(band: &'a Band) -> Self {
        TickGrid { band }
    }

    /// Move `price` by `n` ticks (positive = up, negative = down),
    /// following spec.md §4.1's five-rule resolution order.
    pub fn shift(&self, price: Price, n: i64) -> Result<Price, OrderBookError> {
        let prices = &self.band.prices;
        let max_tick = self.band.max_tick;

        // Rule 1: direct grid lookup.
        if let Some(&idx) = self.band.idxs.get(&price) {
            let target = idx as i64 + n;
            if target >= 0 && (target as usize) < prices.len() {
                return Ok(prices[target as usize]);
            }
        }

        let top = *prices
            .last()
            .expect("a liquidity band always has at least one grid price");

        // Rule 2: extrapolate upward past the top of the grid.
        if n >= 0 && price < top {
            return Ok(extrapolate(price, n, max_tick));
        }

        // Rule 3/4: price is already above the grid, or at its bottom.
        if n < 0 {
            if price > top {
                let n_above = ((price.value() - top.value()) / max_tick).round() as i64;
                if n.abs() > n_above {
                    // `n + n_above` is negative here; it indexes from the
                    // end of the grid the way a negative list index would
                    // (spec.md §4.1 rule 3), counting back from the top.
                    let grid_idx = prices.len() as i64 + n + n_above;
                    if grid_idx >= 0 && (grid_idx as usize) < prices.len() {
                        return Ok(prices[grid_idx as usize]);
                    }
                } else {
                    return Ok(extrapolate(price, n, max_tick));
                }
            } else if price == prices[0] {
                // Rule 4: clamp at the bottom of the grid.
                return Ok(prices[0]);
            }
        }

        Err(OrderBookError::InvalidPrice {
            message: format!(
                "price {price} with shift {n} is not resolvable on band {}",
                self.band.name
            ),
        })
    }
}

fn extrapolate(price: Price, n: i64, max_tick: f64) -> Price {
    Price::new(price.value() + (n as f64) * max_tick)
        .expect("extrapolated price from a finite price and finite tick is never NaN")
}
