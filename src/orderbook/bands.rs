//! The statically-loaded liquidity-band configuration.
//!
//! Real tick-size regimes assign each listed instrument to a liquidity band,
//! and each band carries a non-uniform tick schedule: fine ticks near zero,
//! coarsening as price rises (see e.g. the ESMA/MiFID II tick-size regime).
//! Loading *that* table from a config file is the excluded external
//! collaborator (spec.md §1); this module is the small, in-crate stand-in
//! `TickGrid` and `TradeLog` are built from, mirroring the original's
//! module-level `TICKER_BANDS` / `AVG_TRANSACTS` / `get_band_dicts`.

use super::order::Price;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A tick-schedule segment: from `floor` (inclusive) up to the next
/// segment's floor (exclusive), prices step by `tick`.
#[derive(Debug, Clone, Copy)]
struct TickSegment {
    floor: f64,
    tick: f64,
}

/// One liquidity band's tick grid plus its average-trade-count baseline
/// (used to size [`TradeLog`](super::trade_log::TradeLog) buffers).
#[derive(Debug, Clone)]
pub struct Band {
    /// Band identifier, e.g. `"band6"`.
    pub name: &'static str,
    /// Valid prices on this band's grid, sorted ascending.
    pub prices: Vec<Price>,
    /// Reverse mapping from price to its index in `prices`.
    pub idxs: HashMap<Price, usize>,
    /// The coarsest tick in the schedule, used to extrapolate above the top
    /// of `prices`.
    pub max_tick: f64,
    /// Average number of trades per session for this band; seeds
    /// `TradeLog`'s initial buffer capacity.
    pub avg_trades: u64,
}

fn round_to_tick(value: f64, tick: f64) -> f64 {
    let steps = (value / tick).round();
    let snapped = steps * tick;
    (snapped * 1e8).round() / 1e8
}

fn build_band(name: &'static str, schedule: &[TickSegment], upper_bound: f64, avg_trades: u64) -> Band {
    let mut prices = Vec::new();
    for (i, seg) in schedule.iter().enumerate() {
        let next_floor = schedule.get(i + 1).map(|s| s.floor).unwrap_or(upper_bound);
        let mut p = seg.floor;
        while p < next_floor - seg.tick / 2.0 {
            prices.push(round_to_tick(p, seg.tick));
            p += seg.tick;
        }
    }
    let max_tick = schedule.last().map(|s| s.tick).unwrap_or(1.0);
    prices.dedup();
    let prices: Vec<Price> = prices
        .into_iter()
        .map(|p| Price::new(p).expect("band schedule is NaN-free by construction"))
        .collect();
    let idxs = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (p, i))
        .collect();
    Band {
        name,
        prices,
        idxs,
        max_tick,
        avg_trades,
    }
}

/// The band used for tickers not present in [`TICKER_BANDS`]: the most
/// liquid schedule, with a warning logged at lookup time (spec.md §4.1).
pub const DEFAULT_BAND: &str = "band6";

fn band_table() -> &'static HashMap<&'static str, Band> {
    static TABLE: OnceLock<HashMap<&'static str, Band>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();

        // Coarsest schedule: wide ticks even at low prices, for thin names.
        table.insert(
            "band1",
            build_band(
                "band1",
                &[
                    TickSegment { floor: 0.05, tick: 0.05 },
                    TickSegment { floor: 5.00, tick: 0.5 },
                    TickSegment { floor: 50.00, tick: 5.0 },
                ],
                500.0,
                200,
            ),
        );
        table.insert(
            "band2",
            build_band(
                "band2",
                &[
                    TickSegment { floor: 0.02, tick: 0.02 },
                    TickSegment { floor: 5.00, tick: 0.2 },
                    TickSegment { floor: 50.00, tick: 2.0 },
                ],
                500.0,
                500,
            ),
        );
        table.insert(
            "band3",
            build_band(
                "band3",
                &[
                    TickSegment { floor: 0.01, tick: 0.01 },
                    TickSegment { floor: 5.00, tick: 0.1 },
                    TickSegment { floor: 50.00, tick: 1.0 },
                ],
                500.0,
                1_500,
            ),
        );
        table.insert(
            "band4",
            build_band(
                "band4",
                &[
                    TickSegment { floor: 0.01, tick: 0.01 },
                    TickSegment { floor: 10.00, tick: 0.05 },
                    TickSegment { floor: 100.00, tick: 0.5 },
                ],
                500.0,
                4_000,
            ),
        );
        table.insert(
            "band5",
            build_band(
                "band5",
                &[
                    TickSegment { floor: 0.01, tick: 0.01 },
                    TickSegment { floor: 50.00, tick: 0.02 },
                ],
                500.0,
                8_000,
            ),
        );
        // Finest, deepest schedule: the default for unknown tickers.
        table.insert(
            "band6",
            build_band(
                "band6",
                &[TickSegment { floor: 0.01, tick: 0.01 }],
                500.0,
                20_000,
            ),
        );

        table
    })
}

/// Static ticker -> band assignment. Mirrors `TICKER_BANDS` in the
/// original; a handful of illustrative entries, not a production listing.
fn ticker_bands() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("THIN.MI", "band1"),
            ("SMALLCAP.PA", "band2"),
            ("MIDCAP.AS", "band3"),
            ("LARGECAP.DE", "band4"),
            ("BLUECHIP.L", "band5"),
            ("MEGACAP.N", "band6"),
        ])
    })
}

/// Resolve `ticker` to its liquidity band, defaulting to [`DEFAULT_BAND`]
/// (with a warning) when the ticker is not in the static table.
pub fn band_for(ticker: &str) -> &'static Band {
    let band_name = ticker_bands().get(ticker).copied().unwrap_or_else(|| {
        tracing::warn!(
            ticker,
            default_band = DEFAULT_BAND,
            "ticker not found in liquidity bands configuration; defaulting to most liquid band"
        );
        DEFAULT_BAND
    });
    band_table()
        .get(band_name)
        .expect("every name in ticker_bands/DEFAULT_BAND must have a build_band entry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ticker_resolves_to_its_band() {
        let band = band_for("THIN.MI");
        assert_eq!(band.name, "band1");
    }

    #[test]
    fn unknown_ticker_falls_back_to_default() {
        let band = band_for("NOT-A-REAL-TICKER");
        assert_eq!(band.name, DEFAULT_BAND);
    }

    #[test]
    fn band6_contains_the_scenario_grid() {
        let band = band_for("MEGACAP.N");
        for px in ["10.00", "10.01", "10.02"] {
            let p = Price::new(px.parse().unwrap()).unwrap();
            assert!(band.idxs.contains_key(&p), "missing {px} in band6 grid");
        }
    }

    #[test]
    fn prices_are_sorted_ascending() {
        let band = band_for("MEGACAP.N");
        for w in band.prices.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}
