//! Crate-level integration tests: the concrete scenarios and invariants
//! this order book is built to satisfy.

use marketsim_orderbook::orderbook::OrderBook;

fn book() -> OrderBook {
    // MEGACAP.N resolves to band6, whose grid includes 10.00, 10.01, 10.02, ...
    OrderBook::new("MEGACAP.N", 20, 1.0)
}

#[test]
fn scenario_1_passive_rest() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();

    assert_eq!(b.bbid(), Some((10.00, 100)));
    assert_eq!(b.bask(), None);
    assert_eq!(b.cumvol(), 0);
}

#[test]
fn scenario_2_full_cross() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.send(false, 40, 10.00, 2, false, 1).unwrap();

    assert_eq!(b.trades_px(), vec![10.00]);
    assert_eq!(b.trades_vol(), vec![40]);
    assert_eq!(b.bbid(), Some((10.00, 60)));
    assert_eq!(b.cumvol(), 40);
    assert_eq!(b.ntrds(), 1);
}

#[test]
fn scenario_3_participant_aggressor_impact() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.send(false, 50, 10.00, -1, true, 1).unwrap();

    assert_eq!(b.my_cumvol(), 50);
    assert!((b.market_impact() - (-0.5)).abs() < 1e-9);
    // |impact| < 1: the next historical order would arrive unshifted.
    assert!(b.market_impact().abs() < 1.0);
}

#[test]
fn scenario_4_impact_threshold_crossed() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.send(false, 50, 10.00, -1, true, 1).unwrap();
    // uid 1 now has 50 leavesqty resting at 10.00.
    assert_eq!(b.get(1).unwrap().leavesqty, 50);

    b.send(false, 60, 10.00, -2, true, 2).unwrap();
    // The second participant sell fully consumes uid 1's remaining 50 (the
    // level empties) and rests the unmatched remainder on the ask side.
    assert!(!b.get(1).unwrap().active);
    assert_eq!(b.bask(), Some((10.00, 10)));
    assert!((b.market_impact() - (-1.5)).abs() < 1e-9);

    // A historical buy at 10.02 arrives pre-adjusted by
    // floor(resilience * -1.5) = -1 tick, landing on 10.01.
    b.send(true, 10, 10.02, 3, false, 3).unwrap();
    assert_eq!(b.get(3).unwrap().price, 10.01);
}

#[test]
fn scenario_5_fifo() {
    let mut b = book();
    b.send(true, 10, 10.00, 3, false, 0).unwrap();
    b.send(true, 10, 10.00, 4, false, 1).unwrap();
    b.send(false, 10, 10.00, 5, false, 2).unwrap();

    let trade = b.trades_px();
    assert_eq!(trade.len(), 1);
    // uid 3 was first in the queue and must be the passive counterparty.
    assert!(!b.get(3).unwrap().active);
    assert!(b.get(4).unwrap().active);
    assert_eq!(b.get(4).unwrap().leavesqty, 10);
}

#[test]
fn scenario_6_modify_downsize_preserves_priority() {
    let mut b = book();
    b.send(true, 10, 10.00, 3, false, 0).unwrap();
    b.send(true, 10, 10.00, 4, false, 1).unwrap();
    b.modify(3, 5); // uid 3 shrinks to 5, keeps its place at the head

    b.send(false, 10, 10.00, 5, false, 2).unwrap();

    assert!(!b.get(3).unwrap().active);
    assert_eq!(b.get(4).unwrap().leavesqty, 5);
}

#[test]
fn invariant_book_never_crosses_at_rest() {
    let mut b = book();
    b.send(true, 10, 10.00, 1, false, 0).unwrap();
    b.send(false, 10, 10.05, 2, false, 1).unwrap();

    if let (Some((bid, _)), Some((ask, _))) = (b.bbid(), b.bask()) {
        assert!(bid < ask);
    }
}

#[test]
fn invariant_cumvol_and_cumturn_match_trade_log_sums() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.send(false, 30, 10.00, 2, false, 1).unwrap();
    b.send(false, 20, 10.00, 3, false, 2).unwrap();

    let vols = b.trades_vol();
    let pxs = b.trades_px();
    let expected_vol: u64 = vols.iter().sum();
    let expected_turn: f64 = vols.iter().zip(pxs.iter()).map(|(&v, &p)| v as f64 * p).sum();

    assert_eq!(b.cumvol(), expected_vol);
    assert!((b.vwap() * b.cumvol() as f64 - expected_turn).abs() < 1e-6);
}

#[test]
fn invariant_my_cumvol_never_exceeds_my_cumvol_sent() {
    let mut b = book();
    b.send(true, 100, 10.00, -1, true, 0).unwrap();
    b.send(false, 40, 10.00, 1, false, 1).unwrap();

    assert!(b.my_cumvol() <= b.my_cumvol_sent());
}

#[test]
fn invariant_cancel_zeroes_leavesqty_and_deactivates() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.cancel(1).unwrap();

    let status = b.get(1).unwrap();
    assert!(!status.active);
    assert_eq!(status.leavesqty, 0);
}

#[test]
fn round_trip_send_then_cancel_restores_book_state() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    let bbid_before = b.bbid();

    b.send(true, 50, 9.95, 2, false, 1).unwrap();
    b.cancel(2).unwrap();

    assert_eq!(b.bbid(), bbid_before);
    assert_eq!(b.bask(), None);
}

#[test]
fn price_time_fifo_across_two_orders_at_the_same_price() {
    let mut b = book();
    b.send(true, 30, 10.00, 1, false, 0).unwrap();
    b.send(true, 30, 10.00, 2, false, 1).unwrap();

    b.send(false, 30, 10.00, 3, false, 2).unwrap();
    assert!(!b.get(1).unwrap().active);
    assert_eq!(b.get(2).unwrap().leavesqty, 30);
}
