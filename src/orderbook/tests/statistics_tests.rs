//! `OrderBook`-level statistics and top-N grid-walk projections.

use crate::orderbook::OrderBook;

fn book() -> OrderBook {
    OrderBook::new("MEGACAP.N", 20, 1.0)
}

#[test]
fn vwap_reflects_all_trades_not_just_the_last() {
    let mut b = book();
    b.send(true, 100, 10.00, 1, false, 0).unwrap();
    b.send(true, 100, 10.10, 2, false, 1).unwrap();

    b.send(false, 50, 10.10, 3, false, 2).unwrap(); // trades at 10.10
    b.send(false, 100, 10.00, 4, false, 3).unwrap(); // trades at 10.10 then 10.00

    // trades: 50@10.10, 50@10.10, 50@10.00 => vwap = (50*10.10*2 + 50*10.00)/150
    let expected = (50.0 * 10.10 * 2.0 + 50.0 * 10.00) / 150.0;
    assert!((b.vwap() - expected).abs() < 1e-9);
}

#[test]
fn top_bidpx_and_top_askpx_grid_walk_from_best() {
    let mut b = book();
    b.send(true, 10, 10.00, 1, false, 0).unwrap();
    b.send(true, 10, 9.98, 2, false, 1).unwrap();
    b.send(false, 10, 10.05, 3, false, 2).unwrap();
    b.send(false, 10, 10.07, 4, false, 3).unwrap();

    let bids = b.top_bidpx(3);
    assert_eq!(bids[0], 10.00);
    assert_eq!(bids[1], 9.98);
    assert!(bids[2].is_nan());

    let asks = b.top_askpx(3);
    assert_eq!(asks[0], 10.05);
    assert_eq!(asks[1], 10.07);
    assert!(asks[2].is_nan());
}

#[test]
fn top_asks_cumvol_stops_at_available_levels() {
    let mut b = book();
    b.send(false, 10, 10.05, 1, false, 0).unwrap();
    b.send(false, 20, 10.06, 2, false, 1).unwrap();

    let (vol, px) = b.top_asks_cumvol(5);
    assert_eq!(vol, 30);
    assert_eq!(px, 10.06);
}

#[test]
fn my_pov_is_zero_before_any_trade() {
    let b = book();
    assert_eq!(b.my_pov(), 0.0);
}

#[test]
fn n_my_orders_and_my_cumvol_sent_track_participant_activity() {
    let mut b = book();
    b.send(true, 100, 10.00, -1, true, 0).unwrap();
    b.send(true, 50, 9.99, -2, true, 1).unwrap();
    assert_eq!(b.n_my_orders(), 2);
    assert_eq!(b.my_cumvol_sent(), 150);

    b.cancel(-2).unwrap();
    assert_eq!(b.my_cumvol_sent(), 100);
}
