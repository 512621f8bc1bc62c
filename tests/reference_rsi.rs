mod fixtures;

use chart_overlays::Rsi;
use fixtures::reference_test;
use std::num::NonZero;

/// RSI is a ratio of running sums over 14 changes.
const TOLERANCE: f64 = 1e-9;

reference_test!(
    rsi_14_close_matches_reference,
    Rsi::new(NonZero::new(14).unwrap()),
    "tests/fixtures/data/rsi-14.csv",
    TOLERANCE
);

#[test]
fn rsi_14_stays_in_range() {
    let series = fixtures::load_series();
    let mut rsi = Rsi::new(NonZero::new(14).unwrap());

    for bar in series.bars() {
        if let Some(value) = rsi.compute(bar) {
            assert!((0.0..=100.0).contains(&value), "RSI {value} at {}", bar.timestamp);
        }
    }
}
