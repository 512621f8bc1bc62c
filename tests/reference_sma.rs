mod fixtures;

use chart_overlays::Sma;
use fixtures::reference_test;
use std::num::NonZero;

/// SMA is plain arithmetic over a fixed window of two-decimal prices.
const TOLERANCE: f64 = 1e-9;

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

reference_test!(
    sma_30_close_matches_reference,
    Sma::new(nz(30)),
    "tests/fixtures/data/sma-30.csv",
    TOLERANCE
);

reference_test!(
    sma_100_close_matches_reference,
    Sma::new(nz(100)),
    "tests/fixtures/data/sma-100.csv",
    TOLERANCE
);
