// src/test_util.rs

use chrono::{Days, NaiveDate};

use crate::{Bar, PriceSeries, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `64 * f64::EPSILON` (absolute near zero).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        let tolerance = e.abs().max(1.0) * 64.0 * f64::EPSILON;
        assert!(
            (a - e).abs() <= tolerance,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Trading day `n` days after 2023-01-01.
pub fn day(n: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Days::new(u64::from(n))
}

/// Convenience: flat bar with OHLC all equal to `close`.
pub fn bar(close: f64, n: u32) -> Bar {
    Bar::new(day(n), close, close, close, close, 0)
}

/// Series of flat bars on consecutive days.
pub fn series(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .zip(0..)
        .map(|(&close, n)| bar(close, n))
        .collect();
    PriceSeries::new(bars).unwrap()
}
