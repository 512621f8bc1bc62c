#![allow(dead_code)]

use chart_overlays::{CsvFeed, PriceFeed, PriceSeries};
use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};

/// Directory holding the daily price file and reference values.
pub const DATA_DIR: &str = "tests/fixtures/data";

/// Ticker of the fixture price file (`daily.csv`).
pub const TICKER: &str = "daily";

/// Reference value for a single-output indicator.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub date: NaiveDate,
    pub expected: f64,
}

/// Reference MACD and signal line.
#[derive(Debug, Deserialize)]
pub struct RefMacd {
    pub date: NaiveDate,
    pub macd: f64,
    pub signal: f64,
}

/// Reference Bollinger envelope.
#[derive(Debug, Deserialize)]
pub struct RefBb {
    pub date: NaiveDate,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Feed reading the fixture directory.
pub fn feed() -> CsvFeed {
    CsvFeed::new(DATA_DIR)
}

/// All 160 fixture bars, 2023-01-03 through 2023-08-14.
pub fn load_series() -> PriceSeries {
    feed()
        .fetch(TICKER, date(2023, 1, 1), date(2024, 1, 1))
        .expect("fixture series")
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

pub fn load_macd_ref(path: &str) -> Vec<RefMacd> {
    load_records(path, "invalid MACD reference record")
}

pub fn load_bb_ref(path: &str) -> Vec<RefBb> {
    load_records(path, "invalid BB reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Generate a reference match test for a single-value indicator.
///
/// The indicator must be `None` on every bar before the first reference
/// date and match the reference on every bar from then on.
///
/// Usage: `reference_test!(sma_30, Sma::new(nz(30)), "tests/fixtures/data/sma-30.csv", 1e-9);`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:expr, $ref_path:expr, $tolerance:expr) => {
        #[test]
        fn $name() {
            let series = fixtures::load_series();
            let reference = fixtures::load_ref_values($ref_path);
            let mut ind = $ind;

            let mut ref_idx = 0;
            for bar in series.bars() {
                let value = ind.compute(bar);

                if ref_idx < reference.len() && bar.timestamp == reference[ref_idx].date {
                    let value = value.unwrap_or_else(|| {
                        panic!("{} returned None at {}", stringify!($name), bar.timestamp)
                    });
                    fixtures::assert_near(
                        value,
                        reference[ref_idx].expected,
                        $tolerance,
                        &format!("{} at {}", stringify!($name), bar.timestamp),
                    );
                    ref_idx += 1;
                } else {
                    assert_eq!(
                        value,
                        None,
                        "{} defined before reference at {}",
                        stringify!($name),
                        bar.timestamp
                    );
                }
            }

            assert_eq!(
                ref_idx,
                reference.len(),
                "not all reference values checked: {ref_idx}/{}",
                reference.len()
            );
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
