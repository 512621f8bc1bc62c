use chrono::NaiveDate;

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Trading day a bar belongs to.
pub type Timestamp = NaiveDate;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own candle type to feed indicators directly or to
/// build a [`PriceSeries`](crate::PriceSeries) with
/// [`from_ohlcv`](crate::PriceSeries::from_ohlcv) without an intermediate
/// conversion.
///
/// # Example
///
/// ```
/// use chart_overlays::{Ohlcv, Price, Timestamp};
///
/// struct MyCandle {
///     o: f64, h: f64, l: f64, c: f64,
///     day: Timestamp,
/// }
///
/// impl Ohlcv for MyCandle {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn timestamp(&self) -> Timestamp { self.day }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Trading day of the bar.
    fn timestamp(&self) -> Timestamp;

    /// Shares traded during the bar. Defaults to `0`.
    ///
    /// None of the overlays read volume; it is carried for the
    /// rendering layer and for round-tripping fetched data.
    fn volume(&self) -> u64 {
        0
    }
}
