use std::fmt::{Debug, Display};

use crate::Ohlcv;

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute), one bar per trading day. Output is `None`
/// until enough history has been received. The chart engine traces an
/// indicator over a whole [`PriceSeries`](crate::PriceSeries) to build an
/// aligned column; the same types can be driven bar by bar directly.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, Indicator, Sma};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut sma = Sma::new(NonZero::new(3).unwrap());
///
/// assert_eq!(Indicator::compute(&mut sma, &bar(10.0, 2)), None);
/// assert_eq!(Indicator::compute(&mut sma, &bar(20.0, 3)), None);
/// assert_eq!(Indicator::compute(&mut sma, &bar(30.0, 4)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Feeds the next bar and returns the updated indicator value,
    /// or `None` if history is still insufficient.
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
