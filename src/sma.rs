use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Ohlcv, Price, price_window::PriceWindow};

/// Simple Moving Average (SMA) of closing prices.
///
/// Computes the unweighted mean of the last *n* closes, where *n* is the
/// window length. Returns `None` until the window is full, so the first
/// `n − 1` bars carry no value.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use chart_overlays::{Bar, Sma};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut sma = Sma::new(NonZero::new(3).unwrap());
///
/// assert_eq!(sma.compute(&bar(10.0, 2)), None);
/// assert_eq!(sma.compute(&bar(20.0, 3)), None);
/// assert_eq!(sma.compute(&bar(30.0, 4)), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    length: usize,
    window: PriceWindow,
    current: Option<Price>,
}

impl Sma {
    /// SMA over the last `length` closes.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            window: PriceWindow::new(length),
            current: None,
        }
    }

    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Sma {
    type Output = Price;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        self.window.add(bar.close());

        self.current = self.window.mean();

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.length)
    }
}
