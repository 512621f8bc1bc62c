use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Ohlcv, Price};

/// Exponential Moving Average (EMA) of closing prices.
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (span + 1)`. Each value is computed as:
///
/// ```text
/// EMA₀ = price₀
/// EMA  = α × price + (1 − α) × prev_EMA
/// ```
///
/// The first value seeds the average directly, with no bias
/// adjustment, so the EMA is defined from the very first bar.
/// Early values lean heavily on the seed and should be read as
/// low-confidence until roughly `span` bars have been seen.
///
/// [`update`](Ema::update) smooths arbitrary values rather than
/// bar closes; [`Macd`](crate::Macd) uses it for its signal line.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, Ema};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut ema = Ema::new(NonZero::new(3).unwrap());
///
/// // Seeded from the first close
/// assert_eq!(ema.compute(&bar(2.0, 2)), Some(2.0));
///
/// // EMA(3) α = 0.5: 4 × 0.5 + 2 × 0.5 = 3.0
/// assert_eq!(ema.compute(&bar(4.0, 3)), Some(3.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    span: usize,
    alpha: f64,
    current: Option<Price>,
}

impl Ema {
    /// EMA with smoothing span `span`.
    #[must_use]
    pub fn new(span: NonZero<usize>) -> Self {
        Self {
            span: span.get(),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (span.get() + 1) as f64,
            current: None,
        }
    }

    /// Smoothing span.
    #[inline]
    #[must_use]
    pub fn span(&self) -> usize {
        self.span
    }

    /// Smoothing factor `α = 2 / (span + 1)`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Feeds a raw value and returns the updated average.
    #[inline]
    pub fn update(&mut self, price: Price) -> Price {
        let next = match self.current {
            Some(previous) => self.alpha.mul_add(price - previous, previous),
            None => price,
        };

        self.current = Some(next);

        next
    }
}

impl Indicator for Ema {
    type Output = Price;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        Some(self.update(bar.close()))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.span)
    }
}
