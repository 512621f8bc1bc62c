use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Ohlcv, Price, price_window::PriceWindow};

/// Standard deviation multiplier for Bollinger Bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not finite and positive.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(
            value.is_finite() && value > 0.0,
            "std_dev must be positive and finite, got {value}"
        );
        Self(value)
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Bollinger Bands output: upper, middle, and lower bands.
///
/// The middle band is the SMA. Upper and lower bands are offset by
/// `std_dev × σ`, where `σ` is the population standard deviation of the window.
///
/// ```text
/// upper  = SMA + k × σ
/// middle = SMA
/// lower  = SMA − k × σ
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl BbValue {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Band width: `upper − lower`.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands (BB) on closing prices.
///
/// A volatility indicator consisting of three bands: a simple moving average
/// (middle) with upper and lower bands offset by a number of population
/// standard deviations of the same window.
///
/// A window of identical closes has zero variance; both bands then
/// collapse onto the middle band instead of producing NaN.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, Bb, StdDev};
/// use chrono::{Days, NaiveDate};
/// use std::num::NonZero;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
/// let bar = |close, d| Bar::new(start + Days::new(d), close, close, close, close, 0);
///
/// let mut bb = Bb::new(NonZero::new(20).unwrap(), StdDev::new(2.0));
///
/// # for d in 0..19 { bb.compute(&bar(100.0, d)); }
/// let value = bb.compute(&bar(100.0, 19)).unwrap();
/// assert_eq!(value.upper(), 100.0);
/// assert_eq!(value.lower(), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    length: usize,
    std_dev_multiplier: f64,
    window: PriceWindow,
    current: Option<BbValue>,
}

impl Bb {
    /// Bands over the last `length` closes at `std_dev` deviations.
    #[must_use]
    pub fn new(length: NonZero<usize>, std_dev: StdDev) -> Self {
        Self {
            length: length.get(),
            std_dev_multiplier: std_dev.value(),
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

impl Indicator for Bb {
    type Output = BbValue;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output> {
        self.window.add(bar.close());

        self.current = match (self.window.mean(), self.window.population_variance()) {
            (Some(mean), Some(variance)) => {
                let offset = variance.sqrt() * self.std_dev_multiplier;

                Some(BbValue {
                    upper: mean + offset,
                    middle: mean,
                    lower: mean - offset,
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB({}, {})", self.length, self.std_dev_multiplier)
    }
}
