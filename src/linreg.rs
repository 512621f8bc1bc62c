use std::fmt::Display;

use crate::{Indicator, Ohlcv, Price};

/// Ordinary least-squares fit of close against bar index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    count: usize,
}

impl LinearFit {
    /// Change in fitted close per bar.
    #[inline]
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted close at index `0`.
    #[inline]
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of bars fitted.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Fitted close at bar `index`.
    #[inline]
    #[must_use]
    pub fn predict(&self, index: usize) -> Price {
        #[allow(clippy::cast_precision_loss)]
        let x = index as f64;
        self.slope.mul_add(x, self.intercept)
    }

    /// Predictions at the first and last fitted bar.
    #[must_use]
    pub fn endpoints(&self) -> (Price, Price) {
        (self.predict(0), self.predict(self.count.saturating_sub(1)))
    }
}

impl Display for LinearFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = {}x + {}", self.slope, self.intercept)
    }
}

/// Linear regression trend over every bar seen so far.
///
/// Fits `close = slope × index + intercept` by least squares, where
/// `index` counts bars from `0`. Running sums make each update O(1); the
/// fit after the last bar of a series is the whole-series trend line.
///
/// A single bar has no defined slope; the fit is then flat through its
/// close.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, LinReg};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut linreg = LinReg::new();
/// for (close, d) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().zip(2..) {
///     linreg.compute(&bar(close, d));
/// }
///
/// let fit = linreg.value().unwrap();
/// assert!((fit.slope() - 1.0).abs() < 1e-12);
/// assert!((fit.intercept() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LinReg {
    count: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_xx: f64,
    current: Option<LinearFit>,
}

impl LinReg {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fit(&self) -> LinearFit {
        #[allow(clippy::cast_precision_loss)]
        let n = self.count as f64;
        let denominator = n.mul_add(self.sum_xx, -(self.sum_x * self.sum_x));

        let slope = if self.count < 2 || denominator == 0.0 {
            0.0
        } else {
            n.mul_add(self.sum_xy, -(self.sum_x * self.sum_y)) / denominator
        };
        let intercept = (self.sum_y - slope * self.sum_x) / n;

        LinearFit {
            slope,
            intercept,
            count: self.count,
        }
    }
}

impl Indicator for LinReg {
    type Output = LinearFit;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<LinearFit> {
        #[allow(clippy::cast_precision_loss)]
        let x = self.count as f64;
        let y = bar.close();

        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_xx += x * x;

        self.current = Some(self.fit());

        self.current
    }

    #[inline]
    fn value(&self) -> Option<LinearFit> {
        self.current
    }
}

impl Display for LinReg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LINREG({})", self.count)
    }
}
