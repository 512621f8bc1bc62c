use std::{fmt::Display, num::NonZero};

use crate::{Indicator, Ohlcv, Price, ring_buffer::RingBuffer};

/// Relative Strength Index (RSI) over a trailing window of price changes.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// Gains and losses of the last `length` one-step close changes are
/// averaged with a simple mean (no Wilder smoothing):
///
/// ```text
/// RS  = avg_gain / avg_loss
/// RSI = 100 − 100 / (1 + RS)
/// ```
///
/// A window without a single losing step has `avg_loss = 0`; RSI is then
/// exactly `100` rather than the result of dividing by zero. Output begins
/// at bar `length + 1`.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, Rsi};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut rsi = Rsi::new(NonZero::new(3).unwrap());
///
/// // Need 3 price changes (4 bars)
/// assert_eq!(rsi.compute(&bar(10.0, 2)), None);
/// assert_eq!(rsi.compute(&bar(12.0, 3)), None);
/// assert_eq!(rsi.compute(&bar(11.0, 4)), None);
///
/// // changes = +2, −1, +2 → avg_gain = 4/3, avg_loss = 1/3 → RS = 4 → RSI = 80
/// let value = rsi.compute(&bar(13.0, 5)).unwrap();
/// assert!((value - 80.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    length: usize,
    changes: RingBuffer,
    sum_gain: f64,
    sum_loss: f64,
    /// Number of strictly negative changes in the window. Zero means
    /// `avg_loss` is exactly zero regardless of running-sum drift.
    losing_steps: usize,
    gaining_steps: usize,
    prev_close: Option<Price>,
    current: Option<Price>,
}

impl Rsi {
    /// RSI over the last `length` close-to-close changes.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            changes: RingBuffer::new(length.get()),
            sum_gain: 0.0,
            sum_loss: 0.0,
            losing_steps: 0,
            gaining_steps: 0,
            prev_close: None,
            current: None,
        }
    }

    /// Number of price changes averaged.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    fn push_change(&mut self, change: f64) {
        if let Some(evicted) = self.changes.push(change) {
            self.retire(evicted);
        }

        if change > 0.0 {
            self.sum_gain += change;
            self.gaining_steps += 1;
        } else if change < 0.0 {
            self.sum_loss -= change;
            self.losing_steps += 1;
        }
    }

    fn retire(&mut self, change: f64) {
        if change > 0.0 {
            self.sum_gain -= change;
            self.gaining_steps -= 1;
        } else if change < 0.0 {
            self.sum_loss += change;
            self.losing_steps -= 1;
        }
    }

    fn averages(&self) -> (f64, f64) {
        #[allow(clippy::cast_precision_loss)]
        let length = self.length as f64;

        let avg_gain = if self.gaining_steps == 0 {
            0.0
        } else {
            self.sum_gain.max(0.0) / length
        };
        let avg_loss = if self.losing_steps == 0 {
            0.0
        } else {
            self.sum_loss.max(0.0) / length
        };

        (avg_gain, avg_loss)
    }

    /// Maps average gain and loss to the 0–100 scale.
    ///
    /// `avg_loss == 0` yields `100`, including a window with no movement at
    /// all.
    #[inline]
    #[must_use]
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
    }
}

impl Indicator for Rsi {
    type Output = Price;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        let close = bar.close();

        if let Some(prev_close) = self.prev_close.replace(close) {
            self.push_change(close - prev_close);
        }

        self.current = self.changes.is_ready().then(|| {
            let (avg_gain, avg_loss) = self.averages();
            Rsi::from_averages(avg_gain, avg_loss)
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.length)
    }
}
