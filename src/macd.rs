use std::{fmt::Display, num::NonZero};

use crate::{Ema, Indicator, Ohlcv, Price};

/// MACD output: the MACD line, its signal line and their difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    macd: Price,
    signal: Price,
}

impl MacdValue {
    /// Fast EMA minus slow EMA.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.macd - self.signal
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MACD(m: {}, s: {})", self.macd, self.signal)
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// ```text
/// MACD   = EMA_fast(close) − EMA_slow(close)
/// Signal = EMA_signal(MACD)
/// ```
///
/// All three averages are seeded from their first input, so MACD and
/// signal are defined from the first bar (both start at `0`). Early values
/// carry the same low-confidence caveat as [`Ema`].
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, Macd};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let bar = |close, d| Bar::new(day(d), close, close, close, close, 0);
///
/// let mut macd = Macd::standard();
///
/// let first = macd.compute(&bar(100.0, 2)).unwrap();
/// assert_eq!(first.macd(), 0.0);
/// assert_eq!(first.signal(), 0.0);
///
/// let second = macd.compute(&bar(110.0, 3)).unwrap();
/// assert!(second.macd() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    current: Option<MacdValue>,
}

const STANDARD_FAST: NonZero<usize> = NonZero::new(12).unwrap();
const STANDARD_SLOW: NonZero<usize> = NonZero::new(26).unwrap();
const STANDARD_SIGNAL: NonZero<usize> = NonZero::new(9).unwrap();

impl Macd {
    /// MACD with the given fast, slow and signal spans.
    #[must_use]
    pub fn new(fast: NonZero<usize>, slow: NonZero<usize>, signal: NonZero<usize>) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
            current: None,
        }
    }

    /// MACD(12, 26, 9).
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_FAST, STANDARD_SLOW, STANDARD_SIGNAL)
    }
}

impl Indicator for Macd {
    type Output = MacdValue;

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<MacdValue> {
        let close = bar.close();
        let macd = self.fast.update(close) - self.slow.update(close);
        let signal = self.signal.update(macd);

        self.current = Some(MacdValue { macd, signal });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.fast.span(),
            self.slow.span(),
            self.signal.span()
        )
    }
}
