use serde::{Deserialize, Serialize};

use crate::{ChartError, Ohlcv, Price, SeriesDefect, Timestamp};

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: u64,
}

impl Bar {
    #[must_use]
    pub fn new(
        timestamp: Timestamp,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn volume(&self) -> u64 {
        self.volume
    }
}

/// Inclusive span of trading days shown on a chart's horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayRange {
    start: Timestamp,
    end: Timestamp,
}

impl DisplayRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &DisplayRange) -> DisplayRange {
        DisplayRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[must_use]
    pub fn contains(&self, day: Timestamp) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A validated, immutable daily price series.
///
/// Guarantees at least one bar, strictly increasing timestamps, finite
/// prices, and `low <= min(open, close) <= max(open, close) <= high` for
/// every bar. Indicators read it but never write derived columns back.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, PriceSeries};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
/// let series = PriceSeries::new(vec![
///     Bar::new(day(2), 100.0, 105.0, 98.0, 103.0, 1_000),
///     Bar::new(day(3), 103.0, 106.0, 99.0, 101.0, 1_200),
/// ])
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.closes(), vec![103.0, 101.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validates `bars` and wraps them.
    ///
    /// # Errors
    ///
    /// [`ChartError::MalformedSeries`] naming the first violated invariant.
    pub fn new(bars: Vec<Bar>) -> Result<Self, ChartError> {
        validate(&bars)?;
        Ok(Self { bars })
    }

    /// Copies any [`Ohlcv`] bars into a validated series.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_ohlcv<'a, T, I>(bars: I) -> Result<Self, ChartError>
    where
        T: Ohlcv + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let bars = bars
            .into_iter()
            .map(|b| Bar::new(b.timestamp(), b.open(), b.high(), b.low(), b.close(), b.volume()))
            .collect();
        Self::new(bars)
    }

    #[inline]
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false`: a validated series holds at least one bar.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    #[must_use]
    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    #[must_use]
    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.close).collect()
    }

    #[must_use]
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// First to last trading day of the series.
    #[must_use]
    pub fn span(&self) -> DisplayRange {
        DisplayRange::new(self.first().timestamp, self.last().timestamp)
    }

    /// Sub-series of the bars falling inside `range`.
    ///
    /// # Errors
    ///
    /// [`ChartError::DataUnavailable`] when no bar falls inside the range.
    /// `ticker` only labels the error.
    pub fn slice(&self, ticker: &str, range: DisplayRange) -> Result<Self, ChartError> {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .filter(|b| range.contains(b.timestamp))
            .copied()
            .collect();

        if bars.is_empty() {
            return Err(ChartError::data_unavailable(
                ticker,
                format!("no bars between {} and {}", range.start(), range.end()),
            ));
        }

        Ok(Self { bars })
    }
}

fn validate(bars: &[Bar]) -> Result<(), SeriesDefect> {
    if bars.is_empty() {
        return Err(SeriesDefect::Empty);
    }

    let mut previous: Option<Timestamp> = None;

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !value.is_finite() {
                return Err(SeriesDefect::NonFinitePrice {
                    index,
                    field,
                    value,
                });
            }
        }

        if bar.high < bar.low {
            return Err(SeriesDefect::InvertedRange {
                index,
                high: bar.high,
                low: bar.low,
            });
        }

        if bar.high < bar.open.max(bar.close) || bar.low > bar.open.min(bar.close) {
            return Err(SeriesDefect::BodyOutsideRange {
                index,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
            });
        }

        if let Some(previous) = previous
            && bar.timestamp <= previous
        {
            return Err(SeriesDefect::NonMonotonicTimestamp {
                index,
                previous,
                timestamp: bar.timestamp,
            });
        }

        previous = Some(bar.timestamp);
    }

    Ok(())
}
