//! Error and diagnostic types.

use thiserror::Error;

use crate::{Price, Timestamp};

/// Errors that abort a chart request.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The fetch collaborator found nothing for the ticker and date range.
    #[error("no data available for {ticker}: {reason}")]
    DataUnavailable {
        /// Requested ticker symbol.
        ticker: String,
        /// Why the feed came back empty.
        reason: String,
    },

    /// The price series violates one of its invariants.
    #[error("malformed price series: {0}")]
    MalformedSeries(#[from] SeriesDefect),

    /// Chart style configuration could not be parsed.
    #[error("invalid chart configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A CSV price file could not be decoded.
    #[error("failed to read price data: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error while reading a price or config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// Creates a `DataUnavailable` error.
    #[must_use]
    pub fn data_unavailable(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::DataUnavailable {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

/// A violated [`PriceSeries`](crate::PriceSeries) invariant.
///
/// Indices refer to the position of the offending bar in the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesDefect {
    /// The series holds no bars.
    #[error("series is empty")]
    Empty,

    /// A price field is NaN or infinite.
    #[error("bar {index} has non-finite {field}: {value}")]
    NonFinitePrice {
        /// Bar position.
        index: usize,
        /// Name of the OHLC field.
        field: &'static str,
        /// Offending value.
        value: Price,
    },

    /// `high` is below `low`.
    #[error("bar {index} has high {high} below low {low}")]
    InvertedRange {
        /// Bar position.
        index: usize,
        /// High price.
        high: Price,
        /// Low price.
        low: Price,
    },

    /// `open` or `close` lies outside the `[low, high]` range.
    #[error("bar {index} body [{open}, {close}] escapes range [{low}, {high}]")]
    BodyOutsideRange {
        /// Bar position.
        index: usize,
        /// Open price.
        open: Price,
        /// High price.
        high: Price,
        /// Low price.
        low: Price,
        /// Close price.
        close: Price,
    },

    /// Timestamps are not strictly increasing.
    #[error("bar {index} at {timestamp} does not follow {previous}")]
    NonMonotonicTimestamp {
        /// Bar position.
        index: usize,
        /// Timestamp of the preceding bar.
        previous: Timestamp,
        /// Timestamp of this bar.
        timestamp: Timestamp,
    },
}

/// A non-fatal problem found while assembling a chart.
///
/// Diagnostics are collected in the [`ChartBundle`](crate::ChartBundle);
/// the rest of the request still renders.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A requested indicator name is not in the supported set.
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
}
