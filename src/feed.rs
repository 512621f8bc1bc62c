//! Price data sources.
//!
//! Fetching sits outside the chart core: everything downstream of a
//! [`PriceFeed`] only sees validated [`PriceSeries`] values.

use std::{
    collections::HashMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Bar, ChartError, DisplayRange, Price, PriceSeries};

/// Source of daily bars for a ticker.
pub trait PriceFeed {
    /// Returns the bars of `ticker` dated in `[start, end)`.
    ///
    /// # Errors
    ///
    /// [`ChartError::DataUnavailable`] when the ticker is unknown or no bar
    /// falls inside the window. Implementations may return other variants
    /// for transport or decoding failures.
    fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
    -> Result<PriceSeries, ChartError>;
}

/// Reads `<root>/<TICKER>.csv` files with `Date,Open,High,Low,Close,Volume`
/// headers, the layout of the usual daily-history downloads.
///
/// Extra columns such as `Adj Close` are ignored. A missing `Volume`
/// column reads as zero.
///
/// # Example
///
/// ```no_run
/// use chart_overlays::{CsvFeed, PriceFeed};
/// use chrono::NaiveDate;
///
/// let feed = CsvFeed::new("data/prices");
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = feed.fetch("AAPL", start, end)?;
/// # Ok::<(), chart_overlays::ChartError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvFeed {
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: Price,
    #[serde(rename = "High")]
    high: Price,
    #[serde(rename = "Low")]
    low: Price,
    #[serde(rename = "Close")]
    close: Price,
    #[serde(rename = "Volume", default)]
    volume: u64,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar::new(row.date, row.open, row.high, row.low, row.close, row.volume)
    }
}

impl CsvFeed {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the feed reads for `ticker`.
    #[must_use]
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.root.join(format!("{ticker}.csv"))
    }
}

impl PriceFeed for CsvFeed {
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ChartError> {
        let range = requested_range(ticker, start, end)?;

        if !is_valid_ticker(ticker) {
            return Err(ChartError::data_unavailable(ticker, "invalid ticker symbol"));
        }

        let path = self.path_for(ticker);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(ticker, path = %path.display(), "no price file");
                return Err(ChartError::data_unavailable(ticker, "unknown ticker"));
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut total = 0usize;
        let mut bars = Vec::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            total += 1;
            if range.contains(row.date) {
                bars.push(Bar::from(row));
            }
        }

        debug!(ticker, rows = total, kept = bars.len(), "read price file");

        if bars.is_empty() {
            warn!(ticker, %start, %end, "no bars in requested window");
            return Err(ChartError::data_unavailable(
                ticker,
                format!("no bars between {start} and {end}"),
            ));
        }

        PriceSeries::new(bars)
    }
}

/// Feed backed by series held in memory.
///
/// Useful for tests and for callers that already hold their data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeed {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `series` under `ticker`, replacing any previous entry.
    pub fn insert(&mut self, ticker: impl Into<String>, series: PriceSeries) {
        self.series.insert(ticker.into(), series);
    }

    #[must_use]
    pub fn with(mut self, ticker: impl Into<String>, series: PriceSeries) -> Self {
        self.insert(ticker, series);
        self
    }
}

impl PriceFeed for InMemoryFeed {
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ChartError> {
        let range = requested_range(ticker, start, end)?;

        self.series
            .get(ticker)
            .ok_or_else(|| ChartError::data_unavailable(ticker, "unknown ticker"))?
            .slice(ticker, range)
    }
}

/// Converts a half-open `[start, end)` window into an inclusive range.
fn requested_range(
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DisplayRange, ChartError> {
    if start >= end {
        return Err(ChartError::data_unavailable(
            ticker,
            format!("empty window {start}..{end}"),
        ));
    }

    let last = end.checked_sub_days(Days::new(1)).unwrap_or(start);
    Ok(DisplayRange::new(start, last))
}

fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
}
