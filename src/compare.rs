//! Side-by-side charts for two tickers.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    ChartAssembler, ChartBundle, ChartError, DisplayRange, IndicatorRequest, PriceFeed,
    PriceSeries,
};

/// Two independently assembled charts sharing a horizontal range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    primary: ChartBundle,
    secondary: ChartBundle,
    shared_range: DisplayRange,
}

impl Comparison {
    /// Chart of the main ticker.
    #[must_use]
    pub fn primary(&self) -> &ChartBundle {
        &self.primary
    }

    /// Chart of the ticker compared against it.
    #[must_use]
    pub fn secondary(&self) -> &ChartBundle {
        &self.secondary
    }

    /// Range both charts should display so their axes line up.
    #[must_use]
    pub fn shared_range(&self) -> DisplayRange {
        self.shared_range
    }
}

/// Assembles two charts with the same overlays.
///
/// Neither chart's computation depends on the other series.
#[derive(Debug, Clone, Default)]
pub struct ComparisonCoordinator {
    assembler: ChartAssembler,
}

impl ComparisonCoordinator {
    #[must_use]
    pub fn new(assembler: ChartAssembler) -> Self {
        Self { assembler }
    }

    #[must_use]
    pub fn assembler(&self) -> &ChartAssembler {
        &self.assembler
    }

    /// Assembles both series with the same indicator names.
    ///
    /// The shared range covers both series from the earliest first bar to
    /// the latest last bar.
    #[must_use]
    pub fn compare<I, S>(
        &self,
        primary: &PriceSeries,
        secondary: &PriceSeries,
        indicators: I,
    ) -> Comparison
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let shared_range = primary.span().union(&secondary.span());
        self.compare_within(primary, secondary, indicators, shared_range)
    }

    /// Fetches both tickers over `[start, end)` and compares them.
    ///
    /// The shared range is the requested window, so both charts keep the
    /// same axis even when one ticker has gaps at either edge.
    ///
    /// # Errors
    ///
    /// Whatever `feed` returns for either ticker, typically
    /// [`ChartError::DataUnavailable`]. No partial comparison is returned.
    pub fn load_and_compare<F, I, S>(
        &self,
        feed: &F,
        primary: &str,
        secondary: &str,
        start: NaiveDate,
        end: NaiveDate,
        indicators: I,
    ) -> Result<Comparison, ChartError>
    where
        F: PriceFeed + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!(primary, secondary, %start, %end, "loading comparison");

        let primary_series = feed.fetch(primary, start, end)?;
        let secondary_series = feed.fetch(secondary, start, end)?;

        let last_day = end.checked_sub_days(Days::new(1)).unwrap_or(start);
        let shared_range = DisplayRange::new(start, last_day.max(start));

        Ok(self.compare_within(&primary_series, &secondary_series, indicators, shared_range))
    }

    fn compare_within<I, S>(
        &self,
        primary: &PriceSeries,
        secondary: &PriceSeries,
        indicators: I,
        shared_range: DisplayRange,
    ) -> Comparison
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let request = IndicatorRequest::parse(indicators);

        let primary = self.assembler.assemble_request(primary, &request);
        let secondary = self.assembler.assemble_request(secondary, &request);

        debug!(
            start = %shared_range.start(),
            end = %shared_range.end(),
            "comparison assembled"
        );

        Comparison {
            primary,
            secondary,
            shared_range,
        }
    }
}

/// Compares two series with the default style.
#[must_use]
pub fn compare<I, S>(primary: &PriceSeries, secondary: &PriceSeries, indicators: I) -> Comparison
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ComparisonCoordinator::default().compare(primary, secondary, indicators)
}
