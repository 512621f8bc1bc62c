//! Chart assembly: candles plus requested overlays in one bundle.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    CandleGeometry, ChartStyle, Diagnostic, FigureHints, IndicatorRequest, LabeledSeries,
    LegendHints, PriceSeries, StyleHints,
};

/// Everything the rendering layer needs to draw one chart.
///
/// Produced fresh per request and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    candles: CandleGeometry,
    series: Vec<LabeledSeries>,
    diagnostics: Vec<Diagnostic>,
    figure: FigureHints,
    legend: LegendHints,
}

impl ChartBundle {
    /// One candle per input bar.
    #[must_use]
    pub fn candles(&self) -> &CandleGeometry {
        &self.candles
    }

    /// Overlay series in canonical order.
    #[must_use]
    pub fn series(&self) -> &[LabeledSeries] {
        &self.series
    }

    /// Finds an overlay series by its label.
    #[must_use]
    pub fn series_labeled(&self, label: &str) -> Option<&LabeledSeries> {
        self.series.iter().find(|s| s.label() == label)
    }

    /// Non-fatal problems found while assembling.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Figure-level hints from the assembler's style.
    #[must_use]
    pub fn figure(&self) -> &FigureHints {
        &self.figure
    }

    /// Legend placement and click behavior.
    #[must_use]
    pub fn legend(&self) -> &LegendHints {
        &self.legend
    }
}

/// Builds [`ChartBundle`]s with a fixed [`ChartStyle`].
///
/// Assembly is pure: the same series and request always produce an
/// identical bundle, and the series is never modified.
///
/// # Example
///
/// ```
/// use chart_overlays::{Bar, ChartAssembler, PriceSeries};
/// use chrono::{Days, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
/// let bars = (0u32..40)
///     .map(|i| {
///         let close = 100.0 + f64::from(i);
///         Bar::new(start + Days::new(u64::from(i)), close - 0.5, close + 1.0, close - 1.0, close, 1_000)
///     })
///     .collect();
/// let series = PriceSeries::new(bars).unwrap();
///
/// let bundle = ChartAssembler::default().assemble(&series, ["RSI", "30 Day SMA", "Foo"]);
///
/// let labels: Vec<_> = bundle.series().iter().map(|s| s.label()).collect();
/// assert_eq!(labels, vec!["30 Day SMA", "RSI"]);
/// assert_eq!(bundle.candles().len(), 40);
/// assert_eq!(bundle.diagnostics().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChartAssembler {
    style: ChartStyle,
}

impl ChartAssembler {
    #[must_use]
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Assembles candles and the named overlays.
    ///
    /// Duplicate names are computed once. Unrecognized names are skipped
    /// and reported in [`ChartBundle::diagnostics`].
    #[must_use]
    pub fn assemble<I, S>(&self, series: &PriceSeries, indicators: I) -> ChartBundle
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.assemble_request(series, &IndicatorRequest::parse(indicators))
    }

    /// Assembles candles and the overlays of an already parsed request.
    #[must_use]
    pub fn assemble_request(&self, series: &PriceSeries, request: &IndicatorRequest) -> ChartBundle {
        let diagnostics = request.diagnostics();
        for diagnostic in &diagnostics {
            warn!(%diagnostic, "skipping overlay");
        }

        let hints = StyleHints {
            click_policy: self.style.legend.click_policy,
        };

        let overlays: Vec<LabeledSeries> = request
            .kinds()
            .flat_map(|kind| kind.compute(series))
            .map(|s| s.with_style(hints))
            .collect();

        debug!(
            bars = series.len(),
            overlays = overlays.len(),
            diagnostics = diagnostics.len(),
            "assembled chart"
        );

        ChartBundle {
            candles: CandleGeometry::new(series, &self.style.candles),
            series: overlays,
            diagnostics,
            figure: self.style.figure.clone(),
            legend: self.style.legend,
        }
    }
}

/// Assembles a chart with the default style.
///
/// Shorthand for `ChartAssembler::default().assemble(series, indicators)`.
#[must_use]
pub fn assemble<I, S>(series: &PriceSeries, indicators: I) -> ChartBundle
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ChartAssembler::default().assemble(series, indicators)
}
