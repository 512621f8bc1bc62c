//! Indicator dispatch: request names to labeled, aligned series.

use std::{collections::BTreeSet, fmt::Display, num::NonZero, str::FromStr};

use tracing::debug;

use crate::{
    Bb, Color, Diagnostic, Ema, Indicator, LabeledSeries, LinReg, Macd, Price, PriceSeries, Rsi,
    SeriesKind, SeriesPoint, Sma, StdDev,
};

const SMA_FAST: NonZero<usize> = NonZero::new(30).unwrap();
const SMA_SLOW: NonZero<usize> = NonZero::new(100).unwrap();
const EMA_SPAN: NonZero<usize> = NonZero::new(50).unwrap();
const RSI_LENGTH: NonZero<usize> = NonZero::new(14).unwrap();
const BB_LENGTH: NonZero<usize> = NonZero::new(20).unwrap();
const BB_STD_DEV: f64 = 2.0;

/// The supported overlays.
///
/// Declaration order is the canonical render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndicatorKind {
    Sma30,
    Sma100,
    LinearRegression,
    Ema50,
    Rsi,
    Macd,
    BollingerBands,
}

impl IndicatorKind {
    /// Every overlay, in canonical order.
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::Sma30,
        IndicatorKind::Sma100,
        IndicatorKind::LinearRegression,
        IndicatorKind::Ema50,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::BollingerBands,
    ];

    /// Name used to request this overlay.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            IndicatorKind::Sma30 => "30 Day SMA",
            IndicatorKind::Sma100 => "100 Day SMA",
            IndicatorKind::LinearRegression => "Linear Regression Line",
            IndicatorKind::Ema50 => "50 Day EMA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::BollingerBands => "Bollinger Bands",
        }
    }

    /// Looks up a request name. Surrounding whitespace is ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Computes this overlay over `series`.
    ///
    /// `Line` and `BandPair` series have exactly one point per bar, with
    /// `None` during warm-up; a series shorter than the window yields a
    /// fully undefined column. The regression overlay is a two-point
    /// `Segment` from the first to the last bar.
    #[must_use]
    pub fn compute(self, series: &PriceSeries) -> Vec<LabeledSeries> {
        let computed = match self {
            IndicatorKind::Sma30 => vec![line(
                self.name(),
                Color::PURPLE,
                series,
                trace(series, Sma::new(SMA_FAST)),
            )],
            IndicatorKind::Sma100 => vec![line(
                self.name(),
                Color::BLUE,
                series,
                trace(series, Sma::new(SMA_SLOW)),
            )],
            IndicatorKind::LinearRegression => vec![regression_segment(series)],
            IndicatorKind::Ema50 => vec![line(
                self.name(),
                Color::ORANGE,
                series,
                trace(series, Ema::new(EMA_SPAN)),
            )],
            IndicatorKind::Rsi => vec![line(
                self.name(),
                Color::BROWN,
                series,
                trace(series, Rsi::new(RSI_LENGTH)),
            )],
            IndicatorKind::Macd => {
                let values = trace(series, Macd::standard());
                vec![
                    line(
                        "MACD",
                        Color::BLUE,
                        series,
                        values.iter().map(|v| v.map(|v| v.macd())),
                    ),
                    line(
                        "Signal Line",
                        Color::GREEN,
                        series,
                        values.iter().map(|v| v.map(|v| v.signal())),
                    ),
                ]
            }
            IndicatorKind::BollingerBands => {
                let values = trace(series, Bb::new(BB_LENGTH, StdDev::new(BB_STD_DEV)));
                vec![
                    band(
                        "Upper Bollinger Band",
                        series,
                        values.iter().map(|v| v.map(|v| v.upper())),
                    ),
                    band(
                        "Lower Bollinger Band",
                        series,
                        values.iter().map(|v| v.map(|v| v.lower())),
                    ),
                ]
            }
        };

        for output in &computed {
            debug!(
                indicator = self.name(),
                label = output.label(),
                bars = series.len(),
                defined = output.defined_count(),
                "computed overlay"
            );
        }

        computed
    }
}

impl Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = Diagnostic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Diagnostic::UnknownIndicator(s.to_owned()))
    }
}

/// A deduplicated set of requested overlays.
///
/// Recognized names iterate in canonical order regardless of request
/// order; unrecognized names are kept once each, in first-seen order, for
/// reporting.
///
/// # Example
///
/// ```
/// use chart_overlays::{IndicatorKind, IndicatorRequest};
///
/// let request = IndicatorRequest::parse(["MACD", "30 Day SMA", "Foo", "MACD"]);
///
/// let kinds: Vec<_> = request.kinds().collect();
/// assert_eq!(kinds, vec![IndicatorKind::Sma30, IndicatorKind::Macd]);
/// assert_eq!(request.unknown(), ["Foo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndicatorRequest {
    kinds: BTreeSet<IndicatorKind>,
    unknown: Vec<String>,
}

impl IndicatorRequest {
    /// Sorts `names` into recognized overlays and unknown names.
    pub fn parse<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut request = Self::default();

        for name in names {
            let name = name.as_ref().trim();
            match name.parse::<IndicatorKind>() {
                Ok(kind) => {
                    request.kinds.insert(kind);
                }
                Err(_) if request.unknown.iter().any(|u| u == name) => {}
                Err(_) => request.unknown.push(name.to_owned()),
            }
        }

        request
    }

    /// Every supported overlay.
    #[must_use]
    pub fn all() -> Self {
        Self {
            kinds: IndicatorKind::ALL.into_iter().collect(),
            unknown: Vec::new(),
        }
    }

    /// Recognized overlays in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Unrecognized names, trimmed, in first-seen order.
    #[must_use]
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// One diagnostic per unrecognized name.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.unknown
            .iter()
            .cloned()
            .map(Diagnostic::UnknownIndicator)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// `true` when no recognized overlay was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IndicatorRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::parse(iter)
    }
}

/// Runs `indicator` over every bar, keeping one output per bar.
fn trace<I: Indicator>(series: &PriceSeries, mut indicator: I) -> Vec<Option<I::Output>> {
    series
        .bars()
        .iter()
        .map(|bar| indicator.compute(bar))
        .collect()
}

fn aligned(
    series: &PriceSeries,
    values: impl IntoIterator<Item = Option<Price>>,
) -> Vec<SeriesPoint> {
    series
        .bars()
        .iter()
        .zip(values)
        .map(|(bar, value)| SeriesPoint {
            timestamp: bar.timestamp,
            value,
        })
        .collect()
}

fn line(
    label: &'static str,
    color: Color,
    series: &PriceSeries,
    values: impl IntoIterator<Item = Option<Price>>,
) -> LabeledSeries {
    LabeledSeries::new(label, SeriesKind::Line, aligned(series, values), color)
}

fn band(
    label: &'static str,
    series: &PriceSeries,
    values: impl IntoIterator<Item = Option<Price>>,
) -> LabeledSeries {
    LabeledSeries::new(
        label,
        SeriesKind::BandPair,
        aligned(series, values),
        Color::GRAY,
    )
}

fn regression_segment(series: &PriceSeries) -> LabeledSeries {
    let mut linreg = LinReg::new();
    for bar in series.bars() {
        linreg.compute(bar);
    }

    let points = match linreg.value() {
        Some(fit) => {
            let (first, last) = fit.endpoints();
            vec![
                SeriesPoint {
                    timestamp: series.first().timestamp,
                    value: Some(first),
                },
                SeriesPoint {
                    timestamp: series.last().timestamp,
                    value: Some(last),
                },
            ]
        }
        None => Vec::new(),
    };

    LabeledSeries::new("Linear Regression", SeriesKind::Segment, points, Color::RED)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, series};

    fn ramp(len: u32) -> PriceSeries {
        let closes: Vec<f64> = (0..len)
            .map(|i| 100.0 + f64::from(i % 7) - f64::from(i % 3) * 0.5)
            .collect();
        series(&closes)
    }

    mod names {
        use super::*;

        #[test]
        fn every_kind_round_trips_through_its_name() {
            for kind in IndicatorKind::ALL {
                assert_eq!(IndicatorKind::from_name(kind.name()), Some(kind));
                assert_eq!(kind.name().parse::<IndicatorKind>(), Ok(kind));
            }
        }

        #[test]
        fn surrounding_whitespace_ignored() {
            assert_eq!(IndicatorKind::from_name("  RSI "), Some(IndicatorKind::Rsi));
        }

        #[test]
        fn unknown_name_is_diagnostic() {
            assert_eq!(
                "Foo".parse::<IndicatorKind>(),
                Err(Diagnostic::UnknownIndicator("Foo".into()))
            );
        }

        #[test]
        fn names_are_case_sensitive() {
            assert_eq!(IndicatorKind::from_name("rsi"), None);
        }

        #[test]
        fn canonical_order_matches_ord() {
            let mut sorted = IndicatorKind::ALL;
            sorted.sort();
            assert_eq!(sorted, IndicatorKind::ALL);
        }
    }

    mod request {
        use super::*;

        #[test]
        fn dedups_and_orders() {
            let request = IndicatorRequest::parse([
                "Bollinger Bands",
                "RSI",
                "30 Day SMA",
                "RSI",
                "Linear Regression Line",
            ]);
            let kinds: Vec<_> = request.kinds().collect();
            assert_eq!(
                kinds,
                vec![
                    IndicatorKind::Sma30,
                    IndicatorKind::LinearRegression,
                    IndicatorKind::Rsi,
                    IndicatorKind::BollingerBands,
                ]
            );
        }

        #[test]
        fn unknown_names_reported_once() {
            let request: IndicatorRequest = ["Foo", "Bar", "Foo"].into_iter().collect();
            assert!(request.is_empty());
            assert_eq!(request.unknown(), ["Foo", "Bar"]);
            assert_eq!(request.diagnostics().len(), 2);
        }

        #[test]
        fn unknown_names_deduplicated_after_trim() {
            let request = IndicatorRequest::parse(["Foo", " Foo ", "\tFoo"]);
            assert_eq!(request.unknown(), ["Foo"]);
            assert_eq!(
                request.diagnostics(),
                vec![Diagnostic::UnknownIndicator("Foo".into())]
            );
        }

        #[test]
        fn all_contains_every_kind() {
            let request = IndicatorRequest::all();
            assert!(IndicatorKind::ALL.iter().all(|k| request.contains(*k)));
        }

        #[test]
        fn empty_request() {
            let request = IndicatorRequest::parse(Vec::<String>::new());
            assert!(request.is_empty());
            assert!(request.unknown().is_empty());
        }
    }

    mod alignment {
        use super::*;

        #[test]
        fn per_bar_series_match_input_length() {
            for len in [1, 3, 19, 20, 35, 120] {
                let series = ramp(len);
                for kind in IndicatorKind::ALL {
                    for output in kind.compute(&series) {
                        if output.kind() == SeriesKind::Segment {
                            assert_eq!(output.len(), 2);
                        } else {
                            assert_eq!(output.len(), series.len(), "{kind} at len {len}");
                        }
                    }
                }
            }
        }

        #[test]
        fn timestamps_follow_series() {
            let series = ramp(40);
            let output = &IndicatorKind::Ema50.compute(&series)[0];
            let stamps: Vec<_> = output.points().iter().map(|p| p.timestamp).collect();
            assert_eq!(stamps, series.timestamps());
        }
    }

    mod warm_up {
        use super::*;

        fn first_defined(kind: IndicatorKind, len: u32) -> Vec<Option<usize>> {
            kind.compute(&ramp(len))
                .iter()
                .map(|s| s.points().iter().position(|p| p.value.is_some()))
                .collect()
        }

        #[test]
        fn sma30_starts_at_29() {
            assert_eq!(first_defined(IndicatorKind::Sma30, 60), vec![Some(29)]);
        }

        #[test]
        fn sma100_starts_at_99() {
            assert_eq!(first_defined(IndicatorKind::Sma100, 150), vec![Some(99)]);
        }

        #[test]
        fn ema50_defined_from_start() {
            assert_eq!(first_defined(IndicatorKind::Ema50, 10), vec![Some(0)]);
        }

        #[test]
        fn rsi_starts_at_14() {
            assert_eq!(first_defined(IndicatorKind::Rsi, 30), vec![Some(14)]);
        }

        #[test]
        fn macd_defined_from_start() {
            assert_eq!(
                first_defined(IndicatorKind::Macd, 10),
                vec![Some(0), Some(0)]
            );
        }

        #[test]
        fn bollinger_starts_at_19() {
            assert_eq!(
                first_defined(IndicatorKind::BollingerBands, 30),
                vec![Some(19), Some(19)]
            );
        }

        #[test]
        fn short_history_is_fully_undefined() {
            let series = series(&[101.0, 102.0, 103.0]);
            let sma = &IndicatorKind::Sma30.compute(&series)[0];
            assert_eq!(sma.values(), vec![None, None, None]);
        }
    }

    mod values {
        use super::*;

        #[test]
        fn sma30_is_trailing_mean() {
            let series = ramp(45);
            let closes = series.closes();
            let sma = IndicatorKind::Sma30.compute(&series)[0].values();
            for i in 29..45 {
                let expected = closes[i - 29..=i].iter().sum::<f64>() / 30.0;
                assert!((sma[i].unwrap() - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn regression_segment_endpoints() {
            let series = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
            let segment = &IndicatorKind::LinearRegression.compute(&series)[0];
            assert_eq!(segment.kind(), SeriesKind::Segment);
            assert_eq!(segment.label(), "Linear Regression");
            assert_eq!(segment.points()[0].timestamp, series.first().timestamp);
            assert_eq!(segment.points()[1].timestamp, series.last().timestamp);
            assert_approx!(segment.points()[0].value.unwrap(), 1.0);
            assert_approx!(segment.points()[1].value.unwrap(), 5.0);
        }

        #[test]
        fn upper_band_never_below_lower() {
            let outputs = IndicatorKind::BollingerBands.compute(&ramp(40));
            let (upper, lower) = (outputs[0].values(), outputs[1].values());
            for (u, l) in upper.iter().zip(&lower).skip(19) {
                assert!(u.unwrap() >= l.unwrap());
            }
        }

        #[test]
        fn computation_order_does_not_matter() {
            let series = ramp(60);
            let bb_first = IndicatorKind::BollingerBands.compute(&series);
            let _ = IndicatorKind::Macd.compute(&series);
            let bb_again = IndicatorKind::BollingerBands.compute(&series);
            assert_eq!(bb_first, bb_again);
        }
    }

    mod labels {
        use super::*;

        #[test]
        fn labels_and_colors() {
            let series = ramp(5);
            let described: Vec<(String, String, SeriesKind)> = IndicatorKind::ALL
                .into_iter()
                .flat_map(|kind| kind.compute(&series))
                .map(|s| (s.label().to_owned(), s.color().to_string(), s.kind()))
                .collect();

            let expected = [
                ("30 Day SMA", "purple", SeriesKind::Line),
                ("100 Day SMA", "blue", SeriesKind::Line),
                ("Linear Regression", "red", SeriesKind::Segment),
                ("50 Day EMA", "orange", SeriesKind::Line),
                ("RSI", "brown", SeriesKind::Line),
                ("MACD", "blue", SeriesKind::Line),
                ("Signal Line", "green", SeriesKind::Line),
                ("Upper Bollinger Band", "gray", SeriesKind::BandPair),
                ("Lower Bollinger Band", "gray", SeriesKind::BandPair),
            ];

            assert_eq!(described.len(), expected.len());
            for ((label, color, kind), (e_label, e_color, e_kind)) in
                described.iter().zip(expected)
            {
                assert_eq!(label, e_label);
                assert_eq!(color, e_color);
                assert_eq!(*kind, e_kind);
            }
        }
    }
}
