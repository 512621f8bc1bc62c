//! Technical-analysis overlays for daily candlestick charts.
//!
//! A validated [`PriceSeries`] goes in; a [`ChartBundle`] of candle
//! geometry and labeled overlay series comes out. Overlays are selected by
//! display name (`"30 Day SMA"`, `"RSI"`, `"Bollinger Bands"`, ...) and are
//! always emitted in a fixed canonical order, each aligned one point per
//! bar with `None` during warm-up.
//!
//! The indicators behind the overlays ([`Sma`], [`Ema`], [`Rsi`], [`Bb`],
//! [`Macd`], [`LinReg`]) are streaming: feed them one bar at a time with
//! [`compute`](Sma::compute). They expose [`compute`](Sma::compute) and
//! [`value`](Sma::value) as inherent methods, so no trait import is needed.
//! Import [`Indicator`] only for generic code.
//!
//! ```
//! use chart_overlays::{PriceSeries, assemble, Bar};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2023, 3, d).unwrap();
//! let series = PriceSeries::new(vec![
//!     Bar::new(day(1), 10.0, 11.0, 9.0, 10.5, 100),
//!     Bar::new(day(2), 10.5, 12.0, 10.0, 11.5, 120),
//!     Bar::new(day(3), 11.5, 11.8, 10.9, 11.0, 90),
//! ])
//! .unwrap();
//!
//! let bundle = assemble(&series, ["Linear Regression Line"]);
//! assert_eq!(bundle.series()[0].len(), 2);
//! ```

mod bb;
mod candle;
mod chart;
mod compare;
mod ema;
mod engine;
mod error;
mod feed;
mod indicator;
mod linreg;
mod macd;
mod ohlcv;
mod price_series;
mod price_window;
mod ring_buffer;
mod rsi;
mod series;
mod sma;
mod style;

pub use crate::error::{ChartError, Diagnostic, SeriesDefect};
pub use crate::indicator::Indicator;
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_series::{Bar, DisplayRange, PriceSeries};

pub use crate::bb::{Bb, BbValue, StdDev};
pub use crate::ema::Ema;
pub use crate::linreg::{LinReg, LinearFit};
pub use crate::macd::{Macd, MacdValue};
pub use crate::rsi::Rsi;
pub use crate::sma::Sma;

pub use crate::candle::{BarClass, Candle, CandleGeometry, classify};
pub use crate::chart::{ChartAssembler, ChartBundle, assemble};
pub use crate::compare::{Comparison, ComparisonCoordinator, compare};
pub use crate::engine::{IndicatorKind, IndicatorRequest};
pub use crate::feed::{CsvFeed, InMemoryFeed, PriceFeed};
pub use crate::series::{ClickPolicy, Color, LabeledSeries, SeriesKind, SeriesPoint, StyleHints};
pub use crate::style::{CandleStyle, ChartStyle, FigureHints, LegendHints, LegendLocation};

macro_rules! impl_indicator_methods {
    ($type:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, Price);
impl_indicator_methods!(Ema, Price);
impl_indicator_methods!(Rsi, Price);
impl_indicator_methods!(Bb, BbValue);
impl_indicator_methods!(Macd, MacdValue);
impl_indicator_methods!(LinReg, LinearFit);

#[cfg(test)]
mod test_util;
