//! Gain/loss classification and candlestick geometry.

use serde::Serialize;

use crate::{CandleStyle, Color, Ohlcv, Price, PriceSeries, Timestamp};

/// Direction of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarClass {
    /// `close > open`.
    Gain,
    /// `open > close`.
    Loss,
    /// `open == close`.
    Flat,
}

impl BarClass {
    /// Classifies one bar.
    #[inline]
    #[must_use]
    pub fn of(bar: &impl Ohlcv) -> Self {
        let (open, close) = (bar.open(), bar.close());

        if close > open {
            Self::Gain
        } else if open > close {
            Self::Loss
        } else {
            Self::Flat
        }
    }
}

/// Classifies every bar of `series`, in order.
#[must_use]
pub fn classify(series: &PriceSeries) -> Vec<BarClass> {
    series.bars().iter().map(BarClass::of).collect()
}

/// Drawing data for one bar: a high-low segment plus an open-close body.
///
/// Flat bars keep their high-low segment; their body has zero height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub high: Price,
    pub low: Price,
    pub open: Price,
    pub close: Price,
    pub class: BarClass,
    pub body_color: Color,
}

impl Candle {
    #[must_use]
    pub fn body_top(&self) -> Price {
        self.open.max(self.close)
    }

    #[must_use]
    pub fn body_bottom(&self) -> Price {
        self.open.min(self.close)
    }

    #[must_use]
    pub fn body_height(&self) -> Price {
        self.body_top() - self.body_bottom()
    }
}

/// Candlestick geometry for a whole series, one [`Candle`] per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleGeometry {
    candles: Vec<Candle>,
    body_width_ms: u64,
    wick_color: Color,
}

impl CandleGeometry {
    /// Lays out one candle per bar, colored by its [`BarClass`].
    #[must_use]
    pub fn new(series: &PriceSeries, style: &CandleStyle) -> Self {
        let candles = series
            .bars()
            .iter()
            .zip(classify(series))
            .map(|(bar, class)| Candle {
                timestamp: bar.timestamp,
                high: bar.high,
                low: bar.low,
                open: bar.open,
                close: bar.close,
                class,
                body_color: match class {
                    BarClass::Gain => style.gain_color.clone(),
                    BarClass::Loss => style.loss_color.clone(),
                    BarClass::Flat => style.wick_color.clone(),
                },
            })
            .collect();

        Self {
            candles,
            body_width_ms: style.body_width_ms,
            wick_color: style.wick_color.clone(),
        }
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    #[must_use]
    pub fn body_width_ms(&self) -> u64 {
        self.body_width_ms
    }

    #[must_use]
    pub fn wick_color(&self) -> &Color {
        &self.wick_color
    }

    /// Candles of one class, in bar order.
    pub fn of_class(&self, class: BarClass) -> impl Iterator<Item = &Candle> {
        self.candles.iter().filter(move |c| c.class == class)
    }
}
