//! Chart style configuration.
//!
//! Loads rendering hints from TOML. Indicator windows are fixed and are not
//! part of the configuration.

use std::{f64::consts::FRAC_PI_4, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{ChartError, ClickPolicy, Color};

/// Root style configuration.
///
/// Every section and field is optional in TOML; missing values keep their
/// defaults.
///
/// # Example
///
/// ```
/// use chart_overlays::ChartStyle;
///
/// let style = ChartStyle::from_toml_str(
///     r#"
///     [candles]
///     gain_color = "teal"
///
///     [figure]
///     width_px = 1200
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(style.candles.gain_color.as_str(), "teal");
/// assert_eq!(style.candles.loss_color.as_str(), "#ff0000");
/// assert_eq!(style.figure.width_px, 1200);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub candles: CandleStyle,
    pub figure: FigureHints,
    pub legend: LegendHints,
}

/// Candlestick colors and body width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleStyle {
    /// Body color when close > open.
    pub gain_color: Color,
    /// Body color when open > close.
    pub loss_color: Color,
    /// High-low segment color, also used for flat bodies.
    pub wick_color: Color,
    /// Body width in milliseconds of the time axis.
    pub body_width_ms: u64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            gain_color: Color::named("#00ff00"),
            loss_color: Color::named("#ff0000"),
            wick_color: Color::BLACK,
            // half a trading day
            body_width_ms: 12 * 60 * 60 * 1000,
        }
    }
}

/// Figure-level hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureHints {
    pub width_px: u32,
    pub grid_alpha: f64,
    /// X-axis label rotation in radians.
    pub x_label_rotation: f64,
}

impl Default for FigureHints {
    fn default() -> Self {
        Self {
            width_px: 1000,
            grid_alpha: 0.3,
            x_label_rotation: FRAC_PI_4,
        }
    }
}

/// Where the legend sits inside the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLocation {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendHints {
    pub location: LegendLocation,
    pub click_policy: ClickPolicy,
}

impl ChartStyle {
    /// Loads a style from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ChartError::Io`] if the file cannot be read,
    /// [`ChartError::Config`] if it is not valid style TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChartError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a style from TOML text.
    ///
    /// # Errors
    ///
    /// [`ChartError::Config`] if the text is not valid style TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ChartError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let style = ChartStyle::default();
        assert_eq!(style.candles.gain_color.as_str(), "#00ff00");
        assert_eq!(style.candles.loss_color.as_str(), "#ff0000");
        assert_eq!(style.candles.wick_color, Color::BLACK);
        assert_eq!(style.candles.body_width_ms, 43_200_000);
        assert_eq!(style.figure.width_px, 1000);
        assert_eq!(style.figure.grid_alpha, 0.3);
        assert_eq!(style.legend.location, LegendLocation::TopLeft);
        assert_eq!(style.legend.click_policy, ClickPolicy::Hide);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ChartStyle::from_toml_str("").unwrap(), ChartStyle::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let style = ChartStyle::from_toml_str(
            r#"
            [legend]
            location = "bottom_right"
            click_policy = "mute"
            "#,
        )
        .unwrap();
        assert_eq!(style.legend.location, LegendLocation::BottomRight);
        assert_eq!(style.legend.click_policy, ClickPolicy::Mute);
        assert_eq!(style.figure, FigureHints::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let result = ChartStyle::from_toml_str("[figure]\nwidth_px = \"wide\"");
        assert!(matches!(result, Err(ChartError::Config(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ChartStyle::load("/nonexistent/chart-style.toml");
        assert!(matches!(result, Err(ChartError::Io(_))));
    }

    #[test]
    fn round_trips_through_toml() {
        let style = ChartStyle::default();
        let text = toml::to_string(&style).unwrap();
        assert_eq!(ChartStyle::from_toml_str(&text).unwrap(), style);
    }
}
