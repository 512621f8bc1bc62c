//! Labeled numeric series handed to the rendering layer.

use std::{borrow::Cow, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{Price, Timestamp};

/// Display color: a CSS color name or `#rrggbb` hex string.
///
/// The core never interprets it; the rendering layer does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const PURPLE: Color = Color::named("purple");
    pub const BLUE: Color = Color::named("blue");
    pub const RED: Color = Color::named("red");
    pub const ORANGE: Color = Color::named("orange");
    pub const BROWN: Color = Color::named("brown");
    pub const GREEN: Color = Color::named("green");
    pub const GRAY: Color = Color::named("gray");
    pub const BLACK: Color = Color::named("black");

    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// One point per bar, joined into a polyline.
    Line,
    /// A single straight segment between two points.
    Segment,
    /// One side of an envelope drawn around price; one point per bar.
    BandPair,
}

/// What clicking a legend entry does to its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPolicy {
    /// Toggle visibility.
    #[default]
    Hide,
    /// Dim the series.
    Mute,
    /// Legend entries are inert.
    None,
}

/// Rendering hints passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StyleHints {
    pub click_policy: ClickPolicy,
}

/// One drawn point. `value` is `None` during an indicator's warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: Timestamp,
    pub value: Option<Price>,
}

/// A named, colored series of points ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    label: Cow<'static, str>,
    kind: SeriesKind,
    points: Vec<SeriesPoint>,
    color: Color,
    style: StyleHints,
}

impl LabeledSeries {
    #[must_use]
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        kind: SeriesKind,
        points: Vec<SeriesPoint>,
        color: Color,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            points,
            color,
            style: StyleHints::default(),
        }
    }

    /// Replaces the style hints.
    #[must_use]
    pub fn with_style(mut self, style: StyleHints) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn color(&self) -> &Color {
        &self.color
    }

    #[must_use]
    pub fn style(&self) -> StyleHints {
        self.style
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point values in order, `None` where undefined.
    #[must_use]
    pub fn values(&self) -> Vec<Option<Price>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of points carrying a value.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }
}
