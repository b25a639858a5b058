use serde::{Deserialize, Serialize};

use crate::core::{AdaptedSeries, AxisBounds, AxisTick, AxisTransform, DataPoint};
use crate::host::zones::{ZoneBand, visible_zone_bands};
use crate::render::Color;

/// Identifies one of the two vertical axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisId {
    /// Left axis, direct scale.
    Rating,
    /// Right axis, negated scale.
    Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

/// Line-and-marker styling for one plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub line_width: f64,
    pub point_radius: f64,
    pub point_fill: Color,
    pub point_stroke: Color,
    pub point_stroke_width: f64,
}

/// Visual configuration of the base chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub rating_series: SeriesStyle,
    pub rank_series: SeriesStyle,
    pub background: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub tick_color: Color,
    pub label_color: Color,
    pub font_size_px: f64,
    /// Outer margin around the whole plot, in CSS pixels.
    pub margin_px: f64,
    pub rating_label_width_px: f64,
    pub rank_label_width_px: f64,
    pub tick_band_height_px: f64,
    /// Y-axis label count drawn by the headless backend.
    pub y_tick_count: usize,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            rating_series: SeriesStyle {
                color: Color::rgb8(0xff, 0xc8, 0x43),
                line_width: 1.5,
                point_radius: 3.0,
                point_fill: Color::rgb8(0xff, 0xff, 0xff),
                point_stroke: Color::rgb8(0x00, 0x00, 0x00),
                point_stroke_width: 1.2,
            },
            rank_series: SeriesStyle {
                color: Color {
                    alpha: 0.5,
                    ..Color::rgb8(0x4d, 0x8f, 0xd6)
                },
                line_width: 1.0,
                point_radius: 3.0,
                point_fill: Color::rgb8(0xff, 0xff, 0xff),
                point_stroke: Color::rgb8(0x4d, 0x8f, 0xd6),
                point_stroke_width: 1.0,
            },
            background: Color::rgb8(0xff, 0xff, 0xff),
            border_width: 1.0,
            border_color: Color::rgb8(0xbf, 0xbf, 0xbf),
            tick_color: Color::rgb8(0xcf, 0xcf, 0xcf),
            label_color: Color::rgb8(0x54, 0x54, 0x54),
            font_size_px: 11.0,
            margin_px: 4.0,
            rating_label_width_px: 48.0,
            rank_label_width_px: 42.0,
            tick_band_height_px: 20.0,
            y_tick_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub axis: AxisId,
    pub points: Vec<DataPoint>,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisSpec {
    pub bounds: AxisBounds,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisSpec {
    pub id: AxisId,
    pub side: AxisSide,
    pub bounds: AxisBounds,
    pub transform: AxisTransform,
    pub label_width_px: f64,
}

/// Everything the plotting backend needs to lay out and draw the base chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub series: Vec<SeriesSpec>,
    pub x_axis: XAxisSpec,
    pub y_axes: [YAxisSpec; 2],
    pub zones: Vec<ZoneBand>,
    pub style: PlotStyle,
}

impl PlotSpec {
    /// Two-axis configuration: rating on the left (direct), rank on the right
    /// (negated), tier zones shaded against the rating axis.
    #[must_use]
    pub fn from_series(series: &AdaptedSeries, style: PlotStyle) -> Self {
        Self {
            series: vec![
                SeriesSpec {
                    axis: AxisId::Rating,
                    points: series.rating.clone(),
                    style: style.rating_series,
                },
                SeriesSpec {
                    axis: AxisId::Rank,
                    points: series.rank.clone(),
                    style: style.rank_series,
                },
            ],
            x_axis: XAxisSpec {
                bounds: series.x_bounds,
                ticks: series.ticks.clone(),
            },
            y_axes: [
                YAxisSpec {
                    id: AxisId::Rating,
                    side: AxisSide::Left,
                    bounds: series.rating_bounds,
                    transform: AxisTransform::Identity,
                    label_width_px: style.rating_label_width_px,
                },
                YAxisSpec {
                    id: AxisId::Rank,
                    side: AxisSide::Right,
                    bounds: series.rank_bounds,
                    transform: AxisTransform::Negate,
                    label_width_px: style.rank_label_width_px,
                },
            ],
            zones: visible_zone_bands(series.rating_bounds),
            style,
        }
    }

    #[must_use]
    pub fn y_axis(&self, id: AxisId) -> &YAxisSpec {
        match id {
            AxisId::Rating => &self.y_axes[0],
            AxisId::Rank => &self.y_axes[1],
        }
    }
}
