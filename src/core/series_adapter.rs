use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::short_date_label;
use crate::core::{DataPoint, RatingEvent};
use crate::error::{ChartError, ChartResult};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How x-values are derived from the event sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum XAxisMode {
    /// `x = index`; every event gets the same horizontal spacing.
    #[default]
    IndexSpaced,
    /// `x = timestamp seconds`; spacing follows wall-clock time.
    TimeSpaced,
}

/// Inclusive `{min, max}` of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// One labelled x-axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub index: usize,
    pub x: f64,
    pub label: String,
}

/// Tuning for series adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesAdapterConfig {
    pub mode: XAxisMode,
    /// Upper bound on the number of evenly spaced tick labels (the last point is always added).
    pub tick_target: usize,
    /// Padding added below the lowest and above the highest rating before rounding.
    pub rating_padding: i32,
    /// Rating bounds are rounded outward to multiples of this step.
    pub rating_step: i32,
    /// Headroom above the worst rank, in percent.
    pub rank_headroom_percent: u32,
}

impl Default for SeriesAdapterConfig {
    fn default() -> Self {
        Self {
            mode: XAxisMode::IndexSpaced,
            tick_target: 6,
            rating_padding: 50,
            rating_step: 100,
            rank_headroom_percent: 10,
        }
    }
}

impl SeriesAdapterConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.tick_target == 0 {
            return Err(ChartError::InvalidData(
                "tick target must be > 0".to_owned(),
            ));
        }
        if self.rating_step <= 0 {
            return Err(ChartError::InvalidData(
                "rating step must be > 0".to_owned(),
            ));
        }
        if self.rating_padding < 0 {
            return Err(ChartError::InvalidData(
                "rating padding must be >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Output of one adaptation pass: both coordinate series plus derived axis data.
///
/// `rating[i]` and `rank[i]` always describe `events[i]` and share the same x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptedSeries {
    pub mode: XAxisMode,
    pub rating: Vec<DataPoint>,
    pub rank: Vec<DataPoint>,
    pub rating_bounds: AxisBounds,
    pub rank_bounds: AxisBounds,
    pub x_bounds: AxisBounds,
    pub ticks: Vec<AxisTick>,
}

impl AdaptedSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rating.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rating.is_empty()
    }

    #[must_use]
    pub fn rating_at(&self, index: usize) -> Option<DataPoint> {
        self.rating.get(index).copied()
    }

    #[must_use]
    pub fn rank_at(&self, index: usize) -> Option<DataPoint> {
        self.rank.get(index).copied()
    }
}

/// Turns rating events into the two aligned coordinate series the chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesAdapter {
    config: SeriesAdapterConfig,
}

impl SeriesAdapter {
    pub fn new(config: SeriesAdapterConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn config(&self) -> SeriesAdapterConfig {
        self.config
    }

    pub fn adapt(&self, events: &[RatingEvent]) -> ChartResult<AdaptedSeries> {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return Err(ChartError::EmptySeries);
        };

        let mut rating = Vec::with_capacity(events.len());
        let mut rank = Vec::with_capacity(events.len());
        let mut min_rating = first.new_rating;
        let mut max_rating = first.new_rating;
        let mut max_rank = first.rank;

        for (index, event) in events.iter().enumerate() {
            event.validate()?;
            let x = self.x_value(index, event);
            rating.push(DataPoint::new(x, f64::from(event.new_rating)));
            rank.push(DataPoint::new(x, f64::from(event.rank)));
            min_rating = min_rating.min(event.old_rating.min(event.new_rating));
            max_rating = max_rating.max(event.old_rating.max(event.new_rating));
            max_rank = max_rank.max(event.rank);
        }

        let rating_bounds = rating_bounds(
            min_rating,
            max_rating,
            self.config.rating_padding,
            self.config.rating_step,
        );
        let rank_bounds = rank_bounds(max_rank, self.config.rank_headroom_percent);
        let x_bounds = match self.config.mode {
            XAxisMode::IndexSpaced => AxisBounds::new(-0.5, events.len() as f64 - 0.5),
            XAxisMode::TimeSpaced => time_x_bounds(
                first.timestamp_seconds,
                last.timestamp_seconds,
                events.len(),
            ),
        };

        let mut ticks = Vec::new();
        for index in tick_indices(events.len(), self.config.tick_target) {
            let event = &events[index];
            ticks.push(AxisTick {
                index,
                x: self.x_value(index, event),
                label: short_date_label(event.timestamp_seconds)?,
            });
        }

        debug!(
            points = events.len(),
            mode = ?self.config.mode,
            rating_min = rating_bounds.min,
            rating_max = rating_bounds.max,
            rank_max = rank_bounds.max,
            ticks = ticks.len(),
            "adapted rating history"
        );

        Ok(AdaptedSeries {
            mode: self.config.mode,
            rating,
            rank,
            rating_bounds,
            rank_bounds,
            x_bounds,
            ticks,
        })
    }

    fn x_value(&self, index: usize, event: &RatingEvent) -> f64 {
        match self.config.mode {
            XAxisMode::IndexSpaced => index as f64,
            XAxisMode::TimeSpaced => event.timestamp_seconds as f64,
        }
    }
}

/// Pads the observed rating range and rounds it outward to multiples of `step`.
#[must_use]
pub fn rating_bounds(min_rating: i32, max_rating: i32, padding: i32, step: i32) -> AxisBounds {
    let step = i64::from(step.max(1));
    let low = i64::from(min_rating) - i64::from(padding);
    let high = i64::from(max_rating) + i64::from(padding);
    let min = low.div_euclid(step) * step;
    let max = -((-high).div_euclid(step)) * step;
    AxisBounds::new(min as f64, max as f64)
}

/// `[0, ceil(max_rank * (100 + headroom) / 100)]`, computed without float rounding.
#[must_use]
pub fn rank_bounds(max_rank: u32, headroom_percent: u32) -> AxisBounds {
    let scaled = u64::from(max_rank) * (100 + u64::from(headroom_percent));
    let max = scaled.div_ceil(100);
    AxisBounds::new(0.0, max as f64)
}

/// Evenly spaced tick indices (`step = max(1, ceil(n / target))`) plus the final index.
#[must_use]
pub fn tick_indices(len: usize, target: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let step = len.div_ceil(target.max(1)).max(1);
    (0..len)
        .filter(|index| index % step == 0 || *index == len - 1)
        .collect()
}

fn time_x_bounds(first: i64, last: i64, len: usize) -> AxisBounds {
    let first = first as f64;
    let last = last as f64;
    let span = last - first;
    let half_gap = if len > 1 && span > 0.0 {
        span / (len - 1) as f64 / 2.0
    } else {
        SECONDS_PER_DAY
    };
    AxisBounds::new(first - half_gap, last + half_gap)
}

#[cfg(test)]
mod tests {
    use super::{rank_bounds, rating_bounds, tick_indices};

    #[test]
    fn rating_bounds_round_outward_after_padding() {
        let bounds = rating_bounds(1400, 1500, 50, 100);
        assert_eq!((bounds.min, bounds.max), (1300.0, 1600.0));
    }

    #[test]
    fn rating_bounds_handle_values_on_step_boundaries() {
        let bounds = rating_bounds(1450, 1450, 50, 100);
        assert_eq!((bounds.min, bounds.max), (1400.0, 1500.0));
        let negative = rating_bounds(-20, 10, 50, 100);
        assert_eq!((negative.min, negative.max), (-100.0, 100.0));
    }

    #[test]
    fn rank_bounds_add_ten_percent_headroom() {
        assert_eq!(rank_bounds(300, 10).max, 330.0);
        assert_eq!(rank_bounds(1, 10).max, 2.0);
        assert_eq!(rank_bounds(7, 10).min, 0.0);
    }

    #[test]
    fn tick_indices_keep_last_point() {
        assert_eq!(tick_indices(1, 6), vec![0]);
        assert_eq!(tick_indices(6, 6), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(tick_indices(14, 6), vec![0, 3, 6, 9, 12, 13]);
        assert!(tick_indices(0, 6).is_empty());
    }
}
