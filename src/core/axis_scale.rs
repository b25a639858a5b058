use serde::{Deserialize, Serialize};

use crate::core::AxisBounds;
use crate::error::{ChartError, ChartResult};

/// Value transform applied before a vertical axis maps onto pixels.
///
/// `Negate` is applied on both the forward and the inverse mapping, so larger
/// raw values land lower on screen ("lower is better" reads as "higher").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisTransform {
    #[default]
    Identity,
    Negate,
}

impl AxisTransform {
    #[must_use]
    pub fn forward(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Negate => -value,
        }
    }

    #[must_use]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::Negate => -value,
        }
    }
}

/// Vertical axis model mapping raw values onto a top-down pixel span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    min: f64,
    max: f64,
    #[serde(default)]
    transform: AxisTransform,
}

impl AxisScale {
    /// Creates a direct (non-transformed) axis.
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        Self::with_transform(min, max, AxisTransform::Identity)
    }

    pub fn with_transform(min: f64, max: f64, transform: AxisTransform) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(ChartError::InvalidData(
                "axis domain must be finite and non-zero".to_owned(),
            ));
        }
        Ok(Self {
            min: min.min(max),
            max: min.max(max),
            transform,
        })
    }

    pub fn from_bounds(bounds: AxisBounds, transform: AxisTransform) -> ChartResult<Self> {
        Self::with_transform(bounds.min, bounds.max, transform)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn transform(self) -> AxisTransform {
        self.transform
    }

    /// Returns whether larger values are drawn lower on screen.
    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.transform == AxisTransform::Negate
    }

    /// Maps a raw value to a pixel offset from the top of a span of `height_px`.
    pub fn value_to_pixel(self, value: f64, height_px: f64) -> ChartResult<f64> {
        validate_height(height_px)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("axis value must be finite".to_owned()));
        }

        let (top, scale) = self.transformed_frame(height_px);
        Ok((top - self.transform.forward(value)) * scale)
    }

    /// Maps a pixel offset from the top of the span back to a raw value.
    pub fn pixel_to_value(self, pixel: f64, height_px: f64) -> ChartResult<f64> {
        validate_height(height_px)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let (top, scale) = self.transformed_frame(height_px);
        Ok(self.transform.inverse(top - pixel / scale))
    }

    /// Evenly spaced raw values from `min` to `max` inclusive.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        match tick_count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let denominator = (tick_count - 1) as f64;
                (0..tick_count)
                    .map(|index| self.min + (self.max - self.min) * (index as f64) / denominator)
                    .collect()
            }
        }
    }

    fn transformed_frame(self, height_px: f64) -> (f64, f64) {
        let t_min = self.transform.forward(self.min);
        let t_max = self.transform.forward(self.max);
        let top = t_min.max(t_max);
        let scale = height_px / (t_max - t_min).abs();
        (top, scale)
    }
}

fn validate_height(height_px: f64) -> ChartResult<()> {
    if !height_px.is_finite() || height_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "axis pixel height must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, AxisTransform};

    #[test]
    fn direct_axis_draws_larger_values_higher() {
        let scale = AxisScale::new(1300.0, 1600.0).expect("scale");
        let low = scale.value_to_pixel(1300.0, 300.0).expect("low");
        let high = scale.value_to_pixel(1600.0, 300.0).expect("high");
        assert_eq!(low, 300.0);
        assert_eq!(high, 0.0);
    }

    #[test]
    fn negated_axis_draws_best_rank_at_top() {
        let scale = AxisScale::with_transform(0.0, 330.0, AxisTransform::Negate).expect("scale");
        assert!(scale.is_inverted());
        assert_eq!(scale.value_to_pixel(0.0, 330.0).expect("top"), 0.0);
        assert_eq!(scale.value_to_pixel(330.0, 330.0).expect("bottom"), 330.0);
        assert_eq!(scale.value_to_pixel(120.0, 330.0).expect("mid"), 120.0);
    }

    #[test]
    fn ticks_include_both_ends() {
        let scale = AxisScale::new(0.0, 100.0).expect("scale");
        assert_eq!(scale.ticks(3), vec![0.0, 50.0, 100.0]);
        assert!(scale.ticks(0).is_empty());
    }
}
