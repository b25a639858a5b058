use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Backing-store size of a drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One `(x, y)` sample of a coordinate series in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position in CSS (display) pixels relative to the base surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiplies both coordinates by `ratio` (display px -> backing px).
    #[must_use]
    pub fn scaled(self, ratio: f64) -> Self {
        Self {
            x: self.x * ratio,
            y: self.y * ratio,
        }
    }
}

/// Offset of the plot content area inside the base surface, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotOffset {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Size of a drawing surface on screen and in its backing store.
///
/// `display_*` is the laid-out size in CSS pixels, `backing_*` the number of
/// device pixels the surface actually draws into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    pub display_width: f64,
    pub display_height: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl SurfaceGeometry {
    /// Builds the geometry of a surface laid out at `display_*` CSS pixels on a
    /// screen with the given device pixel ratio.
    pub fn with_pixel_ratio(
        display_width: f64,
        display_height: f64,
        pixel_ratio: f64,
    ) -> ChartResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        if !display_width.is_finite()
            || !display_height.is_finite()
            || display_width < 1.0
            || display_height < 1.0
        {
            return Err(ChartError::InvalidViewport {
                width: display_width.max(0.0) as u32,
                height: display_height.max(0.0) as u32,
            });
        }

        Ok(Self {
            display_width,
            display_height,
            backing_width: (display_width * pixel_ratio).round() as u32,
            backing_height: (display_height * pixel_ratio).round() as u32,
        })
    }

    /// Ratio between backing and display width; `1.0` on standard-density screens.
    #[must_use]
    pub fn backing_ratio(self) -> f64 {
        if self.display_width <= 0.0 {
            return 1.0;
        }
        f64::from(self.backing_width) / self.display_width
    }

    #[must_use]
    pub fn backing_viewport(self) -> Viewport {
        Viewport::new(self.backing_width, self.backing_height)
    }
}

/// Size of the page viewport the detail panel must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageViewport {
    pub width: f64,
    pub height: f64,
}

impl PageViewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
