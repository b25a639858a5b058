use crate::core::SurfaceGeometry;
use crate::error::{ChartError, ChartResult};
use crate::render::LinePrimitive;

/// Transparent drawing layer stacked exactly over the base chart surface.
///
/// Coordinates passed to `stroke_line` are backing-store pixels.
pub trait OverlaySurface {
    fn geometry(&self) -> SurfaceGeometry;

    /// Erases everything previously drawn on the surface.
    fn clear(&mut self) -> ChartResult<()>;

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()>;
}

/// Creates the overlay surface the first time it is needed.
pub trait OverlayFactory {
    type Surface: OverlaySurface;

    /// Builds a surface matching `base` in both display and backing size.
    fn create(&mut self, base: SurfaceGeometry) -> ChartResult<Self::Surface>;
}

/// In-memory overlay that keeps the primitives currently drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    geometry: SurfaceGeometry,
    lines: Vec<LinePrimitive>,
    clear_count: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            geometry,
            lines: Vec::new(),
            clear_count: 0,
        }
    }

    /// Lines drawn since the last clear.
    #[must_use]
    pub fn lines(&self) -> &[LinePrimitive] {
        &self.lines
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

impl OverlaySurface for RecordingSurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.lines.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        let bounds_w = f64::from(self.geometry.backing_width);
        let bounds_h = f64::from(self.geometry.backing_height);
        if bounds_w <= 0.0 || bounds_h <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.geometry.backing_width,
                height: self.geometry.backing_height,
            });
        }
        self.lines.push(*line);
        Ok(())
    }
}

/// Factory producing `RecordingSurface`s; counts how many were created.
#[derive(Debug, Default)]
pub struct RecordingOverlayFactory {
    created: usize,
}

impl RecordingOverlayFactory {
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }
}

impl OverlayFactory for RecordingOverlayFactory {
    type Surface = RecordingSurface;

    fn create(&mut self, base: SurfaceGeometry) -> ChartResult<Self::Surface> {
        self.created += 1;
        Ok(RecordingSurface::new(base))
    }
}
