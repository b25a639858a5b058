//! Boundary to the host plotting library, the upstream data source and the
//! page, plus headless reference implementations of each.

pub mod element_watch;
pub mod headless;
pub mod plot_spec;
pub mod source;
pub mod zones;

pub use element_watch::ElementWatch;
pub use headless::{HeadlessPlot, HeadlessPlotHandle};
pub use plot_spec::{
    AxisId, AxisSide, PlotSpec, PlotStyle, SeriesSpec, SeriesStyle, XAxisSpec, YAxisSpec,
};
pub use source::{
    RatingHistorySource, StaticSource, load_rating_history, parse_rating_history,
    profile_handle_from_path,
};
pub use zones::{RATING_TIERS, RatingTier, ZoneBand, tier_for_rating, visible_zone_bands};

#[cfg(feature = "http-source")]
pub use source::HttpSource;

use tracing::debug;

use crate::core::{AdaptedSeries, DataPoint, PixelPoint, PlotOffset, SurfaceGeometry};
use crate::error::{ChartError, ChartResult};

/// Plotting library entry point: lays out and draws a plot, returning a handle.
pub trait PlotBackend {
    type Handle: PlotHandle;

    fn render(&mut self, spec: &PlotSpec) -> ChartResult<Self::Handle>;
}

/// Read-only view of a rendered plot.
pub trait PlotHandle {
    /// Data coordinate -> base-surface display pixels, plot offset included.
    fn point_offset(&self, point: DataPoint, axis: AxisId) -> ChartResult<PixelPoint>;

    fn plot_offset(&self) -> PlotOffset;

    /// Geometry of the base surface the plot was drawn on.
    fn base_surface(&self) -> SurfaceGeometry;

    /// Whether the first layout pass has finished.
    fn layout_complete(&self) -> bool {
        true
    }
}

/// Owns the rendered plot and answers coordinate queries against it.
#[derive(Debug)]
pub struct ChartHost<H: PlotHandle> {
    style: PlotStyle,
    spec: Option<PlotSpec>,
    handle: Option<H>,
}

impl<H: PlotHandle> ChartHost<H> {
    #[must_use]
    pub fn new(style: PlotStyle) -> Self {
        Self {
            style,
            spec: None,
            handle: None,
        }
    }

    /// Builds the two-axis plot configuration for `series` and renders it.
    pub fn render<B>(&mut self, backend: &mut B, series: &AdaptedSeries) -> ChartResult<()>
    where
        B: PlotBackend<Handle = H>,
    {
        if series.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        let spec = PlotSpec::from_series(series, self.style);
        let handle = backend.render(&spec)?;
        debug!(
            points = series.len(),
            zones = spec.zones.len(),
            ticks = spec.x_axis.ticks.len(),
            "rendered rating chart"
        );
        self.spec = Some(spec);
        self.handle = Some(handle);
        Ok(())
    }

    #[must_use]
    pub fn spec(&self) -> Option<&PlotSpec> {
        self.spec.as_ref()
    }

    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Pure data -> pixel transform for the current render.
    pub fn to_pixel(&self, x: f64, y: f64, axis: AxisId) -> ChartResult<PixelPoint> {
        self.laid_out()?.point_offset(DataPoint::new(x, y), axis)
    }

    pub fn plot_offset(&self) -> ChartResult<PlotOffset> {
        Ok(self.laid_out()?.plot_offset())
    }

    pub fn base_surface(&self) -> ChartResult<SurfaceGeometry> {
        Ok(self.laid_out()?.base_surface())
    }

    fn laid_out(&self) -> ChartResult<&H> {
        match &self.handle {
            Some(handle) if handle.layout_complete() => Ok(handle),
            _ => Err(ChartError::LayoutPending),
        }
    }
}
