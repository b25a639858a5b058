pub mod axis_scale;
pub mod primitives;
pub mod rating_event;
pub mod scale;
pub mod series_adapter;
pub mod types;

pub use axis_scale::{AxisScale, AxisTransform};
pub use rating_event::RatingEvent;
pub use scale::LinearScale;
pub use series_adapter::{
    AdaptedSeries, AxisBounds, AxisTick, SeriesAdapter, SeriesAdapterConfig, XAxisMode,
    rank_bounds, rating_bounds, tick_indices,
};
pub use types::{DataPoint, PageViewport, PixelPoint, PlotOffset, SurfaceGeometry, Viewport};
