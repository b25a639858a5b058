mod frame;
mod null_renderer;
mod overlay;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use overlay::{OverlayFactory, OverlaySurface, RecordingOverlayFactory, RecordingSurface};
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any base-chart rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from layout and hover logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoContextRenderer, CairoOverlayFactory, CairoOverlaySurface, CairoRenderStats,
    CairoRenderer,
};
