use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Base-chart scene handed to a `Renderer` in one pass.
///
/// Backends paint `rects` first (background, zone bands, point markers,
/// border), then `lines`, then `texts`. All coordinates are backing pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len() + self.lines.len() + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    /// Rejects a zero-sized target or any non-finite primitive.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.rects.iter().try_for_each(|rect| rect.validate())?;
        self.lines.iter().try_for_each(|line| line.validate())?;
        self.texts.iter().try_for_each(TextPrimitive::validate)
    }
}
