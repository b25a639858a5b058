use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::SurfaceGeometry;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, OverlayFactory, OverlaySurface, RenderFrame, Renderer,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer for the base chart frame.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_image_surface(width, height)?,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Verdana {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Transparent Cairo image surface used as the hover overlay.
#[derive(Debug)]
pub struct CairoOverlaySurface {
    surface: ImageSurface,
    geometry: SurfaceGeometry,
}

impl CairoOverlaySurface {
    pub fn new(geometry: SurfaceGeometry) -> ChartResult<Self> {
        let width = i32::try_from(geometry.backing_width)
            .map_err(|_| ChartError::InvalidData("overlay width exceeds i32".to_owned()))?;
        let height = i32::try_from(geometry.backing_height)
            .map_err(|_| ChartError::InvalidData("overlay height exceeds i32".to_owned()))?;
        Ok(Self {
            surface: create_image_surface(width, height)?,
            geometry,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    fn context(&self) -> ChartResult<Context> {
        Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
    }
}

impl OverlaySurface for CairoOverlaySurface {
    fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    fn clear(&mut self) -> ChartResult<()> {
        let context = self.context()?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear overlay", err))
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        let context = self.context()?;
        stroke_line(&context, line)
    }
}

#[derive(Debug, Default)]
pub struct CairoOverlayFactory;

impl OverlayFactory for CairoOverlayFactory {
    type Surface = CairoOverlaySurface;

    fn create(&mut self, base: SurfaceGeometry) -> ChartResult<Self::Surface> {
        CairoOverlaySurface::new(base)
    }
}

fn create_image_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    context.save().map_err(|err| map_backend_error("failed to save state", err))?;
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    match line.stroke_style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed { on_px, off_px } => context.set_dash(&[on_px, off_px], 0.0),
    }
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let stroked = context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err));
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore state", err))?;
    stroked
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: crate::render::RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
