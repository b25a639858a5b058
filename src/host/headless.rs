use tracing::trace;

use crate::core::{AxisScale, DataPoint, LinearScale, PixelPoint, PlotOffset, SurfaceGeometry};
use crate::error::{ChartError, ChartResult};
use crate::host::{AxisId, PlotBackend, PlotHandle, PlotSpec};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Deterministic in-process plotting backend.
///
/// Lays the plot area out inside the base surface (outer margin, left/right
/// label gutters, bottom tick band), emits the base `RenderFrame` to a
/// `Renderer` and hands back a handle answering coordinate queries.
#[derive(Debug)]
pub struct HeadlessPlot<R: Renderer> {
    surface: SurfaceGeometry,
    renderer: R,
    last_frame: Option<RenderFrame>,
}

impl<R: Renderer> HeadlessPlot<R> {
    #[must_use]
    pub fn new(surface: SurfaceGeometry, renderer: R) -> Self {
        Self {
            surface,
            renderer,
            last_frame: None,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> PlotBackend for HeadlessPlot<R> {
    type Handle = HeadlessPlotHandle;

    fn render(&mut self, spec: &PlotSpec) -> ChartResult<Self::Handle> {
        let handle = HeadlessPlotHandle::layout(self.surface, spec)?;
        let frame = build_base_frame(&handle, spec)?;
        self.renderer.render(&frame)?;
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "headless plot frame rendered"
        );
        self.last_frame = Some(frame);
        Ok(handle)
    }
}

/// Layout result of one `HeadlessPlot` render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessPlotHandle {
    surface: SurfaceGeometry,
    offset: PlotOffset,
    plot_width: f64,
    plot_height: f64,
    x_scale: LinearScale,
    rating_scale: AxisScale,
    rank_scale: AxisScale,
}

impl HeadlessPlotHandle {
    fn layout(surface: SurfaceGeometry, spec: &PlotSpec) -> ChartResult<Self> {
        let style = spec.style;
        let offset = PlotOffset {
            left: style.margin_px + style.rating_label_width_px,
            top: style.margin_px,
            right: style.margin_px + style.rank_label_width_px,
            bottom: style.margin_px + style.tick_band_height_px,
        };
        let plot_width = surface.display_width - offset.left - offset.right;
        let plot_height = surface.display_height - offset.top - offset.bottom;
        if !(plot_width > 0.0 && plot_height > 0.0) {
            return Err(ChartError::InvalidViewport {
                width: surface.display_width.max(0.0) as u32,
                height: surface.display_height.max(0.0) as u32,
            });
        }

        let rating_axis = spec.y_axis(AxisId::Rating);
        let rank_axis = spec.y_axis(AxisId::Rank);
        Ok(Self {
            surface,
            offset,
            plot_width,
            plot_height,
            x_scale: LinearScale::new(spec.x_axis.bounds.min, spec.x_axis.bounds.max)?,
            rating_scale: AxisScale::from_bounds(rating_axis.bounds, rating_axis.transform)?,
            rank_scale: AxisScale::from_bounds(rank_axis.bounds, rank_axis.transform)?,
        })
    }

    #[must_use]
    pub fn plot_size(&self) -> (f64, f64) {
        (self.plot_width, self.plot_height)
    }

    #[must_use]
    pub fn axis_scale(&self, axis: AxisId) -> AxisScale {
        match axis {
            AxisId::Rating => self.rating_scale,
            AxisId::Rank => self.rank_scale,
        }
    }
}

impl PlotHandle for HeadlessPlotHandle {
    fn point_offset(&self, point: DataPoint, axis: AxisId) -> ChartResult<PixelPoint> {
        let x = self.x_scale.domain_to_pixel(point.x, self.plot_width)?;
        let y = self
            .axis_scale(axis)
            .value_to_pixel(point.y, self.plot_height)?;
        Ok(PixelPoint::new(self.offset.left + x, self.offset.top + y))
    }

    fn plot_offset(&self) -> PlotOffset {
        self.offset
    }

    fn base_surface(&self) -> SurfaceGeometry {
        self.surface
    }
}

fn build_base_frame(handle: &HeadlessPlotHandle, spec: &PlotSpec) -> ChartResult<RenderFrame> {
    let style = spec.style;
    let ratio = handle.surface.backing_ratio();
    let left = handle.offset.left;
    let top = handle.offset.top;
    let right = left + handle.plot_width;
    let bottom = top + handle.plot_height;
    let mut frame = RenderFrame::new(handle.surface.backing_viewport());

    let area = |x: f64, y: f64, width: f64, height: f64, color: Color| {
        RectPrimitive::new(x * ratio, y * ratio, width * ratio, height * ratio, color)
    };
    let segment = |from: PixelPoint, to: PixelPoint, width: f64, color: Color| {
        LinePrimitive::new(
            from.x * ratio,
            from.y * ratio,
            to.x * ratio,
            to.y * ratio,
            width * ratio,
            color,
        )
    };

    frame
        .rects
        .push(area(left, top, handle.plot_width, handle.plot_height, style.background));

    for zone in &spec.zones {
        let upper = handle.point_offset(DataPoint::new(0.0, zone.to), AxisId::Rating)?;
        let lower = handle.point_offset(DataPoint::new(0.0, zone.from), AxisId::Rating)?;
        frame.rects.push(area(
            left,
            upper.y,
            handle.plot_width,
            lower.y - upper.y,
            zone.color,
        ));
    }

    for tick in &spec.x_axis.ticks {
        let x = left + handle.x_scale.domain_to_pixel(tick.x, handle.plot_width)?;
        frame.lines.push(segment(
            PixelPoint::new(x, top),
            PixelPoint::new(x, bottom),
            1.0,
            style.tick_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label.clone(),
            x * ratio,
            (bottom + 4.0) * ratio,
            style.font_size_px * ratio,
            style.label_color,
            TextHAlign::Center,
        ));
    }

    for axis in &spec.y_axes {
        let scale = handle.axis_scale(axis.id);
        for value in scale.ticks(style.y_tick_count) {
            let y = top + scale.value_to_pixel(value, handle.plot_height)?;
            let (x, align) = match axis.id {
                AxisId::Rating => (left - 4.0, TextHAlign::Right),
                AxisId::Rank => (right + 4.0, TextHAlign::Left),
            };
            frame.texts.push(TextPrimitive::new(
                format!("{value:.0}"),
                x * ratio,
                y * ratio,
                style.font_size_px * ratio,
                style.label_color,
                align,
            ));
        }
    }

    for series in &spec.series {
        let mut mapped = Vec::with_capacity(series.points.len());
        for point in &series.points {
            mapped.push(handle.point_offset(*point, series.axis)?);
        }
        for pair in mapped.windows(2) {
            frame.lines.push(segment(
                pair[0],
                pair[1],
                series.style.line_width,
                series.style.color,
            ));
        }
        let radius = series.style.point_radius;
        for center in &mapped {
            let mut marker = area(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
                series.style.point_fill,
            )
            .with_border(
                series.style.point_stroke_width * ratio,
                series.style.point_stroke,
            );
            marker.corner_radius = radius * ratio;
            frame.rects.push(marker);
        }
    }

    frame.rects.push(
        area(
            left,
            top,
            handle.plot_width,
            handle.plot_height,
            Color::rgba(0.0, 0.0, 0.0, 0.0),
        )
        .with_border(style.border_width * ratio, style.border_color),
    );

    frame.validate()?;
    Ok(frame)
}
