mod chart_config;

pub use chart_config::{DEFAULT_API_BASE_URL, RatingChartConfig};

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{AdaptedSeries, PageViewport, RatingEvent, SeriesAdapter};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartHost, PlotBackend, PlotHandle};
use crate::interaction::{
    DetailPanel, HoverEvent, HoverState, HoverSyncEngine, HoverTransition, PanelContent,
    PanelLayout, PlotEvents, place_panel,
};
use crate::render::OverlayFactory;

/// A rendered rating/rank chart with its hover connector and detail panel.
pub struct RatingChart<H: PlotHandle, F: OverlayFactory, P: DetailPanel> {
    events: Vec<RatingEvent>,
    series: AdaptedSeries,
    host: ChartHost<H>,
    hover: HoverSyncEngine<F>,
    panel: P,
    panel_layout: PanelLayout,
    page_viewport: PageViewport,
}

impl<H: PlotHandle, F: OverlayFactory, P: DetailPanel> RatingChart<H, F, P> {
    /// Adapts `events`, renders them through `backend` and prepares hover handling.
    ///
    /// Fails with `ChartError::EmptySeries` when there is nothing to plot.
    pub fn new<B>(
        config: &RatingChartConfig,
        events: Vec<RatingEvent>,
        backend: &mut B,
        overlay_factory: F,
        panel: P,
        page_viewport: PageViewport,
    ) -> ChartResult<Self>
    where
        B: PlotBackend<Handle = H>,
    {
        let config = config.clone().validate()?;
        let series = SeriesAdapter::new(config.adapter)?.adapt(&events)?;
        let mut host = ChartHost::new(config.plot);
        host.render(backend, &series)?;
        debug!(events = events.len(), "rating chart ready");

        Ok(Self {
            events,
            series,
            host,
            hover: HoverSyncEngine::new(overlay_factory, config.connector),
            panel,
            panel_layout: config.panel,
            page_viewport,
        })
    }

    #[must_use]
    pub fn events(&self) -> &[RatingEvent] {
        &self.events
    }

    #[must_use]
    pub fn series(&self) -> &AdaptedSeries {
        &self.series
    }

    #[must_use]
    pub fn host(&self) -> &ChartHost<H> {
        &self.host
    }

    #[must_use]
    pub fn hover_engine(&self) -> &HoverSyncEngine<F> {
        &self.hover
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    #[must_use]
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Tears the chart down and hands the panel back for the next render.
    ///
    /// The panel is hidden first so a stale detail never outlives its chart.
    pub fn into_panel(mut self) -> ChartResult<P> {
        self.hover.leave()?;
        self.panel.hide()?;
        Ok(self.panel)
    }

    pub fn set_page_viewport(&mut self, page_viewport: PageViewport) {
        self.page_viewport = page_viewport;
    }

    /// Syncs the connector and the panel with a hover event.
    pub fn handle_hover(&mut self, event: Option<HoverEvent>) -> ChartResult<HoverTransition> {
        let transition = self
            .hover
            .hover(&self.host, &self.series, event.map(|hovered| hovered.data_index))?;

        match (event, self.hover.state()) {
            (Some(hovered), HoverState::Hovering(index)) if hovered.data_index == index => {
                let event = self.events.get(index).ok_or(ChartError::IndexOutOfRange {
                    index,
                    len: self.events.len(),
                })?;
                let content = PanelContent::from_event(event)?;
                let placement = place_panel(
                    hovered.page_x,
                    hovered.page_y,
                    self.page_viewport,
                    &self.panel_layout,
                );
                self.panel.show(placement, &content)?;
            }
            _ => self.panel.hide()?,
        }
        Ok(transition)
    }

    /// Pointer left the chart: clear the connector and hide the panel.
    pub fn handle_leave(&mut self) -> ChartResult<HoverTransition> {
        let transition = self.hover.leave()?;
        self.panel.hide()?;
        Ok(transition)
    }
}

impl<H, F, P> RatingChart<H, F, P>
where
    H: PlotHandle + 'static,
    F: OverlayFactory + 'static,
    P: DetailPanel + 'static,
{
    /// Registers hover and leave callbacks on `events` that drive `chart`.
    ///
    /// Callback errors cannot propagate, so they are logged.
    pub fn bind<E: PlotEvents + ?Sized>(chart: &Rc<RefCell<Self>>, events: &mut E) {
        let on_hover = Rc::clone(chart);
        events.on_hover(Box::new(move |event| {
            let Ok(mut chart) = on_hover.try_borrow_mut() else {
                warn!("hover event dropped: chart is busy");
                return;
            };
            if let Err(err) = chart.handle_hover(event) {
                warn!(error = %err, "hover handling failed");
            }
        }));

        let on_leave = Rc::clone(chart);
        events.on_leave(Box::new(move || {
            let Ok(mut chart) = on_leave.try_borrow_mut() else {
                warn!("leave event dropped: chart is busy");
                return;
            };
            if let Err(err) = chart.handle_leave() {
                warn!(error = %err, "leave handling failed");
            }
        }));
    }
}

impl<H: PlotHandle, F: OverlayFactory, P: DetailPanel> std::fmt::Debug for RatingChart<H, F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingChart")
            .field("events", &self.events.len())
            .field("hover", &self.hover)
            .field("page_viewport", &self.page_viewport)
            .finish()
    }
}
