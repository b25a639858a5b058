use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::core::{AdaptedSeries, PixelPoint};
use crate::error::ChartResult;
use crate::host::{AxisId, ChartHost, PlotHandle};
use crate::render::{Color, LinePrimitive, LineStrokeStyle, OverlayFactory, OverlaySurface};

/// Stroke styling of the hover connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    pub vertical_color: Color,
    pub vertical_width: f64,
    pub link_color: Color,
    pub link_width: f64,
    pub link_dash_on_px: f64,
    pub link_dash_off_px: f64,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            vertical_color: Color::rgb8(0x8d, 0x8d, 0x8d),
            vertical_width: 1.0,
            link_color: Color::rgb8(0x66, 0x66, 0x66),
            link_width: 1.0,
            link_dash_on_px: 4.0,
            link_dash_off_px: 3.0,
        }
    }
}

/// The two segments tying the rating and rank points of one index together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Solid, spans `[min(y), max(y)]` of the two points at the rating x.
    pub vertical: LinePrimitive,
    /// Dashed, from the rating point to the rank point.
    pub link: LinePrimitive,
}

impl Connector {
    #[must_use]
    pub fn segments(&self) -> SmallVec<[LinePrimitive; 2]> {
        smallvec![self.vertical, self.link]
    }
}

/// Builds the connector in backing pixels from display-pixel positions.
#[must_use]
pub fn connector_geometry(
    rating: PixelPoint,
    rank: PixelPoint,
    backing_ratio: f64,
    style: &ConnectorStyle,
) -> Connector {
    let rating = rating.scaled(backing_ratio);
    let rank = rank.scaled(backing_ratio);
    let upper = rating.y.min(rank.y);
    let lower = rating.y.max(rank.y);

    Connector {
        vertical: LinePrimitive::new(
            rating.x,
            upper,
            rating.x,
            lower,
            style.vertical_width,
            style.vertical_color,
        ),
        link: LinePrimitive::new(
            rating.x,
            rating.y,
            rank.x,
            rank.y,
            style.link_width,
            style.link_color,
        )
        .with_stroke_style(LineStrokeStyle::Dashed {
            on_px: style.link_dash_on_px,
            off_px: style.link_dash_off_px,
        }),
    }
}

/// Single-slot hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

impl HoverState {
    #[must_use]
    pub fn current_index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Hovering(index) => Some(index),
        }
    }
}

/// What a hover or leave event did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Entered(usize),
    Moved { from: usize, to: usize },
    /// Same index as before; nothing was redrawn.
    Unchanged(usize),
    Cleared,
    /// Leave while already idle; the overlay was cleared again.
    AlreadyIdle,
}

/// Keeps the overlay connector in sync with the hovered series index.
pub struct HoverSyncEngine<F: OverlayFactory> {
    factory: F,
    overlay: Option<F::Surface>,
    state: HoverState,
    style: ConnectorStyle,
}

impl<F: OverlayFactory> HoverSyncEngine<F> {
    #[must_use]
    pub fn new(factory: F, style: ConnectorStyle) -> Self {
        Self {
            factory,
            overlay: None,
            state: HoverState::Idle,
            style,
        }
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        self.state
    }

    #[must_use]
    pub fn style(&self) -> ConnectorStyle {
        self.style
    }

    /// The overlay surface, once the first hover created it.
    #[must_use]
    pub fn overlay(&self) -> Option<&F::Surface> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Handles a hover event; `None` means no item is under the pointer.
    ///
    /// Indices outside `series` are treated like `None`.
    pub fn hover<H: PlotHandle>(
        &mut self,
        host: &ChartHost<H>,
        series: &AdaptedSeries,
        index: Option<usize>,
    ) -> ChartResult<HoverTransition> {
        let Some(index) = index else {
            return self.leave();
        };
        if self.state == HoverState::Hovering(index) {
            return Ok(HoverTransition::Unchanged(index));
        }
        let (Some(rating), Some(rank)) = (series.rating_at(index), series.rank_at(index)) else {
            trace!(index, len = series.len(), "hover index out of range");
            return self.leave();
        };

        let rating_px = host.to_pixel(rating.x, rating.y, AxisId::Rating)?;
        let rank_px = host.to_pixel(rank.x, rank.y, AxisId::Rank)?;
        let base = host.base_surface()?;

        let surface = match self.overlay.take() {
            Some(surface) => surface,
            None => {
                let surface = self.factory.create(base)?;
                debug!(
                    backing_width = base.backing_width,
                    backing_height = base.backing_height,
                    "created hover overlay surface"
                );
                surface
            }
        };
        let overlay = self.overlay.insert(surface);

        let ratio = overlay.geometry().backing_ratio();
        let connector = connector_geometry(rating_px, rank_px, ratio, &self.style);
        overlay.clear()?;
        for line in connector.segments() {
            if let Err(err) = overlay.stroke_line(&line) {
                self.state = HoverState::Idle;
                overlay.clear()?;
                return Err(err);
            }
        }

        let previous = std::mem::replace(&mut self.state, HoverState::Hovering(index));
        trace!(index, ?previous, "hover connector drawn");
        Ok(match previous {
            HoverState::Idle => HoverTransition::Entered(index),
            HoverState::Hovering(from) => HoverTransition::Moved { from, to: index },
        })
    }

    /// Clears the overlay and resets the hovered index.
    pub fn leave(&mut self) -> ChartResult<HoverTransition> {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.clear()?;
        }
        let previous = std::mem::take(&mut self.state);
        trace!(?previous, "hover cleared");
        Ok(match previous {
            HoverState::Hovering(_) => HoverTransition::Cleared,
            HoverState::Idle => HoverTransition::AlreadyIdle,
        })
    }
}

impl<F: OverlayFactory> std::fmt::Debug for HoverSyncEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoverSyncEngine")
            .field("overlay_created", &self.overlay.is_some())
            .field("state", &self.state)
            .field("style", &self.style)
            .finish()
    }
}
