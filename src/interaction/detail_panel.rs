use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::primitives::short_date_label;
use crate::core::{PageViewport, RatingEvent};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Assumed on-screen size of the floating panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelFootprint {
    pub width: f64,
    pub height: f64,
}

impl Default for PanelFootprint {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 100.0,
        }
    }
}

/// Placement rule constants for the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    pub footprint: PanelFootprint,
    /// Horizontal gap between the pointer and the panel edge.
    pub pointer_gap_px: f64,
    /// The panel's top sits this far above the pointer.
    pub pointer_lift_px: f64,
    pub bottom_margin_px: f64,
    pub top_margin_px: f64,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            footprint: PanelFootprint::default(),
            pointer_gap_px: 15.0,
            pointer_lift_px: 10.0,
            bottom_margin_px: 10.0,
            top_margin_px: 10.0,
        }
    }
}

/// Page-space top-left corner of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub left: f64,
    pub top: f64,
    /// The panel was moved to the pointer's left side.
    pub flipped: bool,
}

/// Clamps the panel next to the pointer without leaving the viewport.
///
/// There is no lower horizontal clamp: on a viewport narrower than the
/// panel plus gaps, `left` may become negative.
#[must_use]
pub fn place_panel(
    page_x: f64,
    page_y: f64,
    viewport: PageViewport,
    layout: &PanelLayout,
) -> PanelPlacement {
    let PanelFootprint { width, height } = layout.footprint;

    let mut left = page_x + layout.pointer_gap_px;
    let mut top = page_y - layout.pointer_lift_px;
    let mut flipped = false;

    if left + width > viewport.width {
        left = page_x - width - layout.pointer_gap_px;
        flipped = true;
    }
    if top + height > viewport.height {
        top = viewport.height - height - layout.bottom_margin_px;
    }
    if top < 0.0 {
        top = layout.top_margin_px;
    }

    PanelPlacement { left, top, flipped }
}

/// Sign class of a rating change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaTone {
    Improvement,
    Regression,
    Neutral,
}

impl DeltaTone {
    #[must_use]
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            1 => Self::Improvement,
            -1 => Self::Regression,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Improvement => Color::rgb8(0x00, 0xaa, 0x00),
            Self::Regression => Color::rgb8(0xff, 0x00, 0x00),
            Self::Neutral => Color::rgb8(0x88, 0x88, 0x88),
        }
    }
}

/// Text shown in the detail panel for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelContent {
    pub contest_name: String,
    pub date: String,
    pub rank: u32,
    pub old_rating: i32,
    pub new_rating: i32,
    pub delta: i64,
    pub tone: DeltaTone,
}

impl PanelContent {
    pub fn from_event(event: &RatingEvent) -> ChartResult<Self> {
        let delta = event.delta();
        Ok(Self {
            contest_name: event.contest_name.clone(),
            date: short_date_label(event.timestamp_seconds)?,
            rank: event.rank,
            old_rating: event.old_rating,
            new_rating: event.new_rating,
            delta,
            tone: DeltaTone::from_delta(delta),
        })
    }

    /// `+12`, `-7` or `0`.
    #[must_use]
    pub fn delta_label(&self) -> String {
        if self.delta > 0 {
            format!("+{}", self.delta)
        } else {
            self.delta.to_string()
        }
    }

    #[must_use]
    pub fn rank_line(&self) -> String {
        format!("Rank: {}", self.rank)
    }

    #[must_use]
    pub fn rating_line(&self) -> String {
        format!(
            "Rating: {} \u{2192} {} ({})",
            self.old_rating,
            self.new_rating,
            self.delta_label()
        )
    }

    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        [
            self.contest_name.clone(),
            self.date.clone(),
            self.rank_line(),
            self.rating_line(),
        ]
    }
}

impl fmt::Display for PanelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Floating detail element owned by the host and handed to the chart.
pub trait DetailPanel {
    fn show(&mut self, placement: PanelPlacement, content: &PanelContent) -> ChartResult<()>;

    fn hide(&mut self) -> ChartResult<()>;
}

/// Lends a caller-owned panel to a chart for the chart's lifetime.
impl<P: DetailPanel + ?Sized> DetailPanel for &mut P {
    fn show(&mut self, placement: PanelPlacement, content: &PanelContent) -> ChartResult<()> {
        (**self).show(placement, content)
    }

    fn hide(&mut self) -> ChartResult<()> {
        (**self).hide()
    }
}

/// A page-wide panel shared by every chart rendered on the page.
impl<P: DetailPanel + ?Sized> DetailPanel for Rc<RefCell<P>> {
    fn show(&mut self, placement: PanelPlacement, content: &PanelContent) -> ChartResult<()> {
        self.try_borrow_mut()
            .map_err(|_| ChartError::InvalidData("detail panel is already borrowed".to_owned()))?
            .show(placement, content)
    }

    fn hide(&mut self) -> ChartResult<()> {
        self.try_borrow_mut()
            .map_err(|_| ChartError::InvalidData("detail panel is already borrowed".to_owned()))?
            .hide()
    }
}

/// Panel that records what it was asked to display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPanel {
    pub visible: bool,
    pub placement: Option<PanelPlacement>,
    pub content: Option<PanelContent>,
    pub show_count: usize,
}

impl DetailPanel for RecordingPanel {
    fn show(&mut self, placement: PanelPlacement, content: &PanelContent) -> ChartResult<()> {
        self.visible = true;
        self.placement = Some(placement);
        self.content = Some(content.clone());
        self.show_count += 1;
        Ok(())
    }

    fn hide(&mut self) -> ChartResult<()> {
        self.visible = false;
        Ok(())
    }
}
