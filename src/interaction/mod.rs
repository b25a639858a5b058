mod detail_panel;
mod hover_sync;

pub use detail_panel::{
    DeltaTone, DetailPanel, PanelContent, PanelFootprint, PanelLayout, PanelPlacement,
    RecordingPanel, place_panel,
};
pub use hover_sync::{
    Connector, ConnectorStyle, HoverState, HoverSyncEngine, HoverTransition, connector_geometry,
};

use serde::{Deserialize, Serialize};

/// Item under the pointer, as reported by the plotting library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverEvent {
    pub data_index: usize,
    pub page_x: f64,
    pub page_y: f64,
}

impl HoverEvent {
    #[must_use]
    pub fn new(data_index: usize, page_x: f64, page_y: f64) -> Self {
        Self {
            data_index,
            page_x,
            page_y,
        }
    }
}

pub type HoverHandler = Box<dyn FnMut(Option<HoverEvent>)>;
pub type LeaveHandler = Box<dyn FnMut()>;

/// Typed subscription surface for pointer events on the chart.
///
/// `on_hover` receives `None` when the pointer is over the chart but no data
/// item is under it.
pub trait PlotEvents {
    fn on_hover(&mut self, handler: HoverHandler);
    fn on_leave(&mut self, handler: LeaveHandler);
}

/// Single-threaded event dispatcher hosts feed pointer events into.
#[derive(Default)]
pub struct EventHub {
    hover: Vec<HoverHandler>,
    leave: Vec<LeaveHandler>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_hover(&mut self, event: Option<HoverEvent>) {
        for handler in &mut self.hover {
            handler(event);
        }
    }

    pub fn emit_leave(&mut self) {
        for handler in &mut self.leave {
            handler();
        }
    }

    #[must_use]
    pub fn handler_count(&self) -> (usize, usize) {
        (self.hover.len(), self.leave.len())
    }
}

impl PlotEvents for EventHub {
    fn on_hover(&mut self, handler: HoverHandler) {
        self.hover.push(handler);
    }

    fn on_leave(&mut self, handler: LeaveHandler) {
        self.leave.push(handler);
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("hover_handlers", &self.hover.len())
            .field("leave_handlers", &self.leave.len())
            .finish()
    }
}
