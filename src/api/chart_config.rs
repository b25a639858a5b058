use serde::{Deserialize, Serialize};

use crate::core::{SeriesAdapterConfig, XAxisMode};
use crate::error::{ChartError, ChartResult};
use crate::host::PlotStyle;
use crate::interaction::{ConnectorStyle, PanelFootprint, PanelLayout};

pub const DEFAULT_API_BASE_URL: &str = "https://codeforces.com/api";

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist and reload chart setup; every field has
/// a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingChartConfig {
    pub adapter: SeriesAdapterConfig,
    pub plot: PlotStyle,
    pub connector: ConnectorStyle,
    pub panel: PanelLayout,
    pub api_base_url: String,
}

impl Default for RatingChartConfig {
    fn default() -> Self {
        Self {
            adapter: SeriesAdapterConfig::default(),
            plot: PlotStyle::default(),
            connector: ConnectorStyle::default(),
            panel: PanelLayout::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        }
    }
}

impl RatingChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_x_axis_mode(mut self, mode: XAxisMode) -> Self {
        self.adapter.mode = mode;
        self
    }

    #[must_use]
    pub fn with_tick_target(mut self, tick_target: usize) -> Self {
        self.adapter.tick_target = tick_target;
        self
    }

    #[must_use]
    pub fn with_panel_footprint(mut self, width: f64, height: f64) -> Self {
        self.panel.footprint = PanelFootprint { width, height };
        self
    }

    #[must_use]
    pub fn with_connector_style(mut self, connector: ConnectorStyle) -> Self {
        self.connector = connector;
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn from_json_str(raw: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ChartError::InvalidData(format!("invalid chart config: {err}")))?;
        config.validate()
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("cannot serialize chart config: {err}")))
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.adapter.validate()?;

        let footprint = self.panel.footprint;
        if !footprint.width.is_finite()
            || !footprint.height.is_finite()
            || footprint.width <= 0.0
            || footprint.height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "panel footprint must be finite and > 0".to_owned(),
            ));
        }

        for (name, value) in [
            ("connector vertical width", self.connector.vertical_width),
            ("connector link width", self.connector.link_width),
            ("connector dash length", self.connector.link_dash_on_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        self.connector.vertical_color.validate()?;
        self.connector.link_color.validate()?;

        if self.api_base_url.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "api base url must not be empty".to_owned(),
            ));
        }
        Ok(self)
    }
}
