//! rating-chart: dual-axis rating/rank history chart.
//!
//! Rating events are adapted into two index-aligned series, drawn through a
//! pluggable plotting backend on a rating axis and an inverted rank axis, and
//! linked on hover by a connector drawn on a transparent overlay while a
//! floating panel shows the hovered contest.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{RatingChart, RatingChartConfig};
pub use error::{ChartError, ChartResult};
