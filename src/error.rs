use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("rating history is empty; nothing to render")]
    EmptySeries,

    #[error("plot layout has not completed; coordinate lookup is not available yet")]
    LayoutPending,

    #[error("series index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("upstream rating source failed: {0}")]
    Upstream(String),

    #[error("malformed rating history payload: {0}")]
    MalformedPayload(String),

    #[error("transport error: {0}")]
    Transport(String),
}
