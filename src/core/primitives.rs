use chrono::{DateTime, Utc};

use crate::error::{ChartError, ChartResult};

pub fn unix_seconds_to_datetime(seconds: i64) -> ChartResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {seconds} is outside the supported range"))
    })
}

/// Formats a unix timestamp as a short day label, e.g. `05 Mar 2024` (UTC).
pub fn short_date_label(seconds: i64) -> ChartResult<String> {
    Ok(unix_seconds_to_datetime(seconds)?
        .format("%d %b %Y")
        .to_string())
}
