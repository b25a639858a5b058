use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One rating-affecting contest result, as reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<u64>,
    pub contest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub rank: u32,
    #[serde(rename = "ratingUpdateTimeSeconds")]
    pub timestamp_seconds: i64,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingEvent {
    #[must_use]
    pub fn new(
        contest_name: impl Into<String>,
        timestamp_seconds: i64,
        old_rating: i32,
        new_rating: i32,
        rank: u32,
    ) -> Self {
        Self {
            contest_id: None,
            contest_name: contest_name.into(),
            handle: None,
            rank,
            timestamp_seconds,
            old_rating,
            new_rating,
        }
    }

    /// Signed rating change caused by this event, widened so any pair of
    /// `i32` ratings yields an exact difference.
    #[must_use]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_rating) - i64::from(self.old_rating)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.rank == 0 {
            return Err(ChartError::InvalidData(format!(
                "rank must be positive (contest `{}`)",
                self.contest_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RatingEvent;

    #[test]
    fn deserializes_upstream_field_names() {
        let raw = r#"{
            "contestId": 1900,
            "contestName": "Round 912 (Div. 2)",
            "handle": "someone",
            "rank": 120,
            "ratingUpdateTimeSeconds": 1700000000,
            "oldRating": 1400,
            "newRating": 1500
        }"#;
        let event: RatingEvent = serde_json::from_str(raw).expect("event");
        assert_eq!(event.contest_id, Some(1900));
        assert_eq!(event.timestamp_seconds, 1_700_000_000);
        assert_eq!(event.delta(), 100);
    }

    #[test]
    fn delta_spans_the_full_rating_range() {
        let event = RatingEvent::new("c", 0, i32::MIN, i32::MAX, 1);
        assert_eq!(event.delta(), i64::from(u32::MAX));
        let event = RatingEvent::new("c", 0, i32::MAX, i32::MIN, 1);
        assert_eq!(event.delta(), -i64::from(u32::MAX));
    }

    #[test]
    fn zero_rank_is_rejected() {
        let event = RatingEvent::new("c", 0, 1500, 1500, 0);
        assert!(event.validate().is_err());
    }
}
