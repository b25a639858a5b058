use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::RatingEvent;
use crate::error::{ChartError, ChartResult};

/// Upstream provider of a user's rating history.
///
/// Any error is fatal to the chart; callers do not retry.
pub trait RatingHistorySource {
    fn fetch(&self, handle: &str) -> ChartResult<Vec<RatingEvent>>;
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<Vec<RatingEvent>>,
}

/// Parses the `{status, comment?, result?}` envelope of the rating endpoint.
pub fn parse_rating_history(body: &str) -> ChartResult<Vec<RatingEvent>> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|err| ChartError::MalformedPayload(err.to_string()))?;

    if envelope.status != "OK" {
        return Err(ChartError::Upstream(envelope.comment.unwrap_or_else(|| {
            format!("status `{}` without comment", envelope.status)
        })));
    }

    let events = envelope
        .result
        .ok_or_else(|| ChartError::MalformedPayload("`result` is missing".to_owned()))?;
    for event in &events {
        event
            .validate()
            .map_err(|err| ChartError::MalformedPayload(err.to_string()))?;
    }
    Ok(events)
}

/// Extracts the user handle from a profile page path such as `/profile/tourist`.
#[must_use]
pub fn profile_handle_from_path(path: &str) -> Option<&str> {
    let start = path.find("/profile/")? + "/profile/".len();
    let rest = &path[start..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let handle = &rest[..end];
    (!handle.is_empty()).then_some(handle)
}

/// Fetches the history for `handle`, logging the outcome.
pub fn load_rating_history<S: RatingHistorySource + ?Sized>(
    source: &S,
    handle: &str,
) -> ChartResult<Vec<RatingEvent>> {
    match source.fetch(handle) {
        Ok(events) => {
            debug!(handle, events = events.len(), "loaded rating history");
            Ok(events)
        }
        Err(err) => {
            warn!(handle, error = %err, "rating history unavailable");
            Err(err)
        }
    }
}

/// In-memory source serving a fixed history for any handle.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    events: Vec<RatingEvent>,
}

impl StaticSource {
    #[must_use]
    pub fn new(events: Vec<RatingEvent>) -> Self {
        Self { events }
    }

    /// Builds a source from a raw API response body.
    pub fn from_body(body: &str) -> ChartResult<Self> {
        Ok(Self::new(parse_rating_history(body)?))
    }
}

impl RatingHistorySource for StaticSource {
    fn fetch(&self, _handle: &str) -> ChartResult<Vec<RatingEvent>> {
        Ok(self.events.clone())
    }
}

/// Blocking HTTP source for the public `user.rating` endpoint.
#[cfg(feature = "http-source")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[cfg(feature = "http-source")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> ChartResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| ChartError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "http-source")]
impl RatingHistorySource for HttpSource {
    fn fetch(&self, handle: &str) -> ChartResult<Vec<RatingEvent>> {
        let url = format!("{}/user.rating", self.base_url);
        debug!(url = %url, handle, "requesting rating history");
        let body = self
            .client
            .get(&url)
            .query(&[("handle", handle)])
            .send()
            .and_then(|response| response.text())
            .map_err(|err| ChartError::Transport(err.to_string()))?;
        parse_rating_history(&body)
    }
}
