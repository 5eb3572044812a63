use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

use crate::config::ProviderConfig;

const LANGUAGE: &str = "en-us";

#[derive(Debug, Error)]
pub enum UpstreamError {
    // The url is stripped from these errors since it carries the api key.
    #[error("request to AccuWeather failed: {0}")]
    Transport(reqwest::Error),
    #[error("AccuWeather responded with {status}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected AccuWeather payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.without_url())
    }
}

/// Client for the AccuWeather data service.
///
/// Cheap to clone, all clones share the same connection pool.
#[derive(Clone)]
pub struct AccuWeather {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl AccuWeather {
    /// Returns `None` when no api key is configured.
    pub fn from_config(config: &ProviderConfig, http: Client) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    /// Current conditions for a location key. The service answers with a
    /// one element array, the element is returned.
    pub async fn current_conditions(&self, location: &str) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["currentconditions", "v1", location])?;
        match self.get_json(url, &[("details", "true")]).await? {
            Value::Array(items) => items.into_iter().next().ok_or_else(|| {
                UpstreamError::Payload("empty current conditions array".to_string())
            }),
            _ => Err(UpstreamError::Payload(
                "current conditions is not an array".to_string(),
            )),
        }
    }

    /// Five day daily forecast in imperial units.
    pub async fn daily_forecast(&self, location: &str) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["forecasts", "v1", "daily", "5day", location])?;
        self.get_json(url, &[("details", "true"), ("metric", "false")])
            .await
    }

    /// Free text search among top level administrative areas.
    pub async fn search_cities(&self, query: &str) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["locations", "v1", "cities", "search"])?;
        self.get_json(
            url,
            &[
                ("q", query),
                ("language", LANGUAGE),
                ("details", "false"),
                ("topLevel", "1"),
            ],
        )
        .await
    }

    /// The city closest to a coordinate.
    pub async fn search_geoposition(&self, lat: f64, lon: f64) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["locations", "v1", "cities", "geoposition", "search"])?;
        let position = format!("{lat},{lon}");
        self.get_json(
            url,
            &[
                ("q", position.as_str()),
                ("language", LANGUAGE),
                ("details", "false"),
            ],
        )
        .await
    }

    // Each segment is percent encoded, so a location key can't escape its
    // place in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Payload(format!("{} can't be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url, query: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AccuWeather responded with {}: {}", status, truncate_body(&body));
            return Err(UpstreamError::Status { status, body });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| UpstreamError::Payload(err.to_string()))
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
