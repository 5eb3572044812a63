use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ApiError;
use log::{error, warn};
use thiserror::Error;

use crate::models::accuweather::UpstreamError;

/// Everything a proxy handler can fail with. Converting it into a response
/// also logs it.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("AccuWeather API key not configured")]
    MissingApiKey,
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("Failed to fetch weather data")]
    Weather(#[source] UpstreamError),
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Invalid API key. Please check your AccuWeather API configuration.")]
    InvalidApiKey,
    #[error("Invalid request. Please check your search query.")]
    InvalidQuery,
    #[error("Weather service temporarily unavailable")]
    ServiceUnavailable(StatusCode),
    #[error("Failed to search cities")]
    SearchFailed(#[source] UpstreamError),
}

impl ProxyError {
    /// Translates a failed location search. The status codes of the provider
    /// are mapped onto what the frontend knows how to explain.
    pub fn from_search(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, .. } => match status {
                StatusCode::SERVICE_UNAVAILABLE => ProxyError::RateLimited,
                StatusCode::UNAUTHORIZED => ProxyError::InvalidApiKey,
                StatusCode::BAD_REQUEST => ProxyError::InvalidQuery,
                other => ProxyError::ServiceUnavailable(other),
            },
            other => ProxyError::SearchFailed(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingApiKey | ProxyError::Weather(_) | ProxyError::SearchFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::BadRequest(_) | ProxyError::InvalidQuery => StatusCode::BAD_REQUEST,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ProxyError::ServiceUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn details(&self) -> Option<String> {
        let details = match self {
            ProxyError::RateLimited => {
                "The AccuWeather API has exceeded the allowed number of requests.".to_string()
            }
            ProxyError::InvalidApiKey => {
                "The provided API key is not valid or has expired.".to_string()
            }
            ProxyError::InvalidQuery => {
                "The search query format is not supported by the API.".to_string()
            }
            // reqwest doesn't keep the reason phrase sent by the upstream,
            // the standard one for the code is used instead.
            ProxyError::ServiceUnavailable(status) => match status.canonical_reason() {
                Some(reason) => format!("API returned {}: {}", status.as_u16(), reason),
                None => format!("API returned {}", status.as_u16()),
            },
            ProxyError::SearchFailed(_) => "Network error or service unavailable".to_string(),
            _ => return None,
        };
        Some(details)
    }

    pub fn body(&self) -> ApiError {
        ApiError {
            error: self.to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::Weather(source) | ProxyError::SearchFailed(source) => {
                error!("{}: {}", self, source)
            }
            ProxyError::MissingApiKey => error!("{}", self),
            ProxyError::BadRequest(_) => warn!("Rejected request: {}", self),
            _ => warn!("Upstream refused request: {}", self),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
