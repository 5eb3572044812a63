use axum::Router;
use reqwest::Client;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ProviderConfig;
use crate::error::ProxyError;
use crate::models::accuweather::AccuWeather;
use crate::routes::{search, weather};

// Anything that goes in here must be a handle or pointer that can be cloned.
#[derive(Clone)]
pub struct AppState {
    provider: Option<AccuWeather>,
}

impl AppState {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            provider: AccuWeather::from_config(config, Client::new()),
        }
    }

    /// The provider client, or the configuration error every proxy reports
    /// before looking at its parameters.
    pub fn provider(&self) -> Result<&AccuWeather, ProxyError> {
        self.provider.as_ref().ok_or(ProxyError::MissingApiKey)
    }
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(weather::routes(state.clone()))
        .merge(search::routes(state))
}

pub fn create_app(config: &ProviderConfig, assets_path: &str) -> Router {
    let state = AppState::new(config);
    if state.provider.is_none() {
        log::warn!("No AccuWeather API key configured, every proxy request will fail");
    }

    log::debug!("serving assets from {}", assets_path);
    let assets_service = ServeDir::new(assets_path);
    api_routes(state)
        .fallback_service(assets_service)
        .layer(TraceLayer::new_for_http())
}
