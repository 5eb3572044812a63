use anyhow::{bail, Result};
use common::{ApiError, CityCandidate, CurrentConditions, DailyForecast, RequestType, SearchState};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

async fn fetch_weather<T: DeserializeOwned>(location: &str, request_type: RequestType) -> Result<T> {
    log::info!("Fetching {} weather for {}", request_type, location);
    let response = Request::get("/api")
        .query([("location", location), ("type", request_type.as_str())])
        .send()
        .await?;
    if !response.ok() {
        bail!(
            "{} weather for {} failed with status {}",
            request_type,
            location,
            response.status()
        );
    }
    Ok(response.json::<T>().await?)
}

pub async fn fetch_current_conditions(location: &str) -> Result<CurrentConditions> {
    fetch_weather(location, RequestType::Current).await
}

pub async fn fetch_daily_forecast(location: &str) -> Result<DailyForecast> {
    fetch_weather(location, RequestType::Forecast).await
}

/// Runs a city search and returns the state the search dialog should show.
pub async fn search_cities(query: &str) -> SearchState {
    let response = match Request::get("/api/search").query([("q", query)]).send().await {
        Ok(response) => response,
        Err(error) => {
            log::error!("Error searching cities: {}", error);
            return SearchState::unreachable();
        }
    };

    if !response.ok() {
        let message = response.json::<ApiError>().await.ok().map(|body| body.error);
        log::warn!("City search rejected with status {}", response.status());
        return SearchState::rejected(message);
    }

    match response.json::<Vec<CityCandidate>>().await {
        Ok(candidates) => SearchState::found(candidates),
        Err(error) => {
            log::error!("Failed to parse search results: {}", error);
            SearchState::unreachable()
        }
    }
}
