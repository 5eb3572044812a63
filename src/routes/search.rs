use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use log::{debug, info};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ProxyError;
use crate::routes::{QueryPairs, first_param};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search_cities))
        .route("/api/search/geoposition", get(search_geoposition))
        .with_state(state)
}

#[derive(Debug)]
pub struct SearchParams {
    q: Option<String>,
}

impl From<QueryPairs> for SearchParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            q: first_param(&pairs, "q"),
        }
    }
}

async fn search_cities(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Value>, ProxyError> {
    let params = SearchParams::from(pairs);
    debug!("Search request received: {:?}", params);
    let provider = state.provider()?;

    let query = params
        .q
        .as_deref()
        .filter(|query| !query.is_empty())
        .ok_or(ProxyError::BadRequest("Query parameter required"))?;

    let cities = provider
        .search_cities(query)
        .await
        .map_err(ProxyError::from_search)?;
    info!(
        "Search for {:?} found {} cities",
        query,
        cities.as_array().map_or(0, Vec::len)
    );
    Ok(Json(cities))
}

#[derive(Debug)]
pub struct GeopositionParams {
    lat: Option<String>,
    lon: Option<String>,
}

impl From<QueryPairs> for GeopositionParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            lat: first_param(&pairs, "lat"),
            lon: first_param(&pairs, "lon"),
        }
    }
}

impl GeopositionParams {
    fn coordinates(&self) -> Option<(f64, f64)> {
        let lat: f64 = self.lat.as_deref()?.trim().parse().ok()?;
        let lon: f64 = self.lon.as_deref()?.trim().parse().ok()?;
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then_some((lat, lon))
    }
}

async fn search_geoposition(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Value>, ProxyError> {
    let params = GeopositionParams::from(pairs);
    debug!("Geoposition request received: {:?}", params);
    let provider = state.provider()?;

    let (lat, lon) = params
        .coordinates()
        .ok_or(ProxyError::BadRequest("Latitude and longitude required"))?;

    let city = provider
        .search_geoposition(lat, lon)
        .await
        .map_err(ProxyError::from_search)?;
    Ok(Json(city))
}
