use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use common::RequestType;
use log::debug;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ProxyError;
use crate::routes::{QueryPairs, first_param};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(get_weather))
        .with_state(state)
}

#[derive(Debug)]
pub struct WeatherParams {
    location: Option<String>,
    request_type: Option<String>,
}

impl From<QueryPairs> for WeatherParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            location: first_param(&pairs, "location"),
            request_type: first_param(&pairs, "type"),
        }
    }
}

async fn get_weather(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Value>, ProxyError> {
    let params = WeatherParams::from(pairs);
    debug!("Weather request received: {:?}", params);
    let provider = state.provider()?;

    let request_type = params
        .request_type
        .as_deref()
        .and_then(|t| t.parse::<RequestType>().ok())
        .ok_or(ProxyError::BadRequest("Invalid request type"))?;
    let location = params
        .location
        .as_deref()
        .filter(|location| !location.is_empty())
        .ok_or(ProxyError::BadRequest("Location key required"))?;

    let weather = match request_type {
        RequestType::Current => provider.current_conditions(location).await,
        RequestType::Forecast => provider.daily_forecast(location).await,
    }
    .map_err(ProxyError::Weather)?;
    Ok(Json(weather))
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use crate::app::api_routes;
    use crate::config::ProviderConfig;
    use crate::routes::test_support::{
        API_KEY, app_for, app_without_key, forbid_upstream_calls, get,
    };

    fn current_conditions() -> Value {
        json!({
            "LocalObservationDateTime": "2025-06-01T14:52:00+01:00",
            "WeatherText": "Partly sunny",
            "WeatherIcon": 3,
            "Temperature": {
                "Metric": { "Value": 18.3, "Unit": "C", "UnitType": 17 },
                "Imperial": { "Value": 65.0, "Unit": "F", "UnitType": 18 }
            },
            "RelativeHumidity": 64
        })
    }

    #[tokio::test]
    async fn current_conditions_are_unwrapped_from_the_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/328328"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("details", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([current_conditions()])))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(app_for(&server), "/api?location=328328&type=current").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, current_conditions());
    }

    #[tokio::test]
    async fn forecast_is_passed_through() {
        let forecast = json!({
            "Headline": { "Text": "Pleasant this weekend" },
            "DailyForecasts": [
                {
                    "Date": "2025-06-02T07:00:00+01:00",
                    "Temperature": {
                        "Minimum": { "Value": 54.0, "Unit": "F" },
                        "Maximum": { "Value": 70.0, "Unit": "F" }
                    }
                }
            ]
        });
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecasts/v1/daily/5day/328328"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("details", "true"))
            .and(query_param("metric", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(app_for(&server), "/api?type=forecast&location=328328").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, forecast);
    }

    #[tokio::test]
    async fn unknown_types_are_rejected_without_calling_upstream() {
        let server = MockServer::start().await;
        forbid_upstream_calls(&server).await;

        for uri in [
            "/api?location=328328",
            "/api?location=328328&type=",
            "/api?location=328328&type=hourly",
            "/api?location=328328&type=daily",
            "/api?location=328328&type=CURRENT",
            "/api?type=astro",
        ] {
            let (status, body) = get(app_for(&server), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "error": "Invalid request type" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_location_is_rejected_without_calling_upstream() {
        let server = MockServer::start().await;
        forbid_upstream_calls(&server).await;

        for uri in [
            "/api?type=current",
            "/api?type=forecast",
            "/api?type=current&location=",
            "/api?location=&type=forecast",
        ] {
            let (status, body) = get(app_for(&server), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "error": "Location key required" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_api_key_is_reported_first() {
        let server = MockServer::start().await;
        forbid_upstream_calls(&server).await;

        for uri in [
            "/api?location=328328&type=current",
            "/api?location=328328&type=forecast",
            "/api?type=hourly",
            "/api",
        ] {
            let (status, body) = get(app_without_key(&server), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(
                body,
                json!({ "error": "AccuWeather API key not configured" }),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn upstream_failures_become_a_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/1"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string("The allowed number of requests has been exceeded."),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecasts/v1/daily/5day/1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        for uri in [
            "/api?location=1&type=current",
            "/api?location=1&type=forecast",
            "/api?location=2&type=current",
        ] {
            let (status, body) = get(app_for(&server), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "Failed to fetch weather data" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_generic_error() {
        let config =
            ProviderConfig::new(Some(API_KEY.to_string()), "http://127.0.0.1:1").unwrap();
        let app = api_routes(AppState::new(&config));

        let (status, body) = get(app, "/api?location=328328&type=current").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch weather data" }));
    }

    #[tokio::test]
    async fn repeated_parameters_use_the_first_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/328328"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([current_conditions()])))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(
            app_for(&server),
            "/api?location=328328&location=1&type=current&type=forecast",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, current_conditions());

        let (status, body) = get(app_for(&server), "/api?location=&location=1&type=nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid request type" }));
    }

    #[tokio::test]
    async fn repeated_parameters_still_report_the_missing_api_key() {
        let server = MockServer::start().await;
        forbid_upstream_calls(&server).await;

        for uri in [
            "/api?location=1&type=current&type=forecast",
            "/api?location=&location=1&type=nope",
        ] {
            let (status, body) = get(app_without_key(&server), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(
                body,
                json!({ "error": "AccuWeather API key not configured" }),
                "{uri}"
            );
        }
    }
}
