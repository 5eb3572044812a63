use serde::{Deserialize, Serialize};

pub mod city;
pub mod selection;
pub mod state;
pub mod weather;

pub use city::{project_candidates, City, CityCandidate, MAX_SEARCH_RESULTS};
pub use selection::SelectionStore;
pub use state::{LoadState, SearchState};
pub use weather::{
    ConditionIcon, CurrentConditions, DailyForecast, ForecastDay, Measurement, RequestType,
    UnitPair, UnknownRequestType,
};

/// JSON body of every non-success response returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_body_omits_missing_details() {
        let body = serde_json::to_string(&ApiError::new("Query parameter required")).unwrap();
        assert_eq!(body, r#"{"error":"Query parameter required"}"#);
    }

    #[test]
    fn error_body_reads_details_when_present() {
        let body: ApiError = serde_json::from_str(
            r#"{"error":"Weather service temporarily unavailable","details":"API returned 500: Internal Server Error"}"#,
        )
        .unwrap();
        assert_eq!(
            body.details.as_deref(),
            Some("API returned 500: Internal Server Error")
        );
    }
}
