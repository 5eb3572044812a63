use serde::{Deserialize, Serialize};

/// Number of search candidates offered to the user.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// A place the user has picked from the search results.
///
/// `key` is the provider's location key and identifies the city everywhere
/// else in the application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub key: String,
}

/// One record of the provider's city search response. Only the fields needed
/// to build a [`City`] are read, everything else in the record is ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CityCandidate {
    pub key: String,
    pub localized_name: String,
    pub country: Country,
    pub geo_position: GeoPosition,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    pub localized_name: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<CityCandidate> for City {
    fn from(candidate: CityCandidate) -> Self {
        City {
            name: candidate.localized_name,
            country: candidate.country.localized_name,
            lat: candidate.geo_position.latitude,
            lon: candidate.geo_position.longitude,
            key: candidate.key,
        }
    }
}

/// Turns a search response into the cities shown in the search dialog.
pub fn project_candidates(candidates: Vec<CityCandidate>) -> Vec<City> {
    candidates
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(City::from)
        .collect()
}
