//! Weather request kinds and the provider payloads the frontend renders.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use thiserror::Error;

/// What `/api` is asked for with its `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Current,
    Forecast,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Current => "current",
            RequestType::Forecast => "forecast",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown weather request type '{0}'")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(RequestType::Current),
            "forecast" => Ok(RequestType::Forecast),
            other => Err(UnknownRequestType(other.to_string())),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    pub fn rounded(&self) -> i64 {
        self.value.round() as i64
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UnitPair {
    pub metric: Measurement,
    pub imperial: Option<Measurement>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WindDirection {
    pub degrees: f64,
    pub localized: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Wind {
    pub speed: UnitPair,
    pub direction: Option<WindDirection>,
}

/// Current conditions for one location key, as returned by `/api?type=current`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    pub weather_text: String,
    pub weather_icon: Option<u32>,
    pub temperature: UnitPair,
    pub relative_humidity: Option<f64>,
    pub wind: Option<Wind>,
    pub apparent_temperature: Option<UnitPair>,
    pub visibility: Option<UnitPair>,
    pub pressure: Option<UnitPair>,
    #[serde(rename = "UVIndex")]
    pub uv_index: Option<f64>,
    #[serde(rename = "UVIndexText")]
    pub uv_index_text: Option<String>,
}

impl CurrentConditions {
    pub fn icon(&self) -> ConditionIcon {
        ConditionIcon::from_weather_text(&self.weather_text)
    }
}

/// Five day forecast, as returned by `/api?type=forecast`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecast {
    pub headline: Option<Headline>,
    #[serde(default)]
    pub daily_forecasts: Vec<ForecastDay>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Headline {
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub minimum: Measurement,
    pub maximum: Measurement,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DayPart {
    pub icon: Option<u32>,
    pub icon_phrase: Option<String>,
    #[serde(default)]
    pub has_precipitation: bool,
    pub precipitation_probability: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastDay {
    pub date: DateTime<FixedOffset>,
    pub temperature: TemperatureRange,
    pub day: Option<DayPart>,
}

// Spread of daily temperatures that fills the whole range bar.
const FULL_RANGE_DEGREES: f64 = 20.0;

impl ForecastDay {
    pub fn icon(&self) -> ConditionIcon {
        match &self.day {
            Some(day) if day.has_precipitation => ConditionIcon::Rain,
            Some(DayPart { icon: Some(1), .. }) => ConditionIcon::Sun,
            _ => ConditionIcon::Cloud,
        }
    }

    /// "40%" style chance of precipitation, omitted when zero or unknown.
    pub fn precipitation_label(&self) -> Option<String> {
        let probability = self.day.as_ref()?.precipitation_probability?;
        (probability > 0).then(|| format!("{probability}%"))
    }

    /// Width of the low/high bar in percent.
    pub fn range_percent(&self) -> f64 {
        let spread = (self.temperature.maximum.rounded() - self.temperature.minimum.rounded()) as f64;
        (spread / FULL_RANGE_DEGREES * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    Sun,
    Cloud,
    Rain,
    Snow,
    Wind,
}

impl ConditionIcon {
    pub fn from_weather_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("clear") || text.contains("sunny") {
            ConditionIcon::Sun
        } else if text.contains("cloud") {
            ConditionIcon::Cloud
        } else if text.contains("rain") || text.contains("drizzle") {
            ConditionIcon::Rain
        } else if text.contains("snow") {
            ConditionIcon::Snow
        } else {
            ConditionIcon::Wind
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionIcon::Sun => "☀",
            ConditionIcon::Cloud => "☁",
            ConditionIcon::Rain => "🌧",
            ConditionIcon::Snow => "❄",
            ConditionIcon::Wind => "🌬",
        }
    }
}
