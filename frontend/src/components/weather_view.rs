use std::cell::Cell;
use std::rc::Rc;

use common::{City, CurrentConditions, DailyForecast, ForecastDay, LoadState, UnitPair};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::services::{fetch_current_conditions, fetch_daily_forecast};

/// Gusts are not part of the conditions payload; they are shown as an
/// estimate from the sustained wind speed.
const GUST_FACTOR: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
struct Report {
    current: CurrentConditions,
    forecast: Option<DailyForecast>,
}

#[derive(Clone, Properties, PartialEq)]
pub struct WeatherViewProps {
    pub city: City,
}

#[function_component]
pub fn WeatherView(props: &WeatherViewProps) -> Html {
    let report = use_state(|| LoadState::<Report>::Idle);

    {
        let report = report.clone();
        use_effect_with(props.city.key.clone(), move |key| {
            let cancelled = Rc::new(Cell::new(false));
            report.set(LoadState::Loading);
            {
                let key = key.clone();
                let cancelled = cancelled.clone();
                spawn_local(async move {
                    let current = match fetch_current_conditions(&key).await {
                        Ok(current) => current,
                        Err(error) => {
                            log::error!("Error fetching weather for {}: {}", key, error);
                            if !cancelled.get() {
                                report.set(LoadState::Errored);
                            }
                            return;
                        }
                    };
                    if cancelled.get() {
                        return;
                    }
                    let forecast = match fetch_daily_forecast(&key).await {
                        Ok(forecast) => Some(forecast),
                        Err(error) => {
                            log::warn!("Forecast for {} unavailable: {}", key, error);
                            None
                        }
                    };
                    if !cancelled.get() {
                        report.set(LoadState::Loaded(Report { current, forecast }));
                    }
                });
            }
            move || cancelled.set(true)
        });
    }

    match &*report {
        LoadState::Idle | LoadState::Loading => html! {
            <div class="weather-view loading">
                <div class="skeleton card tall" />
                <div class="skeleton card" />
                <div class="skeleton card" />
            </div>
        },
        LoadState::Errored => {
            let on_retry = Callback::from(|_: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    if let Err(error) = window.location().reload() {
                        log::error!("Failed to reload page: {:?}", error);
                    }
                }
            });
            html! {
                <EmptyState
                    glyph="☁"
                    title="Weather unavailable"
                    description="Unable to load weather data for this location"
                    action_label="Retry"
                    on_action={on_retry}
                />
            }
        }
        LoadState::Loaded(report) => html! {
            <div class="weather-view">
                <CurrentCard city={props.city.clone()} current={report.current.clone()} />
                <DetailsCard current={report.current.clone()} />
                if let Some(forecast) = &report.forecast {
                    <ForecastCard forecast={forecast.clone()} />
                }
            </div>
        },
    }
}

#[derive(Clone, Properties, PartialEq)]
struct CurrentCardProps {
    city: City,
    current: CurrentConditions,
}

#[function_component]
fn CurrentCard(props: &CurrentCardProps) -> Html {
    let current = &props.current;
    let wind_speed = current.wind.as_ref().map(|wind| wind.speed.metric.value);

    html! {
        <div class="card current">
            <div class="current-header">
                <div>
                    <h2>{ &props.city.name }</h2>
                    <div class="country">{ &props.city.country }</div>
                </div>
                <div class="glyph">{ current.icon().glyph() }</div>
            </div>
            <div class="temperature large">{ format!("{}°", current.temperature.metric.rounded()) }</div>
            <div class="weather-text">{ &current.weather_text }</div>
            if let Some(speed) = wind_speed {
                <div class="banner">
                    { format!("Wind gusts up to {} km/h", (speed * GUST_FACTOR).round() as i64) }
                </div>
            }
        </div>
    }
}

#[derive(Clone, Properties, PartialEq)]
struct DetailsCardProps {
    current: CurrentConditions,
}

fn format_pair(pair: Option<&UnitPair>) -> String {
    pair.map(|pair| format!("{} {}", pair.metric.value, pair.metric.unit))
        .unwrap_or_else(|| "N/A".to_string())
}

#[function_component]
fn DetailsCard(props: &DetailsCardProps) -> Html {
    let current = &props.current;
    let feels_like = current
        .apparent_temperature
        .as_ref()
        .map(|temperature| format!("{}°", temperature.metric.rounded()))
        .unwrap_or_else(|| "N/A".to_string());
    let humidity = current
        .relative_humidity
        .map(|humidity| format!("{}%", humidity.round() as i64))
        .unwrap_or_else(|| "N/A".to_string());
    let wind = format_pair(current.wind.as_ref().map(|wind| &wind.speed));
    let uv = match (current.uv_index, current.uv_index_text.as_deref()) {
        (Some(index), Some(text)) => format!("{} ({})", index, text),
        (Some(index), None) => index.to_string(),
        _ => "N/A".to_string(),
    };

    let details = [
        ("Feels like", feels_like),
        ("Humidity", humidity),
        ("Wind", wind),
        ("Visibility", format_pair(current.visibility.as_ref())),
        ("Pressure", format_pair(current.pressure.as_ref())),
        ("UV index", uv),
    ];

    html! {
        <div class="card details">
            <h3>{ "Current conditions" }</h3>
            <dl>
                { for details.into_iter().map(|(label, value)| html! {
                    <div class="detail">
                        <dt>{ label }</dt>
                        <dd>{ value }</dd>
                    </div>
                }) }
            </dl>
        </div>
    }
}

#[derive(Clone, Properties, PartialEq)]
struct ForecastCardProps {
    forecast: DailyForecast,
}

fn forecast_row(day: &ForecastDay) -> Html {
    let width = format!("width: {:.0}%", day.range_percent());
    html! {
        <div class="forecast-day">
            <span class="weekday">{ day.date.format("%a").to_string() }</span>
            <span class="glyph">{ day.icon().glyph() }</span>
            <span class="precipitation">{ day.precipitation_label().unwrap_or_default() }</span>
            <span class="low">{ format!("{}°", day.temperature.minimum.rounded()) }</span>
            <div class="range"><div class="range-fill" style={width} /></div>
            <span class="high">{ format!("{}°", day.temperature.maximum.rounded()) }</span>
        </div>
    }
}

#[function_component]
fn ForecastCard(props: &ForecastCardProps) -> Html {
    html! {
        <div class="card forecast">
            <h3>{ "5-day forecast" }</h3>
            if let Some(headline) = &props.forecast.headline {
                <p class="headline">{ &headline.text }</p>
            }
            { for props.forecast.daily_forecasts.iter().map(forecast_row) }
        </div>
    }
}
