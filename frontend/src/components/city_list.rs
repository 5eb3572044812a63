use std::cell::Cell;
use std::rc::Rc;

use common::{City, CurrentConditions, LoadState, SelectionStore};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::services::fetch_current_conditions;

#[derive(Clone, Properties, PartialEq)]
pub struct CityListProps {
    pub store: SelectionStore,
    pub on_select: Callback<String>,
    pub on_remove: Callback<String>,
}

#[function_component(CityList)]
pub fn city_list(props: &CityListProps) -> Html {
    if props.store.is_empty() {
        return html! {
            <div class="city-list empty">
                { "No cities added yet. Click \"Add city\" to get started." }
            </div>
        };
    }

    html! {
        <div class="city-list">
            {
                props.store.cities().iter().map(|city| html! {
                    <CityListItem
                        key={city.key.clone()}
                        city={city.clone()}
                        selected={props.store.is_selected(&city.key)}
                        on_select={props.on_select.clone()}
                        on_remove={props.on_remove.clone()}
                    />
                }).collect::<Html>()
            }
        </div>
    }
}

#[derive(Clone, Properties, PartialEq)]
pub struct CityListItemProps {
    pub city: City,
    pub selected: bool,
    pub on_select: Callback<String>,
    pub on_remove: Callback<String>,
}

/// Sidebar entry. Fetches the current conditions of its own city; a failure
/// only hides the weather line.
#[function_component(CityListItem)]
pub fn city_list_item(props: &CityListItemProps) -> Html {
    let conditions = use_state(|| LoadState::<CurrentConditions>::Idle);

    {
        let conditions = conditions.clone();
        use_effect_with(props.city.key.clone(), move |key| {
            let cancelled = Rc::new(Cell::new(false));
            conditions.set(LoadState::Loading);
            {
                let key = key.clone();
                let cancelled = cancelled.clone();
                spawn_local(async move {
                    let result = fetch_current_conditions(&key).await;
                    if let Err(error) = &result {
                        log::error!("Error fetching weather for {}: {}", key, error);
                    }
                    if !cancelled.get() {
                        conditions.set(LoadState::resolve(result));
                    }
                });
            }
            move || cancelled.set(true)
        });
    }

    let onclick = {
        let key = props.city.key.clone();
        props.on_select.reform(move |_: MouseEvent| key.clone())
    };
    let on_remove = {
        let key = props.city.key.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_remove.emit(key.clone());
        })
    };

    let class = classes!("city-list-item", props.selected.then_some("selected"));
    if matches!(*conditions, LoadState::Idle | LoadState::Loading) {
        return html! {
            <div {class}>
                <div class="skeleton line short" />
                <div class="skeleton line shorter" />
            </div>
        };
    }

    let weather = conditions.loaded();
    html! {
        <div {class} {onclick}>
            <div class="city-summary">
                <div class="city-name">{ "📍 " }{ &props.city.name }</div>
                if let Some(weather) = weather {
                    <div class="weather-text">{ &weather.weather_text }</div>
                }
            </div>
            <div class="city-actions">
                if let Some(weather) = weather {
                    <span class="temperature">
                        { format!("{}°", weather.temperature.metric.rounded()) }
                    </span>
                }
                <button type="button" class="remove" onclick={on_remove}>{ "✕" }</button>
            </div>
        </div>
    }
}
