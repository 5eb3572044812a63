#![recursion_limit = "1024"]

use log::debug;

mod components;
mod services;
mod store;

use common::City;
use components::city_list::CityList;
use components::empty_state::EmptyState;
use components::search_dialog::SearchDialog;
use components::weather_view::WeatherView;
use store::{Cities, CityAction};
use yew::prelude::*;

#[function_component]
fn App() -> Html {
    let cities = use_reducer(Cities::default);
    let dialog_open = use_state(|| false);

    let on_select = {
        let cities = cities.dispatcher();
        Callback::from(move |key: String| cities.dispatch(CityAction::Select(key)))
    };
    let on_remove = {
        let cities = cities.dispatcher();
        Callback::from(move |key: String| cities.dispatch(CityAction::Remove(key)))
    };
    let on_add_city = {
        let cities = cities.dispatcher();
        Callback::from(move |city: City| cities.dispatch(CityAction::Add(city)))
    };
    let on_open_change = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |open: bool| dialog_open.set(open))
    };
    let on_welcome_action = {
        let dialog_open = dialog_open.clone();
        Callback::from(move |_: MouseEvent| dialog_open.set(true))
    };

    let main_content = match cities.0.selected() {
        Some(city) => html! {
            <WeatherView key={city.key.clone()} city={city.clone()} />
        },
        None => html! {
            <EmptyState
                glyph="⛅"
                title="Welcome to Weather"
                description="Add a city to get started and view detailed weather information"
                action_label="Add city"
                on_action={on_welcome_action}
            />
        },
    };

    html! {
        <div id="page">
            <aside id="sidebar">
                <h2>{ "Cities" }</h2>
                <CityList store={cities.0.clone()} {on_select} {on_remove} />
            </aside>
            <div id="main">
                <header>
                    <div id="logo">{ "Weather" }</div>
                    <SearchDialog open={*dialog_open} {on_open_change} {on_add_city} />
                </header>
                <div id="main-content" class="section">
                    { main_content }
                </div>
            </div>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    debug!("Starting front end!");
    yew::Renderer::<App>::new().render();
}
