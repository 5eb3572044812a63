use common::{City, SearchState};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::notification_area::{NotificationArea, NotificationLevel};
use crate::services::search_cities;

#[derive(PartialEq, Properties)]
pub struct SearchDialogProps {
    pub open: bool,
    pub on_open_change: Callback<bool>,
    pub on_add_city: Callback<City>,
}

/// Modal dialog for finding cities by name. Only the answer to the most
/// recent submission is shown.
#[function_component]
pub fn SearchDialog(props: &SearchDialogProps) -> Html {
    let query = use_state(String::new);
    let search = use_state(SearchState::default);
    let generation = use_mut_ref(|| 0u32);
    let query_input_ref = use_node_ref();

    let reset = {
        let query = query.clone();
        let search = search.clone();
        let generation = generation.clone();
        move || {
            *generation.borrow_mut() += 1;
            query.set(String::new());
            search.set(SearchState::Idle);
        }
    };

    let on_input = {
        let query = query.clone();
        let search = search.clone();
        let query_input = query_input_ref.clone();
        Callback::from(move |_: InputEvent| {
            let Some(input) = query_input.cast::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            search.set((*search).clone().query_changed(&value));
            query.set(value);
        })
    };

    let on_submit = {
        let query = query.clone();
        let search = search.clone();
        let generation = generation.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let next = SearchState::submit(&query);
            let searching = next.is_searching();
            search.set(next);
            if !searching {
                return;
            }

            let issued = {
                let mut generation = generation.borrow_mut();
                *generation += 1;
                *generation
            };
            let query = query.trim().to_string();
            let search = search.clone();
            let generation = generation.clone();
            spawn_local(async move {
                let outcome = search_cities(&query).await;
                if *generation.borrow() == issued {
                    search.set(outcome);
                } else {
                    log::debug!("Dropping stale results for {}", query);
                }
            });
        })
    };

    let on_open = {
        let on_open_change = props.on_open_change.clone();
        Callback::from(move |_: MouseEvent| on_open_change.emit(true))
    };

    let on_close = {
        let on_open_change = props.on_open_change.clone();
        let reset = reset.clone();
        Callback::from(move |_: MouseEvent| {
            reset();
            on_open_change.emit(false);
        })
    };

    let results = search
        .cities()
        .iter()
        .map(|city| {
            let on_pick = {
                let city = city.clone();
                let on_add_city = props.on_add_city.clone();
                let on_open_change = props.on_open_change.clone();
                let reset = reset.clone();
                Callback::from(move |_: MouseEvent| {
                    on_add_city.emit(city.clone());
                    on_open_change.emit(false);
                    reset();
                })
            };
            html! {
                <button type="button" class="search-result" key={city.key.clone()} onclick={on_pick}>
                    <span class="city-name">{ &city.name }</span>
                    <span class="country">{ format!(", {}", city.country) }</span>
                </button>
            }
        })
        .collect::<Html>();

    let notification = match &*search {
        SearchState::Errored(message) => html! {
            <NotificationArea message={message.clone()} level={NotificationLevel::Error} />
        },
        SearchState::Empty => html! {
            <NotificationArea
                message="No cities found. Try a different search term."
                level={NotificationLevel::Info}
            />
        },
        _ => html! {},
    };

    let searching = search.is_searching();
    html! {
        <>
            <button type="button" class="primary" onclick={on_open}>{ "+ Add city" }</button>
            if props.open {
                <div class="dialog-backdrop">
                    <div class="dialog" role="dialog" aria-modal="true">
                        <div class="dialog-header">
                            <h2>{ "Add city" }</h2>
                            <button type="button" class="close" onclick={on_close}>{ "✕" }</button>
                        </div>
                        <form class="search-form" onsubmit={on_submit}>
                            <input
                                type="text"
                                placeholder="Search for a city..."
                                value={(*query).clone()}
                                ref={query_input_ref}
                                oninput={on_input}
                                disabled={searching}
                            />
                            <button type="submit" disabled={searching || query.trim().is_empty()}>
                                { if searching { "Searching..." } else { "Search" } }
                            </button>
                        </form>
                        { notification }
                        <div class="search-results">{ results }</div>
                    </div>
                </div>
            }
        </>
    }
}
