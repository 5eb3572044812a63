use yew::prelude::*;

#[derive(Clone, Properties, PartialEq)]
pub struct EmptyStateProps {
    pub glyph: AttrValue,
    pub title: AttrValue,
    pub description: AttrValue,
    pub action_label: AttrValue,
    #[prop_or_default]
    pub on_action: Option<Callback<MouseEvent>>,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    let action = props.on_action.clone().map(|on_action| {
        html! {
            <button class="primary" onclick={on_action}>{ props.action_label.clone() }</button>
        }
    });

    html! {
        <div class="empty-state">
            <div class="empty-state-icon">{ props.glyph.clone() }</div>
            <h2>{ props.title.clone() }</h2>
            <p>{ props.description.clone() }</p>
            { for action }
        </div>
    }
}
