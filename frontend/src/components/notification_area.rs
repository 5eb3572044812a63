use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Clone, Properties, PartialEq)]
pub struct NotificationAreaProps {
    pub message: AttrValue,
    pub level: NotificationLevel,
}

/// A one line message shown under the search field.
#[function_component(NotificationArea)]
pub fn notification_area(props: &NotificationAreaProps) -> Html {
    let (level_class, role) = match props.level {
        NotificationLevel::Info => ("info", "status"),
        NotificationLevel::Error => ("error", "alert"),
    };

    html! {
        <div class={classes!("notification-area", level_class)} {role}>
            { props.message.clone() }
        </div>
    }
}
