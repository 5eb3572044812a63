use std::rc::Rc;

use common::{City, SelectionStore};
use yew::Reducible;

/// The selection store as a yew reducer, so that every action is applied to
/// the latest state even when several arrive before the next render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cities(pub SelectionStore);

pub enum CityAction {
    Add(City),
    Remove(String),
    Select(String),
}

impl Reducible for Cities {
    type Action = CityAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let store = Rc::unwrap_or_clone(self).0;
        let store = match action {
            CityAction::Add(city) => store.add(city),
            CityAction::Remove(key) => store.remove(&key),
            CityAction::Select(key) => store.select(&key),
        };
        Rc::new(Cities(store))
    }
}
