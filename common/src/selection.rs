use crate::City;

/// The cities the user has added, in insertion order, plus the one being
/// displayed.
///
/// Every transition consumes the store and returns the next one. `selected`
/// always holds the key of a city that is in `cities`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    cities: Vec<City>,
    selected: Option<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn selected(&self) -> Option<&City> {
        let key = self.selected.as_deref()?;
        self.get(key)
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.as_deref() == Some(key)
    }

    pub fn get(&self, key: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Appends `city` and selects it, unless a city with the same key is
    /// already present, in which case nothing changes.
    pub fn add(mut self, city: City) -> Self {
        if self.contains(&city.key) {
            return self;
        }
        self.selected = Some(city.key.clone());
        self.cities.push(city);
        self
    }

    /// Removes the city with `key`. When it was the selected one the first
    /// remaining city becomes selected.
    pub fn remove(mut self, key: &str) -> Self {
        self.cities.retain(|city| city.key != key);
        if self.is_selected(key) {
            self.selected = self.cities.first().map(|city| city.key.clone());
        }
        self
    }

    /// Selects the city with `key`. Unknown keys leave the selection as is.
    pub fn select(mut self, key: &str) -> Self {
        if self.contains(key) {
            self.selected = Some(key.to_string());
        }
        self
    }
}
