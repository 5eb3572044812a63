pub mod search;
pub mod weather;

/// Query string pairs as sent. Extracted as a list so a repeated name never
/// rejects the request before the api key check.
pub type QueryPairs = Vec<(String, String)>;

/// First value of `name`, later repeats are ignored.
pub fn first_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}
