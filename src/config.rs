use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://dataservice.accuweather.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read from '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse toml from '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid upstream url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Optional configuration file.
///
/// ```toml
/// [accuweather]
/// api_key = "..."
/// base_url = "http://dataservice.accuweather.com"
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub accuweather: AccuWeatherSection,
}

#[derive(Deserialize, Debug, Default)]
pub struct AccuWeatherSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// How to reach the weather provider. Built once at startup and handed to
/// the application state; request handlers never look at the environment.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
}

impl ProviderConfig {
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid("expected an http(s) base url".to_string()));
        }
        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: url,
        })
    }

    /// Combines explicitly given values with the configuration file. Explicit
    /// values win, the file fills the gaps and the public AccuWeather endpoint
    /// is the last resort. An empty key counts as no key.
    pub fn resolve(
        api_key: Option<String>,
        base_url: Option<String>,
        file: ConfigFile,
    ) -> Result<Self, ConfigError> {
        let non_empty = |value: &String| !value.trim().is_empty();
        let api_key = api_key
            .filter(non_empty)
            .or(file.accuweather.api_key.filter(non_empty));
        let base_url = base_url
            .or(file.accuweather.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, &base_url)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn file(api_key: Option<&str>, base_url: Option<&str>) -> ConfigFile {
        ConfigFile {
            accuweather: AccuWeatherSection {
                api_key: api_key.map(str::to_string),
                base_url: base_url.map(str::to_string),
            },
        }
    }

    #[test]
    fn explicit_values_win_over_the_file() {
        let config = ProviderConfig::resolve(
            Some("cli-key".to_string()),
            Some("https://example.com/weather".to_string()),
            file(Some("file-key"), Some("http://file.example.com")),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("cli-key"));
        assert_eq!(config.base_url.as_str(), "https://example.com/weather");
    }

    #[test]
    fn file_fills_in_missing_values() {
        let config = ProviderConfig::resolve(
            None,
            None,
            file(Some("file-key"), Some("http://file.example.com")),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.base_url.as_str(), "http://file.example.com/");
    }

    #[test]
    fn defaults_to_public_endpoint_without_key() {
        let config = ProviderConfig::resolve(None, None, ConfigFile::default()).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url.as_str(), "http://dataservice.accuweather.com/");
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let config =
            ProviderConfig::resolve(Some(String::new()), None, file(Some("  "), None)).unwrap();
        assert_eq!(config.api_key, None);

        let config =
            ProviderConfig::resolve(Some(String::new()), None, file(Some("file-key"), None))
                .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ProviderConfig::new(None, "not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ProviderConfig::new(None, "mailto:weather@example.com"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn parses_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [accuweather]
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(file.accuweather.api_key.as_deref(), Some("secret"));
        assert_eq!(file.accuweather.base_url, None);

        let file: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(file.accuweather.api_key, None);
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = ProviderConfig::new(Some("secret".to_string()), DEFAULT_BASE_URL).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn reading_a_missing_file_fails() {
        let err = ConfigFile::read(Path::new("/nonexistent/weather.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/weather.toml"));
    }
}
