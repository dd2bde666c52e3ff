use serde::Deserialize;
use std::{net::SocketAddr, path::Path};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Server settings read from the TOML config file. Every key is optional and
/// leptos' own settings (from `Cargo.toml` or `LEPTOS_*`) apply when absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub site_addr: Option<SocketAddr>,
    pub log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadConfigError {
    #[error("Config IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config Parsing Error: {0}")]
    Parsing(#[from] toml::de::Error),
}

impl Config {
    pub fn open(path: &Path) -> Result<Self, ReadConfigError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Like [`Config::open`], but a missing file yields the defaults.
    pub fn open_or_default(path: &Path) -> Result<Self, ReadConfigError> {
        match Self::open(path) {
            Err(ReadConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
            site_addr = "0.0.0.0:8080"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.site_addr, Some("0.0.0.0:8080".parse().unwrap()));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Config>("dns_servers = []").is_err());
    }

    #[test]
    fn missing_file() {
        let path = Path::new("this/config/does/not/exist.toml");
        assert!(matches!(Config::open(path), Err(ReadConfigError::Io(_))));
        assert_eq!(Config::open_or_default(path).unwrap(), Config::default());
    }
}
