use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Default YAML file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "parliascope.yaml";

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. parliascope.yaml file (if exists)
/// 3. Environment variables with PS_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub bills: BillsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// File holding the persisted bearer token.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillsConfig {
    /// Seconds to wait after triggering an analysis before refetching bills.
    #[serde(default = "default_refresh_delay_secs")]
    pub refresh_delay_secs: u64,
}

impl BillsConfig {
    #[must_use]
    pub const fn refresh_delay(&self) -> Duration {
        Duration::from_secs(self.refresh_delay_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_token_path() -> PathBuf {
    PathBuf::from(".parliascope/credentials.json")
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_refresh_delay_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

impl Default for BillsConfig {
    fn default() -> Self {
        Self {
            refresh_delay_secs: default_refresh_delay_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. parliascope.yaml file (if exists)
    /// 3. Environment variables with PS_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let mut config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("PS_").split("__"))
            .extract()?;

        config.validate()?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "api.base_url '{base_url}' must start with http:// or https://. Set PS_API__BASE_URL or configure in parliascope.yaml."
            )));
        }

        if self.storage.token_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.token_path cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(
            config.storage.token_path,
            PathBuf::from(".parliascope/credentials.json")
        );
        assert_eq!(config.bills.refresh_delay_secs, 5);
        assert_eq!(config.bills.refresh_delay(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_token_path() {
        let mut config = Config::default();
        config.storage.token_path = PathBuf::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("storage.token_path"));
    }

    #[test]
    fn base_url_boundaries() {
        let cases = [
            ("http://localhost:8000", true, "local http"),
            ("https://api.parliascope.ke", true, "https domain"),
            ("http://10.0.2.2:8000", true, "emulator host"),
            ("localhost:8000", false, "no scheme"),
            ("ftp://files.ke", false, "ftp scheme"),
            ("", false, "empty string"),
        ];

        for (base_url, should_pass, desc) in cases {
            let mut config = Config::default();
            config.api.base_url = base_url.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "parliascope.yaml",
                r"
api:
  base_url: http://yaml-host:8000
bills:
  refresh_delay_secs: 9
",
            )?;
            jail.set_env("PS_API__BASE_URL", "https://env-host/");

            let config = Config::load().expect("config loads");
            assert_eq!(config.api.base_url, "https://env-host");
            assert_eq!(config.bills.refresh_delay_secs, 9);
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_missing_yaml_uses_defaults() {
        Jail::expect_with(|_| {
            let config = Config::load_from("does-not-exist.yaml").expect("config loads");
            assert_eq!(config.api.base_url, "http://localhost:8000");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_base_url_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("PS_API__BASE_URL", "parliament.go.ke");
            let err = Config::load().unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            Ok(())
        });
    }
}
