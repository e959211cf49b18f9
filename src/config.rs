// src/config.rs

//! Runtime configuration: compiled-in defaults, an optional YAML file, then
//! environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RoleConsoleError};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ROLE_CONSOLE_CONFIG";
/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "role-console.yml";

const BASE_URL_ENV: &str = "ROLE_CONSOLE_BASE_URL";
const DEBOUNCE_ENV: &str = "ROLE_CONSOLE_DEBOUNCE_MS";
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub fetch_path: String,
    pub create_path: String,
    pub update_path: String,
    /// Delay before a typed role name is committed and fetched.
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub log_dir: PathBuf,
    /// Modules pre-selected in the module picker.
    pub initial_modules: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.test.helpinglab.com/api".to_string(),
            fetch_path: "/role/fetchtestrole".to_string(),
            create_path: "/Role/addtestrole".to_string(),
            update_path: "/Role/modifytestrole".to_string(),
            debounce_ms: 450,
            request_timeout_secs: 30,
            log_dir: PathBuf::from("./logs"),
            initial_modules: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load defaults, the config file (if any) and env overrides, then validate.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply env-style overrides through `lookup` so tests don't touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(DEBOUNCE_ENV) {
            self.debounce_ms = raw.trim().parse().map_err(|_| {
                RoleConsoleError::ConfigError(format!("{} must be an integer, got {:?}", DEBOUNCE_ENV, raw))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| RoleConsoleError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RoleConsoleError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.base_url
            )));
        }

        for (field, path) in [
            ("fetch_path", &self.fetch_path),
            ("create_path", &self.create_path),
            ("update_path", &self.update_path),
        ] {
            if !path.starts_with('/') {
                return Err(RoleConsoleError::ConfigError(format!("{} must start with '/'", field)));
            }
        }

        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(RoleConsoleError::ConfigError(format!(
                "debounce_ms must be at most {}",
                MAX_DEBOUNCE_MS
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be positive".into());
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce(), Duration::from_millis(450));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
base_url: "http://localhost:8080/api"
debounce_ms: 200
initial_modules:
  - Sale
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.initial_modules, vec!["Sale".to_string()]);
        assert_eq!(config.fetch_path, "/role/fetchtestrole");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| match key {
                "ROLE_CONSOLE_BASE_URL" => Some("http://127.0.0.1:9000".to_string()),
                "ROLE_CONSOLE_DEBOUNCE_MS" => Some("100".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.debounce_ms, 100);
    }

    #[test]
    fn test_bad_debounce_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "ROLE_CONSOLE_DEBOUNCE_MS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(RoleConsoleError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = AppConfig {
            base_url: "ftp://example.com".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(RoleConsoleError::InvalidUrl(_))));

        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_and_debounce_bounds() {
        let config = AppConfig {
            update_path: "Role/modifytestrole".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            debounce_ms: 60_000,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
