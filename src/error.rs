use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleConsoleError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<&str> for RoleConsoleError {
    fn from(error: &str) -> Self {
        RoleConsoleError::ConfigError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoleConsoleError>;
