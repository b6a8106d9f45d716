use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid stationboard URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch data from transport API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Transport API returned status {0}")]
    Status(StatusCode),

    #[error("Failed to parse response from transport API: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidUrl(_) => FetchErrorKind::InvalidUrl,
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Status(_) => FetchErrorKind::Status,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    InvalidUrl,
    Transport,
    Status,
    Decode,
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Environment variable {name:?} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
