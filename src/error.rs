use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoodjotError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API key not set: {0}")]
    MissingApiKey(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Remote call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Prompt failed: {0}")]
    PromptError(String),

    #[error("Not a terminal: {0}")]
    NotInteractive(String),
}

impl MoodjotError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MoodjotError::HttpError(_) | MoodjotError::Timeout(_) => Some(
                "Check your internet connection. Reflections fall back to a default while offline."
            ),
            MoodjotError::MissingApiKey(_) => Some(
                "Export your key, e.g.:\n  export GEMINI_API_KEY=...\nOr point `remote.api_key_env` in the config at another variable"
            ),
            MoodjotError::TomlError(_) | MoodjotError::ConfigError(_) => Some(
                "Run `moodjot config --path` to find the config file and check its contents"
            ),
            MoodjotError::NotInteractive(_) => Some(
                "Run moodjot from an interactive terminal"
            ),
            _ => None,
        }
    }
}

impl From<inquire::InquireError> for MoodjotError {
    fn from(e: inquire::InquireError) -> Self {
        MoodjotError::PromptError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MoodjotError>;
