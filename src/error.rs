use thiserror::Error;

/// Shown when the backend cannot be reached or returns something unreadable
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit. Check backend route.";

/// Shown when the backend rejects a request without saying why
pub const OPERATION_FAILED_MESSAGE: &str = "Operation failed";

/// Errors that can occur while searching, browsing or persisting recipes
#[derive(Error, Debug)]
pub enum CookbookError {
    /// Failed to reach an HTTP endpoint or decode its response
    #[error("Request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// User input did not pass validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing the session file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A persisted value could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// An endpoint URL could not be parsed
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl CookbookError {
    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            CookbookError::FetchError(_) => SUBMIT_FAILED_MESSAGE.to_string(),
            CookbookError::Rejected(message) if message.trim().is_empty() => {
                OPERATION_FAILED_MESSAGE.to_string()
            }
            CookbookError::Rejected(message) | CookbookError::InvalidInput(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}
