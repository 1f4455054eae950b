use thiserror::Error;

/// Startup failures. The only errors that end the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(".env parse error: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures of a single request to the homework API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Endpoint returned status {status}: {reason}")]
    Status { status: u16, reason: &'static str },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl FetchError {
    /// Build a status error, naming the codes the API is known to return
    /// transiently.
    pub fn from_status(status: u16) -> Self {
        let reason = match status {
            404 => "endpoint not found",
            408 => "request timed out",
            429 => "too many requests",
            500 => "internal server error",
            504 => "gateway timeout",
            _ => "unexpected status code",
        };
        FetchError::Status { status, reason }
    }

    /// Whether the failure is one the API is known to produce now and then.
    /// Informational only: the poller handles every fetch failure the same way.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => matches!(status, 404 | 408 | 429 | 500 | 504),
            FetchError::Network(_) => true,
            FetchError::InvalidBody(_) => false,
        }
    }
}

/// Everything that can abort one polling cycle.
///
/// Each variant is caught once, by the poller, and turned into a chat message.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Failed to fetch homework statuses: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unexpected API response shape: {0}")]
    Shape(String),

    #[error("Unknown homework status: {status:?}")]
    UnknownStatus { status: String },
}

/// A Telegram delivery failure. Never leaves the notifier.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Telegram API error (status {status}): {description}")]
    Api { status: u16, description: String },

    #[error("Telegram rejected the message: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
