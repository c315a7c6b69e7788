use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Missing configuration value: {0}. Set it in the config file or environment.")]
    MissingConfig(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

/// A single failed round trip against the GraphQL endpoint.
///
/// Never retried; the pagination engine stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    #[error("query failed with status code {status}")]
    Status { status: u16 },

    #[error("query failed with exception: {cause}")]
    Transport { cause: String },

    #[error("response body could not be decoded: {cause}")]
    Decode { cause: String },
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> MetricsResult<T>;
    fn with_context<F>(self, f: F) -> MetricsResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> MetricsResult<T> {
        self.map_err(|e| MetricsError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> MetricsResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| MetricsError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> MetricsResult<T> {
        self.ok_or_else(|| MetricsError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> MetricsResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| MetricsError::Unknown(f()))
    }
}

