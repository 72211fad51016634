/// Error types for the Twelve Data SDK.
///
/// Maps the provider's `{code, message, status}` envelope codes onto typed
/// Rust errors, and projects every error onto a small [`ErrorKind`] taxonomy.
use thiserror::Error;

/// The primary error type for the Twelve Data SDK.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TwelveDataError {
    // Provider envelope errors
    #[error("Too many requests (429): {0}")]
    TooManyRequests(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not available with your plan: {0}")]
    PlanRestricted(String),

    #[error("Forbidden (403): {0}")]
    Forbidden(String),

    #[error("Invalid provider response ({code}): {message}")]
    InvalidResponse { code: i64, message: String },

    // Transport errors
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    // Client-side errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification of every [`TwelveDataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Dial failure, timeout or non-200 status. The body was never inspected.
    Transport,
    /// A body arrived but was not the JSON that was expected.
    Unmarshal,
    TooManyRequests,
    NotFound,
    PlanRestricted,
    Forbidden,
    InvalidProviderResponse,
    /// Client-side failures (configuration, URL building, WebSocket plumbing).
    Client,
}

/// Outcome of mapping a nonzero envelope `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    BadRequest,
    TooManyRequests,
    Forbidden,
    NotFoundByCode,
    InvalidResponse,
}

impl ProviderErrorKind {
    /// Map a nonzero envelope code onto a provider error kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            400 => ProviderErrorKind::BadRequest,
            429 => ProviderErrorKind::TooManyRequests,
            403 => ProviderErrorKind::Forbidden,
            404 => ProviderErrorKind::NotFoundByCode,
            _ => ProviderErrorKind::InvalidResponse,
        }
    }
}

impl TwelveDataError {
    /// Create an error from a provider kind, code and message, without any
    /// message-based refinement.
    pub fn from_provider(kind: ProviderErrorKind, code: i64, message: String) -> Self {
        match kind {
            ProviderErrorKind::TooManyRequests => TwelveDataError::TooManyRequests(message),
            ProviderErrorKind::Forbidden => TwelveDataError::Forbidden(message),
            ProviderErrorKind::NotFoundByCode => TwelveDataError::NotFound(message),
            ProviderErrorKind::BadRequest | ProviderErrorKind::InvalidResponse => {
                TwelveDataError::InvalidResponse { code, message }
            }
        }
    }

    /// Project this error onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwelveDataError::TooManyRequests(_) => ErrorKind::TooManyRequests,
            TwelveDataError::NotFound(_) => ErrorKind::NotFound,
            TwelveDataError::PlanRestricted(_) => ErrorKind::PlanRestricted,
            TwelveDataError::Forbidden(_) => ErrorKind::Forbidden,
            TwelveDataError::InvalidResponse { .. } => ErrorKind::InvalidProviderResponse,
            TwelveDataError::HttpError(_) | TwelveDataError::UnexpectedStatus(_) => {
                ErrorKind::Transport
            }
            TwelveDataError::JsonError(_) => ErrorKind::Unmarshal,
            TwelveDataError::WebSocketError(_)
            | TwelveDataError::ConfigError(_)
            | TwelveDataError::Other(_) => ErrorKind::Client,
        }
    }

    /// Returns the provider error code when the error came from an envelope.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            TwelveDataError::TooManyRequests(_) => Some(429),
            TwelveDataError::Forbidden(_) => Some(403),
            TwelveDataError::PlanRestricted(_) => Some(400),
            TwelveDataError::InvalidResponse { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true for outcomes that are part of normal operation and are
    /// never logged at error level.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            TwelveDataError::TooManyRequests(_) | TwelveDataError::NotFound(_)
        )
    }
}

impl From<reqwest::Error> for TwelveDataError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the API key; the source chain does not.
        let err = err.without_url();
        TwelveDataError::HttpError(error_chain(&err))
    }
}

/// Render an error followed by each distinct message in its source chain,
/// e.g. `error sending request: client error (Connect): connection refused`.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

impl From<serde_json::Error> for TwelveDataError {
    fn from(err: serde_json::Error) -> Self {
        TwelveDataError::JsonError(err.to_string())
    }
}

impl From<url::ParseError> for TwelveDataError {
    fn from(err: url::ParseError) -> Self {
        TwelveDataError::ConfigError(format!("URL parse error: {err}"))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for TwelveDataError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        TwelveDataError::WebSocketError(err.to_string())
    }
}
