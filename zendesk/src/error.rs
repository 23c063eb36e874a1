use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZendeskError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request body serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out")]
    Timeout,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ZendeskError>;

impl ZendeskError {
    /// HTTP status of a classified API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ZendeskError::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::NotFound)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::RateLimited)
    }

    pub fn is_validation(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Validation)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Unauthorized)
    }

    fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            ZendeskError::Api(e) => Some(e.kind),
            _ => None,
        }
    }
}

/// Query options that could not be turned into a query string.
///
/// Carries a rendering of the offending options value. Fixing the options is
/// the caller's job; retrying the same call fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid options {options}: {reason}")]
pub struct OptionsError {
    pub options: String,
    pub reason: String,
}

impl OptionsError {
    pub fn new<O: std::fmt::Debug + ?Sized>(options: &O, reason: impl Into<String>) -> Self {
        Self {
            options: format!("{options:?}"),
            reason: reason.into(),
        }
    }
}

/// Coarse classification of a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    NotFound,
    Validation,
    RateLimited,
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::Validation => "validation failed",
            ApiErrorKind::RateLimited => "rate limited",
            ApiErrorKind::Server => "server error",
            ApiErrorKind::Other => "API error",
        };
        f.write_str(s)
    }
}

/// A non-2xx response, body passed through verbatim.
#[derive(Error, Debug, Clone)]
#[error("HTTP {status} ({kind}): {body}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub body: String,
    /// `Retry-After` seconds on rate-limited responses.
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, seconds: Option<u64>) -> Self {
        self.retry_after = seconds;
        self
    }
}

/// Response body that did not match the expected envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decode error at '{path}': {message}")]
pub struct DecodeError {
    pub path: String,
    pub message: String,
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    }
}
