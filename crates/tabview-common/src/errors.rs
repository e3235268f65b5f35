use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while decoding a persisted navigation history.
///
/// These never escape the history store's restore path: a failed decode
/// falls back to an empty history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("history stream truncated: needed {needed} bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("malformed history: {0}")]
    Malformed(String),

    #[error("unsupported history version: {0}")]
    UnsupportedVersion(u32),

    #[error("history index {index} out of range for {len} entries")]
    InvalidIndex { index: usize, len: usize },
}

/// Transport failure reported for an auxiliary fetch (e.g. view-source).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("connection refused")]
    ConnectionRefused,

    #[error("host not found")]
    HostNotFound,

    #[error("operation timed out")]
    Timeout,

    #[error("operation canceled")]
    Canceled,

    #[error("network error code {0}")]
    Other(i32),
}

impl NetworkError {
    /// Numeric error code handed to completion callbacks.
    pub fn code(&self) -> i32 {
        match self {
            NetworkError::ConnectionRefused => 1,
            NetworkError::HostNotFound => 3,
            NetworkError::Timeout => 4,
            NetworkError::Canceled => 5,
            NetworkError::Other(code) => *code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            1 => NetworkError::ConnectionRefused,
            3 => NetworkError::HostNotFound,
            4 => NetworkError::Timeout,
            5 => NetworkError::Canceled,
            other => NetworkError::Other(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TabviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("{0}")]
    Other(String),
}
