//! Error types for the engine client

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot connect to container engine: {0}")]
    Unavailable(String),

    #[error("Container not found: {0}")]
    NotFound(String),

    #[error("Engine query failed: {0}")]
    Query(String),

    #[error("Container engine error: {0}")]
    Runtime(String),

    #[error("Timeout waiting for the engine")]
    Timeout,
}

impl EngineError {
    /// Short stable name of the error variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "EngineUnavailable",
            Self::NotFound(_) => "NotFound",
            Self::Query(_) => "EngineQueryError",
            Self::Runtime(_) => "RuntimeError",
            Self::Timeout => "Timeout",
        }
    }
}

impl From<bollard::errors::Error> for EngineError {
    fn from(err: bollard::errors::Error) -> Self {
        use bollard::errors::Error as B;
        match err {
            B::DockerResponseServerError {
                status_code: 404,
                message,
            } => Self::NotFound(message),
            B::RequestTimeoutError => Self::Timeout,
            B::HyperResponseError { .. } | B::IOError { .. } => Self::Unavailable(err.to_string()),
            other => Self::Runtime(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
