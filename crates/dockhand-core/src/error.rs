//! Error types for dockhand-core

use dockhand_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0}")]
    EngineUnavailable(String),

    #[error("{0}")]
    EngineQuery(String),

    #[error("{0}")]
    CommandFailure(String),
}

impl CoreError {
    /// Short stable name of the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EngineUnavailable(_) => "EngineUnavailable",
            Self::EngineQuery(_) => "EngineQueryError",
            Self::CommandFailure(_) => "CommandFailure",
        }
    }
}

impl From<EngineError> for CoreError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unavailable(_) => Self::EngineUnavailable(err.to_string()),
            other => Self::EngineQuery(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
