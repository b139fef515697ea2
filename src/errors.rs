use thiserror::Error;

/// Failures reported by the aggregation, filtering, and registry layers.
///
/// Every variant is recoverable: callers are expected to surface the message
/// (re-prompt, show a toast) and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for the snapshot and configuration edges around the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
