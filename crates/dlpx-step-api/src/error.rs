use thiserror::Error;

/// Step error types
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Undefined operation: {0}")]
    UndefinedOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StepResult<T> = Result<T, StepError>;

// Conversion from serde_json errors
impl From<serde_json::Error> for StepError {
    fn from(err: serde_json::Error) -> Self {
        StepError::Serialization(err.to_string())
    }
}
