use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimtempError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("scheduler already running")]
    AlreadyRunning,
    #[error("sensor service not initialized")]
    NotInitialized,
    #[error("no reading available yet")]
    NotReady,
    #[error("initialization failed: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, SimtempError>;
