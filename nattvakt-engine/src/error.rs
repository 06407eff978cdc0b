use thiserror::Error;
use tokio::task::JoinError;

use nattvakt_capture::CaptureError;
use nattvakt_config::ConfigError;
use nattvakt_detection::DetectionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Detection setup error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Task error: {0}")]
    Task(String),
}

impl From<JoinError> for EngineError {
    fn from(err: JoinError) -> Self {
        EngineError::Task(err.to_string())
    }
}
