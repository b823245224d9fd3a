use president::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    Args(String),
}

impl From<SimulatorError> for SinkError {
    fn from(err: SimulatorError) -> Self {
        match err {
            SimulatorError::Io(e) => SinkError::Io(e),
            SimulatorError::Json(e) => SinkError::Serialize(e),
            other => SinkError::Io(std::io::Error::other(other.to_string())),
        }
    }
}
