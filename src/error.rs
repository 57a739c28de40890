use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The gateway binary answered with a non-zero status code.
    #[error("The API request was not successful (Status: {status})")]
    Communication {
        status: String,
        message: Option<String>,
    },
    #[error("Failed to run gateway binary {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Gateway binary exited with {code} and produced no output")]
    ProcessFailed { code: String },
    #[error("Gateway binary produced no output")]
    MalformedOutput,
    #[error("Gateway binary did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GatewayError {
    /// Status code reported by the gateway, for business errors only.
    pub fn status(&self) -> Option<&str> {
        match self {
            GatewayError::Communication { status, .. } => Some(status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
