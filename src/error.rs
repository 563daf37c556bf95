use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("operation cancelled by user")]
    Cancelled,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown time series function `{0}`")]
    UnknownSeries(String),
    #[error("malformed {what} payload: {reason}")]
    Payload { what: &'static str, reason: String },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn payload<T: Into<String>>(what: &'static str, reason: T) -> Self {
        AppError::Payload {
            what,
            reason: reason.into(),
        }
    }
}
