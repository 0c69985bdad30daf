use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Raised locally before any network activity.
    #[error("Please upload or draw a sketch first.")]
    MissingSketch,

    #[error("A generation is already in progress")]
    Busy,

    #[error("Failed to read {name}: {message}")]
    ReadError { name: String, message: String },

    #[error("Encode error: {0}")]
    EncodeError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Request error: {0}")]
    RequestError(String),

    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Response error: {0}")]
    ResponseError(String),

    #[error("No image was returned by the model.{}", model_said(.0))]
    NoImageReturned(Option<String>),
}

fn model_said(text: &Option<String>) -> String {
    match text {
        Some(text) => format!(" Model said: {}", text),
        None => String::new(),
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(e: reqwest::Error) -> Self {
        StudioError::RequestError(e.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
