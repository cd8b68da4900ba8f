use jsniscope_api::IndexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsniError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Type index error: {0}")]
    Index(#[from] IndexError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JsniError>;
