#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Stale index entry: {0}")]
    Stale(String),
    #[error("Index unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid type descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type IndexResult<T> = std::result::Result<T, IndexError>;
