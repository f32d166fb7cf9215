use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported preset schema version: {0}")]
    UnsupportedSchema(u32),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
