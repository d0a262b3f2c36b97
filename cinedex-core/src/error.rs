use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store query failed: {0}")]
    Store(String),

    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid match pattern: {0}")]
    InvalidPattern(String),

    #[error("Field `{0}` is not an array")]
    NotAnArray(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
