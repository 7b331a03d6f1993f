use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("booking with id {0} already exists")]
    DuplicateId(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = BookingError> = std::result::Result<T, E>;
