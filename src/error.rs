#[derive(Debug, thiserror::Error)]
pub enum FalakError {
    #[error("invalid birth data: {0}")]
    InvalidBirthData(String),

    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, FalakError>;
