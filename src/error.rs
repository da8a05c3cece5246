use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Migration Protocol Error: {0}")]
    Protocol(String),

    #[error("Run Aborted: {0}")]
    Aborted(String),
}

pub type TfResult<T> = Result<T, TourForgeError>;
