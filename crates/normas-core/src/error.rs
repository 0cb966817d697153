use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("weights file not found: {0}")]
    WeightsNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid weights JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid weight {name}: {value} (must be a finite, non-negative number)")]
    InvalidWeight { name: &'static str, value: f64 },
}
