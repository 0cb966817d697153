use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("regulation table not found: {0}")]
    TableNotFound(std::path::PathBuf),

    #[error("regulation table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {source}")]
    InvalidTier {
        row: usize,
        #[source]
        source: normas_core::UnknownTier,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
