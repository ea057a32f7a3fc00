use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    JsonStream(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Write(#[from] std::io::Error),
    #[error("payment method catalog is empty")]
    EmptyCatalog,
    #[error("payment method not found: {0}")]
    MissingPointsMethod(String),
    #[error("points settlement did not reach a fixpoint within {limit} iterations")]
    NonTermination { limit: usize },
}

pub type Result<T> = std::result::Result<T, AllocationError>;
