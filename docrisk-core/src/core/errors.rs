//! Error types for the DocRisk service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocRiskError {
    #[error("File operation failed: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Analysis not found: {0}")]
    AnalysisNotFound(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("File size {size} bytes exceeds maximum allowed size of {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Fetch failed for {url}: {message}")]
    FetchError { url: String, message: String },
}
