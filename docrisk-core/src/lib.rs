//! DocRisk Core Library
//!
//! This library provides the core functionality for the DocRisk service,
//! including document storage, text extraction, risk scanning, and the
//! lead-scraping client.

pub mod core;
pub mod analysis;
pub mod scrape;

// Re-export commonly used types
pub use crate::core::{
    errors::DocRiskError,
    models::{AnalysisDetails, AnalysisResult, Document, FileType, MAX_FILE_SIZE},
    storage::{AnalysisStore, DocumentStore, MemoryStore},
};

pub use crate::analysis::{
    file_security::UploadValidator, risk::RiskAnalyzer, text_extract::TextExtractor,
};

pub use crate::scrape::LeadScraper;

/// Result type used throughout DocRisk
pub type Result<T> = std::result::Result<T, DocRiskError>;
