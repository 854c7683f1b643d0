//! Core data models for the DocRisk service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use crate::core::errors::DocRiskError;
use crate::Result;

/// Maximum upload size allowed (25MB)
pub const MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;

/// An uploaded document held by the store for the lifetime of the process.
/// The raw bytes live in the store itself, keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub original_name: String,
    pub file_type: FileType,
    pub size: u64,
    pub hash: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document with validation
    pub fn new(original_name: String, file_type: FileType, size: u64, hash: String) -> Result<Self> {
        if original_name.trim().is_empty() {
            return Err(DocRiskError::InvalidInput(
                "document name cannot be empty".to_string(),
            ));
        }

        if size == 0 {
            return Err(DocRiskError::EmptyFile);
        }

        if size > MAX_FILE_SIZE {
            return Err(DocRiskError::FileTooLarge {
                size,
                max: MAX_FILE_SIZE,
            });
        }

        if hash.is_empty() {
            return Err(DocRiskError::InvalidInput(
                "document hash cannot be empty".to_string(),
            ));
        }

        Ok(Document {
            id: Uuid::new_v4(),
            original_name: original_name.trim().to_string(),
            file_type,
            size,
            hash,
            uploaded_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Html,
    Csv,
    Unknown,
}

impl FileType {
    /// Detect the file type from content magic, falling back to the extension
    pub fn sniff(data: &[u8], filename: &str) -> Self {
        if data.starts_with(b"%PDF") {
            return FileType::Pdf;
        }

        let head = String::from_utf8_lossy(&data[..data.len().min(256)]).to_lowercase();
        let head = head.trim_start();
        if head.starts_with("<!doctype html") || head.starts_with("<html") {
            return FileType::Html;
        }

        match Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => FileType::Pdf,
            Some("txt") | Some("text") => FileType::Text,
            Some("md") | Some("markdown") => FileType::Markdown,
            Some("html") | Some("htm") => FileType::Html,
            Some("csv") => FileType::Csv,
            _ => {
                if std::str::from_utf8(data).is_ok() {
                    FileType::Text
                } else {
                    FileType::Unknown
                }
            }
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Pdf => write!(f, "PDF Document"),
            FileType::Text => write!(f, "Text"),
            FileType::Markdown => write!(f, "Markdown"),
            FileType::Html => write!(f, "HTML"),
            FileType::Csv => write!(f, "CSV"),
            FileType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of a risk scan over one document, keyed by its file id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_id: Uuid,
    pub risk_score: f32,
    pub summary: String,
    pub details: AnalysisDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub flagged_terms: Vec<String>,
    pub recommendations: String,
}

impl AnalysisResult {
    /// Create a new analysis result with validation
    pub fn new(
        file_id: Uuid,
        risk_score: f32,
        summary: String,
        details: AnalysisDetails,
    ) -> Result<Self> {
        if !risk_score.is_finite() || !(0.0..=1.0).contains(&risk_score) {
            return Err(DocRiskError::InvalidInput(format!(
                "risk score {} must be a finite value between 0.0 and 1.0",
                risk_score
            )));
        }

        Ok(AnalysisResult {
            file_id,
            risk_score,
            summary,
            details,
        })
    }

    /// Validate the analysis result
    pub fn validate(&self) -> Result<()> {
        if !self.risk_score.is_finite() || !(0.0..=1.0).contains(&self.risk_score) {
            return Err(DocRiskError::InvalidInput(
                "risk score must be a finite value between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Check if the document scored in the high-risk band (>= 0.7)
    pub fn is_high_risk(&self) -> bool {
        self.risk_score >= 0.7
    }
}
