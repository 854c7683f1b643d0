//! Upload validation utilities

use crate::core::errors::DocRiskError;
use crate::core::models::MAX_FILE_SIZE;
use crate::Result;
use std::path::Path;
use tracing::warn;

/// Extensions the upload form offers. Anything else is accepted but logged,
/// since the browser-side filter is advisory only.
const EXPECTED_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown", "html", "htm", "csv"];

/// Validator applied to every upload before it reaches the store
pub struct UploadValidator;

impl UploadValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate upload bytes and filename, rejecting empty and oversized files
    pub fn validate_upload(&self, data: &[u8], filename: &str) -> Result<()> {
        if data.is_empty() {
            return Err(DocRiskError::EmptyFile);
        }

        let size = data.len() as u64;
        if size > MAX_FILE_SIZE {
            return Err(DocRiskError::FileTooLarge {
                size,
                max: MAX_FILE_SIZE,
            });
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension {
            Some(ext) if EXPECTED_EXTENSIONS.contains(&ext.as_str()) => {}
            Some(ext) => warn!("Upload {} has unexpected extension .{}", filename, ext),
            None => warn!("Upload {} has no file extension", filename),
        }

        Ok(())
    }

    /// Validate and sanitize a file name to prevent path traversal
    pub fn sanitize_filename(&self, filename: &str) -> Result<String> {
        if filename.is_empty() {
            return Err(DocRiskError::InvalidInput(
                "filename cannot be empty".to_string(),
            ));
        }

        // Remove any path components and dangerous characters
        let sanitized = filename
            .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
            .replace("..", "_")
            .trim()
            .to_string();

        if sanitized.is_empty() {
            return Err(DocRiskError::InvalidInput(
                "filename contains only invalid characters".to_string(),
            ));
        }

        // Prevent reserved names on Windows
        let lower = sanitized.to_lowercase();
        let reserved_names = [
            "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
            "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
        ];

        if reserved_names.contains(&lower.as_str()) {
            return Ok(format!("_{}", sanitized));
        }

        // Limit filename length
        if sanitized.len() > 255 {
            Ok(sanitized[..255].to_string())
        } else {
            Ok(sanitized)
        }
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload() {
        let validator = UploadValidator::new();

        // Normal file accepted
        assert!(validator.validate_upload(b"content", "notes.txt").is_ok());

        // Unexpected extension still accepted
        assert!(validator.validate_upload(b"content", "photo.jpg").is_ok());

        // Empty file rejected
        assert!(matches!(
            validator.validate_upload(b"", "empty.txt"),
            Err(DocRiskError::EmptyFile)
        ));

        // Oversized file rejected
        let large = vec![0u8; (MAX_FILE_SIZE + 1) as usize];
        assert!(matches!(
            validator.validate_upload(&large, "huge.txt"),
            Err(DocRiskError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_sanitize_filename() {
        let validator = UploadValidator::new();

        // Normal filename passes through
        assert_eq!(validator.sanitize_filename("test.txt").unwrap(), "test.txt");

        // Path traversal is neutralized
        assert_eq!(
            validator.sanitize_filename("../../../etc/passwd").unwrap(),
            "______etc_passwd"
        );

        // Windows reserved name gets prefixed
        assert_eq!(validator.sanitize_filename("CON").unwrap(), "_CON");

        // Empty filename rejected
        assert!(validator.sanitize_filename("").is_err());
    }
}
