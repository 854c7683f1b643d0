//! Text extraction from uploaded documents

use crate::core::models::FileType;
use tracing::debug;

/// Fallback preview length when no text can be extracted
const PREVIEW_BYTES: usize = 500;

/// Extracts scannable text from raw document bytes
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text for risk scanning.
    ///
    /// PDF text layers are not decoded; PDFs degrade to a byte preview, the
    /// same way the scan degrades for any document that yields no text.
    pub fn extract(&self, data: &[u8], file_type: &FileType) -> String {
        let text = match file_type {
            FileType::Pdf => String::new(),
            _ => String::from_utf8_lossy(data).into_owned(),
        };

        if text.trim().is_empty() {
            debug!(
                "No text extracted from {} bytes ({}), falling back to preview",
                data.len(),
                file_type
            );
            Self::preview(data)
        } else {
            text
        }
    }

    /// Lossy preview of the leading bytes
    fn preview(data: &[u8]) -> String {
        let end = data.len().min(PREVIEW_BYTES);
        String::from_utf8_lossy(&data[..end]).into_owned()
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}
