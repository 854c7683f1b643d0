//! In-memory document and analysis storage
//!
//! Uploads live for the lifetime of the process; there is deliberately no
//! durable persistence behind these traits.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::file_security::UploadValidator;
use crate::core::models::{AnalysisResult, Document, FileType};
use crate::Result;

/// Trait for document storage operations
#[async_trait]
pub trait DocumentStore {
    async fn store_document(&self, data: &[u8], original_name: &str) -> Result<Document>;
    async fn get_document(&self, id: Uuid) -> Result<Option<Document>>;
    async fn get_content(&self, id: Uuid) -> Result<Option<Vec<u8>>>;
    async fn list_documents(&self) -> Result<Vec<Document>>;
}

/// Trait for analysis result storage
#[async_trait]
pub trait AnalysisStore {
    async fn store_analysis(&self, result: &AnalysisResult) -> Result<()>;
    async fn get_analysis(&self, file_id: Uuid) -> Result<Option<AnalysisResult>>;
}

struct StoredDocument {
    document: Document,
    content: Vec<u8>,
}

/// Process-lifetime store holding uploaded documents and their analyses
pub struct MemoryStore {
    documents: RwLock<HashMap<Uuid, StoredDocument>>,
    analyses: RwLock<HashMap<Uuid, AnalysisResult>>,
    validator: UploadValidator,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            documents: RwLock::new(HashMap::new()),
            analyses: RwLock::new(HashMap::new()),
            validator: UploadValidator::new(),
        }
    }

    /// Calculate SHA-256 hash of file data
    fn calculate_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn store_document(&self, data: &[u8], original_name: &str) -> Result<Document> {
        self.validator.validate_upload(data, original_name)?;
        let sanitized_name = self.validator.sanitize_filename(original_name)?;

        let file_type = FileType::sniff(data, &sanitized_name);
        let hash = Self::calculate_hash(data);
        let document = Document::new(sanitized_name, file_type, data.len() as u64, hash)?;

        self.documents.write().await.insert(
            document.id,
            StoredDocument {
                document: document.clone(),
                content: data.to_vec(),
            },
        );

        info!(
            "Stored document: {} ({}) - Type: {}",
            document.original_name, document.id, document.file_type
        );
        Ok(document)
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&id)
            .map(|stored| stored.document.clone()))
    }

    async fn get_content(&self, id: Uuid) -> Result<Option<Vec<u8>>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&id)
            .map(|stored| stored.content.clone()))
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut listed: Vec<Document> = documents
            .values()
            .map(|stored| stored.document.clone())
            .collect();
        listed.sort_by_key(|doc| doc.uploaded_at);
        Ok(listed)
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn store_analysis(&self, result: &AnalysisResult) -> Result<()> {
        result.validate()?;

        // Re-analyzing a document replaces its previous result
        self.analyses
            .write()
            .await
            .insert(result.file_id, result.clone());

        debug!("Stored analysis for document {}", result.file_id);
        Ok(())
    }

    async fn get_analysis(&self, file_id: Uuid) -> Result<Option<AnalysisResult>> {
        Ok(self.analyses.read().await.get(&file_id).cloned())
    }
}
