use std::path::Path;

use async_trait::async_trait;

use crate::error::{ConvertError, Result};

/// Text extraction capability
///
/// Consumes raw document bytes on disk and produces plain text. Empty text
/// is a valid result and flows through to synthesis unchanged.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, source_path: &Path) -> Result<String>;
}

/// Extractor for uploaded documents
///
/// PDF input (sniffed by magic bytes) is parsed with `pdf-extract` on a
/// blocking worker; anything else is treated as UTF-8 text.
pub struct DocumentExtractor;

const PDF_MAGIC: &[u8] = b"%PDF";

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, source_path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(source_path).await.map_err(|e| {
            tracing::error!(path = %source_path.display(), error = %e, "failed to read uploaded document");
            ConvertError::Extraction(format!("failed to read uploaded document: {e}"))
        })?;

        if bytes.starts_with(PDF_MAGIC) {
            // PDF parsing is CPU-bound; keep it off the async workers
            let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ConvertError::Internal(format!("extraction task panicked: {e}")))?
                .map_err(|e| {
                    tracing::warn!(path = %source_path.display(), error = %e, "PDF parsing failed");
                    ConvertError::Extraction(format!("PDF parsing failed: {e}"))
                })?;

            tracing::debug!(chars = text.len(), "extracted text from PDF");
            Ok(text)
        } else {
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
