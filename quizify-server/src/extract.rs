//! Document text extraction

use async_trait::async_trait;
use quizify_common::{Error, Result};
use tracing::debug;

/// Uploaded document bytes → plain text
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, document: Vec<u8>) -> Result<String>;
}

/// PDF text extraction via `pdf-extract`
///
/// Parsing is CPU-bound and runs on the blocking pool. A parser panic on a
/// malformed file is reported as `UnreadableDocument`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[async_trait]
impl DocumentExtractor for PdfTextExtractor {
    async fn extract(&self, document: Vec<u8>) -> Result<String> {
        if document.is_empty() {
            return Err(Error::UnreadableDocument("empty upload".to_string()));
        }

        let size = document.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| Error::UnreadableDocument(format!("PDF parser aborted: {}", e)))?
            .map_err(|e| Error::UnreadableDocument(e.to_string()))?;

        // Image-only PDFs parse fine but carry no text layer
        if text.trim().is_empty() {
            return Err(Error::UnreadableDocument("document contains no extractable text".to_string()));
        }

        debug!(bytes = size, chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}
