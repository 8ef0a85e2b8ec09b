use bytes::Bytes;
use tracing::warn;

/// Extracts plain text from PDF bytes.
///
/// Best-effort: non-PDF input, corrupt files and extractor panics all yield an
/// empty string. Extraction is CPU-bound, so it runs on the blocking pool.
pub async fn extract_pdf_text(bytes: Bytes) -> String {
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text extraction failed, storing empty text: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF text extraction aborted, storing empty text: {e}");
            String::new()
        }
    }
}
