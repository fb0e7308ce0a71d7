//! Resume text extraction for uploaded documents.
//!
//! Format is chosen by file extension. PDF parsing is CPU-bound and runs inside
//! `tokio::task::spawn_blocking`; everything happens in memory, no temp files.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
}

impl DocumentFormat {
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(AppError::UnsupportedFormat(extension)),
        }
    }
}

/// Extracts plain text from an uploaded resume. Blank output is rejected.
pub async fn extract_text(file_name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
    let format = DocumentFormat::from_file_name(file_name)?;

    let text = match format {
        DocumentFormat::Txt => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
        })
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF document: {e}")))?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    debug!(?format, chars = text.len(), "extracted resume text");
    Ok(text)
}
