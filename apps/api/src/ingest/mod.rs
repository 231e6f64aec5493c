//! Document ingestion — the collaborator that turns uploaded files into
//! plain text. The matching engine itself never sees a file format, only
//! `SourceDocument::raw_text` with newlines preserved.

use std::path::Path;

use tracing::info;

use crate::errors::AppError;

/// Which side of the match a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    JobDescription,
    Resume,
}

/// A loaded input document. Immutable once ingested; discarded after the
/// report is generated.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub kind: DocumentKind,
    pub raw_text: String,
}

/// Loads a document from disk, dispatching on the file extension.
///
/// Supported: PDF (via `pdf-extract`) and plain text. DOCX and everything
/// else is rejected as an unsupported format before the engine runs.
pub fn load_document(path: &Path, kind: DocumentKind) -> Result<SourceDocument, AppError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let raw_text = match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path)
            .map_err(|e| AppError::Ingest(format!("PDF extraction failed: {e}")))?,
        "txt" | "text" => std::fs::read_to_string(path)
            .map_err(|e| AppError::Ingest(format!("failed to read {}: {e}", path.display())))?,
        other => {
            return Err(AppError::UnsupportedFormat(format!(
                "unsupported document format '.{other}' (supported: .pdf, .txt)"
            )))
        }
    };

    info!(
        "loaded {:?} document from {} ({} chars)",
        kind,
        path.display(),
        raw_text.len()
    );

    Ok(SourceDocument { kind, raw_text })
}
