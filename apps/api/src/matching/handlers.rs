//! Axum route handlers for the Match API.

use std::io::Write;
use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::ingest::{load_document, DocumentKind, SourceDocument};
use crate::matching::report::run_match;
use crate::models::report::MatchOutcome;
use crate::persist::save_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub jd_text: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadMatchResponse {
    pub saved_to: String,
    pub report: MatchOutcome,
}

/// POST /api/v1/match
///
/// Runs the deterministic engine on raw JD and resume text and returns the
/// report (or `{}` on hard-fail). Nothing is persisted on this path.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let outcome = run_match(&state.policy, &request.jd_text, &request.resume_text);
    Ok(Json(outcome))
}

/// POST /api/v1/match/upload
///
/// Multipart upload with a `jd` file and a `resume` file. Ingests both,
/// runs the engine, and persists the report under a versioned name derived
/// from the resume's filename.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadMatchResponse>, AppError> {
    let mut jd_part: Option<(String, Vec<u8>)> = None;
    let mut resume_part: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read field '{name}': {e}")))?;
        match name.as_str() {
            "jd" => jd_part = Some((file_name, bytes.to_vec())),
            "resume" => resume_part = Some((file_name, bytes.to_vec())),
            _ => {}
        }
    }

    let (jd_name, jd_bytes) =
        jd_part.ok_or_else(|| AppError::Validation("missing 'jd' file field".to_string()))?;
    let (resume_name, resume_bytes) = resume_part
        .ok_or_else(|| AppError::Validation("missing 'resume' file field".to_string()))?;

    info!("matching upload: jd={jd_name}, resume={resume_name}");

    let policy = state.policy;
    let output_dir = state.config.output_dir.clone();
    let resume_base = file_stem(&resume_name);

    // Document extraction and report writing are blocking filesystem work;
    // keep them off the async runtime.
    let response =
        tokio::task::spawn_blocking(move || -> Result<UploadMatchResponse, AppError> {
            let jd_doc = ingest_bytes(&jd_name, &jd_bytes, DocumentKind::JobDescription)?;
            let resume_doc = ingest_bytes(&resume_name, &resume_bytes, DocumentKind::Resume)?;

            let outcome = run_match(&policy, &jd_doc.raw_text, &resume_doc.raw_text);
            let json = outcome
                .to_json()
                .map_err(|e| AppError::Internal(e.into()))?;
            let path = save_report(&output_dir, &resume_base, &json)?;

            Ok(UploadMatchResponse {
                saved_to: path.display().to_string(),
                report: outcome,
            })
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("upload task failed: {e}")))??;

    Ok(Json(response))
}

/// Spools an uploaded file to disk under its original extension so the
/// ingestion collaborator can dispatch on it.
fn ingest_bytes(
    file_name: &str,
    bytes: &[u8],
    kind: DocumentKind,
) -> Result<SourceDocument, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if extension.is_empty() {
        return Err(AppError::UnsupportedFormat(format!(
            "'{file_name}' has no file extension"
        )));
    }

    let mut temp = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to create temp file: {e}")))?;
    temp.write_all(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to spool upload: {e}")))?;

    load_document(temp.path(), kind)
}

/// The report base name: the resume filename without its extension.
fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("resume")
        .to_string()
}
