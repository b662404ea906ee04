//! Serialized form of a document. Persistence and backup files share this
//! encoder so a backup is byte-identical to what the store holds.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

pub fn encode_document(doc: &ResumeDocument) -> Result<String, AppError> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode document: {e}")))
}

/// Parses a serialized document. Malformed input is a `Parse` error, never an
/// empty document.
pub fn decode_document(raw: &str) -> Result<ResumeDocument, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::Parse(format!("Invalid backup file: {e}")))
}

pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("resumefy_backup_{}.json", now.timestamp_millis())
}
