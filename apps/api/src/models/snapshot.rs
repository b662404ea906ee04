use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;

/// A named copy of the document and theme, kept in the saved-resumes list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSnapshot {
    pub name: String,
    pub document: ResumeDocument,
    pub theme: String,
    pub saved_at: DateTime<Utc>,
}

/// List view of a snapshot, without the document body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub index: usize,
    pub name: String,
    pub theme: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedSnapshot {
    pub fn summary(&self, index: usize) -> SnapshotSummary {
        SnapshotSummary {
            index,
            name: self.name.clone(),
            theme: self.theme.clone(),
            saved_at: self.saved_at,
        }
    }
}
